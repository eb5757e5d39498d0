// This file is part of conch, a POSIX-style shell.
// Copyright (C) 2026 conch authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Type definitions for shell options
//!
//! This module defines the [`OptionSet`] struct, a map from [`Option`] to
//! [`State`]. The option set represents whether each option is on or off.
//! Options are named with positive polarity: the traditional `noglob` and
//! `nounset` settings correspond to turning the `Glob` and `Unset` options
//! off.
//!
//! `OptionSet` merely stores the state of options. The parser and the
//! expansion pipeline read it to adjust their behavior.

use enumset::EnumSet;
use enumset::EnumSetType;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Not;
use std::str::FromStr;

/// State of an option: either enabled or disabled.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum State {
    /// Enabled.
    On,
    /// Disabled.
    Off,
}

pub use State::*;

/// Converts a state to a string (`on` or `off`).
impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            On => "on",
            Off => "off",
        };
        s.fmt(f)
    }
}

impl Not for State {
    type Output = Self;
    #[must_use]
    fn not(self) -> Self {
        match self {
            On => Off,
            Off => On,
        }
    }
}

/// Shell option
#[derive(Clone, Copy, Debug, EnumSetType, Eq, Hash, PartialEq)]
#[enumset(no_super_impls)]
#[non_exhaustive]
pub enum Option {
    /// Performs brace expansion on expanded words.
    BraceExpand,
    /// Makes pathname expansion case-sensitive.
    ///
    /// Turning this option off enables the traditional `nocaseglob` behavior.
    CaseGlob,
    /// Makes pathname expansion match file names starting with a period.
    DotGlob,
    /// Enables `**` recursion in pathname expansion.
    ExtendedGlob,
    /// Enables pathname expansion.
    Glob,
    /// Enables features for interactive use.
    Interactive,
    /// Appends a slash to directories resulting from pathname expansion.
    MarkDirs,
    /// Removes fields whose pathname expansion produced no match.
    NullGlob,
    /// Disables most non-POSIX extensions.
    PosixlyCorrect,
    /// Expands unset parameters to an empty string rather than erroring out.
    Unset,
}

pub use self::Option::*;

impl Option {
    /// Returns the option name, all in lower case without punctuation.
    #[must_use]
    pub fn long_name(self) -> &'static str {
        match self {
            BraceExpand => "braceexpand",
            CaseGlob => "caseglob",
            DotGlob => "dotglob",
            ExtendedGlob => "extendedglob",
            Glob => "glob",
            Interactive => "interactive",
            MarkDirs => "markdirs",
            NullGlob => "nullglob",
            PosixlyCorrect => "posixlycorrect",
            Unset => "unset",
        }
    }
}

/// Prints the option name, all in lower case without punctuation.
impl Display for Option {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.long_name().fmt(f)
    }
}

/// Error type indicating that a string does not name a valid option.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NoSuchOption;

/// Parses a canonical option name.
impl FromStr for Option {
    type Err = NoSuchOption;
    fn from_str(name: &str) -> Result<Self, NoSuchOption> {
        EnumSet::<Option>::all()
            .iter()
            .find(|option| option.long_name() == name)
            .ok_or(NoSuchOption)
    }
}

/// Collection of all option states
///
/// Internally, this is a set of enabled options.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct OptionSet {
    enabled: EnumSet<Option>,
}

impl OptionSet {
    /// Returns a set with all options disabled.
    #[must_use]
    pub fn empty() -> Self {
        OptionSet {
            enabled: EnumSet::empty(),
        }
    }

    /// Returns the state of an option.
    #[must_use]
    pub fn get(&self, option: Option) -> State {
        if self.enabled.contains(option) {
            On
        } else {
            Off
        }
    }

    /// Sets the state of an option.
    pub fn set(&mut self, option: Option, state: State) {
        match state {
            On => self.enabled.insert(option),
            Off => self.enabled.remove(option),
        };
    }
}

/// The default option set has `BraceExpand`, `CaseGlob`, `Glob` and `Unset`
/// enabled.
impl Default for OptionSet {
    fn default() -> Self {
        OptionSet {
            enabled: BraceExpand | CaseGlob | Glob | Unset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_states() {
        let set = OptionSet::default();
        assert_eq!(set.get(BraceExpand), On);
        assert_eq!(set.get(CaseGlob), On);
        assert_eq!(set.get(Glob), On);
        assert_eq!(set.get(Unset), On);
        assert_eq!(set.get(DotGlob), Off);
        assert_eq!(set.get(Interactive), Off);
        assert_eq!(set.get(NullGlob), Off);
        assert_eq!(set.get(PosixlyCorrect), Off);
    }

    #[test]
    fn setting_and_clearing() {
        let mut set = OptionSet::default();
        set.set(Glob, Off);
        assert_eq!(set.get(Glob), Off);
        set.set(NullGlob, On);
        assert_eq!(set.get(NullGlob), On);
        set.set(NullGlob, Off);
        assert_eq!(set.get(NullGlob), Off);
    }

    #[test]
    fn parsing_option_names() {
        assert_eq!("glob".parse(), Ok(Glob));
        assert_eq!("nullglob".parse(), Ok(NullGlob));
        assert_eq!("bogus".parse::<Option>(), Err(NoSuchOption));
    }

    #[test]
    fn state_negation() {
        assert_eq!(!On, Off);
        assert_eq!(!Off, On);
    }
}
