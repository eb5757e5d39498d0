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

//! Intermediate expansion results
//!
//! An [`AttrChar`] is a character annotated with how it came to be during the
//! initial expansion. The attributes answer, in constant time, the questions
//! the later pipeline steps ask of each position: may field splitting split
//! here, is this character pattern syntax or literal data for the brace and
//! pathname expansions, and is it a quotation mark to be dropped by quote
//! removal. Because every character carries its own attributes, the value and
//! its "splittability" are a single sequence of the same length at every
//! point in the pipeline.
//!
//! An [`AttrField`] is a string of `AttrChar`s together with the location of
//! the word it was expanded from. The final steps of the expansion are
//! [quote removal](skip_quotes), which drops quoting characters, and
//! [attribute stripping](Strip), which turns attributed characters back into
//! plain ones.

use conch_env::semantics::Field;
use conch_env::source::Location;

/// Origin of a character produced in the initial expansion
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Origin {
    /// The character appeared literally in the original word.
    Literal,

    /// The character originates from a tilde expansion or a numeric brace
    /// expansion.
    ///
    /// This kind of character is treated literally in the pathname expansion
    /// and is not subject to field splitting.
    HardExpansion,

    /// The character originates from a parameter expansion or a command
    /// substitution.
    ///
    /// This kind of character is subject to field splitting where unquoted.
    SoftExpansion,
}

/// Character with attributes describing its origin
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AttrChar {
    /// Character value
    pub value: char,
    /// Character origin
    pub origin: Origin,
    /// Whether this character is quoted by another character
    pub is_quoted: bool,
    /// Whether this is a quotation character that quotes another character
    ///
    /// A character can be both quoting and quoted: in the word `"\$"`, the
    /// backslash quotes the dollar and is itself quoted by the double-quotes.
    pub is_quoting: bool,
}

impl AttrChar {
    /// Whether field splitting may split at this character
    #[must_use]
    pub fn allows_splitting(&self) -> bool {
        self.origin == Origin::SoftExpansion && !self.is_quoted && !self.is_quoting
    }

    /// Whether this character is unquoted pattern or brace syntax rather than
    /// data produced by an expansion
    #[must_use]
    pub fn is_syntactic(&self) -> bool {
        self.origin == Origin::Literal && !self.is_quoted && !self.is_quoting
    }
}

/// String of `AttrChar`s with the location of the originating word
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttrField {
    /// Value of the field
    pub chars: Vec<AttrChar>,
    /// Location of the word this field resulted from
    pub origin: Location,
}

impl AttrField {
    /// Performs quote removal and attribute stripping at once.
    #[must_use]
    pub fn remove_quotes_and_strip(self) -> Field {
        let value = skip_quotes(self.chars).strip().collect();
        let origin = self.origin;
        Field { value, origin }
    }
}

/// Performs quote removal on an iterator.
///
/// The returned iterator skips over quoting characters from the original
/// iterator.
pub fn skip_quotes<I>(iter: I) -> impl Iterator<Item = AttrChar>
where
    I: IntoIterator<Item = AttrChar>,
{
    iter.into_iter().filter(|c| !c.is_quoting)
}

/// Trait for performing attribute stripping
///
/// Attribute stripping converts an attributed character back into a plain
/// character. Note that it does not perform quote removal; combine with
/// [`skip_quotes`] for the full final pass.
pub trait Strip {
    /// Result of attribute stripping
    type Output;

    /// Performs attribute stripping.
    #[must_use]
    fn strip(self) -> Self::Output;
}

impl Strip for AttrChar {
    type Output = char;
    fn strip(self) -> char {
        self.value
    }
}

/// Iterator wrapper that strips attributes from its items
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Iter<I>(I);

impl<I> Iterator for Iter<I>
where
    I: Iterator,
    <I as Iterator>::Item: Strip,
{
    type Item = <<I as Iterator>::Item as Strip>::Output;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Strip::strip)
    }
}

impl<I> Strip for I
where
    I: Iterator,
    <I as Iterator>::Item: Strip,
{
    type Output = Iter<I>;
    fn strip(self) -> Iter<I> {
        Iter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy(value: char, is_quoted: bool, is_quoting: bool) -> AttrChar {
        AttrChar {
            value,
            origin: Origin::Literal,
            is_quoted,
            is_quoting,
        }
    }

    #[test]
    fn skipping_quotes() {
        let a = dummy('a', false, false);
        let b = dummy('b', false, true);
        let c = dummy('c', true, false);
        let d = dummy('d', true, true);
        let output: Vec<_> = skip_quotes([a, b, c, d]).collect();
        assert_eq!(output, [a, c]);
    }

    #[test]
    fn stripping() {
        let chars = [dummy('o', false, false), dummy('k', true, false)];
        let stripped: String = chars.into_iter().strip().collect();
        assert_eq!(stripped, "ok");
    }

    #[test]
    fn remove_quotes_and_strip() {
        let field = AttrField {
            chars: vec![
                dummy('"', false, true),
                dummy('h', true, false),
                dummy('i', true, false),
                dummy('"', false, true),
            ],
            origin: Location::dummy("\"hi\""),
        };
        assert_eq!(field.remove_quotes_and_strip().value, "hi");
    }

    #[test]
    fn splittability() {
        let soft = AttrChar {
            value: ' ',
            origin: Origin::SoftExpansion,
            is_quoted: false,
            is_quoting: false,
        };
        assert!(soft.allows_splitting());
        assert!(!AttrChar { is_quoted: true, ..soft }.allows_splitting());
        assert!(!AttrChar { origin: Origin::Literal, ..soft }.allows_splitting());
        assert!(!AttrChar { origin: Origin::HardExpansion, ..soft }.allows_splitting());
    }
}
