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

//! Source code positions
//!
//! This module defines the types that describe where a syntactic construct or
//! an expansion error came from. A [`Code`] is one unit of parsed source code
//! (usually one logical command line) and a [`Location`] is a byte range in a
//! code. Locations are carried through the AST and the expansion pipeline so
//! that diagnostics can annotate the offending part of the input.

use std::num::NonZeroU64;
use std::ops::Range;
use std::rc::Rc;

/// Origin of source code
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Source {
    /// Source of unknown origin, mainly used in tests
    Unknown,
    /// Command string given to the shell
    CommandString,
    /// Command executed in a command substitution
    CommandSubst,
}

impl Source {
    /// Returns a label describing the source, used as a file name in
    /// diagnostics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Source::Unknown => "<?>",
            Source::CommandString => "<command>",
            Source::CommandSubst => "<command substitution>",
        }
    }
}

/// Unit of parsed source code
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Code {
    /// Source code text
    pub value: String,
    /// Line number of the first line of the code, counted from 1
    pub start_line_number: NonZeroU64,
    /// Origin of this code
    pub source: Source,
}

/// Position of a syntactic construct in source code
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Location {
    /// Code that contains the construct
    pub code: Rc<Code>,
    /// Byte range of the construct in `code.value`
    pub range: Range<usize>,
}

impl Location {
    /// Creates a dummy location whose code is the given string.
    ///
    /// The location covers the whole string and its source is
    /// [unknown](Source::Unknown).
    #[must_use]
    pub fn dummy<S: Into<String>>(value: S) -> Self {
        fn inner(value: String) -> Location {
            let range = 0..value.len();
            let code = Rc::new(Code {
                value,
                start_line_number: NonZeroU64::MIN,
                source: Source::Unknown,
            });
            Location { code, range }
        }
        inner(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy_location() {
        let location = Location::dummy("echo");
        assert_eq!(location.code.value, "echo");
        assert_eq!(location.range, 0..4);
        assert_eq!(location.code.source, Source::Unknown);
    }

    #[test]
    fn location_equality_compares_code_values() {
        assert_eq!(Location::dummy("a"), Location::dummy("a"));
        assert_ne!(Location::dummy("a"), Location::dummy("b"));
    }
}
