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

//! Type definitions for command execution semantics

use crate::source::Location;

/// Number that summarizes the result of command execution
///
/// An exit status is an integer returned from a utility (or command) when
/// executed. It usually is a summarized result of the execution.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExitStatus(pub i32);

impl ExitStatus {
    /// Exit status of 0: success
    pub const SUCCESS: ExitStatus = ExitStatus(0);

    /// Exit status of 1: failure
    pub const FAILURE: ExitStatus = ExitStatus(1);

    /// Exit status the shell terminates with when a word expansion fails in
    /// a non-interactive session
    pub const EXP_ERROR: ExitStatus = ExitStatus(2);

    /// Whether the exit status indicates success
    #[must_use]
    pub const fn is_successful(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i32> for ExitStatus {
    fn from(value: i32) -> Self {
        ExitStatus(value)
    }
}

/// Word fully expanded to a string
///
/// A field is a word that has gone through the whole expansion pipeline; its
/// value is the final argument string. The origin links the field back to the
/// word it was expanded from, for use in diagnostics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    /// Value of the field
    pub value: String,
    /// Location of the word this field resulted from
    pub origin: Location,
}

impl Field {
    /// Creates a field with a dummy origin, mainly for testing.
    #[must_use]
    pub fn dummy<S: Into<String>>(value: S) -> Field {
        fn inner(value: String) -> Field {
            let origin = Location::dummy(&value);
            Field { value, origin }
        }
        inner(value.into())
    }
}
