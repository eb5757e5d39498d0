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

//! Definition of errors that happen in the parser

use crate::source::Location;
use crate::source::pretty::{Annotation, AnnotationType, Message};
use thiserror::Error;

/// Types of syntax errors
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{}", self.message())]
#[non_exhaustive]
pub enum SyntaxError {
    /// A backslash is at the end of the input.
    IncompleteEscape,
    /// A single quotation lacks a closing `'`.
    UnclosedSingleQuote {
        /// Position of the opening `'`
        opening_location: Location,
    },
    /// A double quotation lacks a closing `"`.
    UnclosedDoubleQuote {
        /// Position of the opening `"`
        opening_location: Location,
    },
    /// A parameter expansion lacks a closing `}`.
    UnclosedParam {
        /// Position of the opening `${`
        opening_location: Location,
    },
    /// A parameter expansion lacks a name.
    EmptyParam,
    /// A modifier does not have a valid form in a parameter expansion.
    InvalidModifier,
    /// A command substitution started with `$(` but lacks a closing `)`.
    UnclosedCommandSubstitution {
        /// Position of the opening `$(`
        opening_location: Location,
    },
    /// A command substitution started with `` ` `` but lacks a closing
    /// `` ` ``.
    UnclosedBackquote {
        /// Position of the opening backquote
        opening_location: Location,
    },
    /// An arithmetic expansion lacks a closing `))`.
    UnclosedArith {
        /// Position of the opening `$((`
        opening_location: Location,
    },
    /// A `)` appears without a matching `(`.
    UnopenedSubshell,
    /// A subshell is not closed.
    UnclosedSubshell {
        /// Position of the opening `(`
        opening_location: Location,
    },
    /// A newline appears outside any quoted or parenthesized context.
    InvalidNewline,
    /// A `{` or `}` is used as a grouping token.
    UnsupportedGrouping,
    /// A separator is missing between commands.
    MissingSeparator,
    /// The file descriptor specified for a redirection cannot be used.
    FdOutOfRange,
    /// A redirection operator is missing its operand.
    MissingRedirOperand,
    /// A command is missing before a `|` token.
    MissingCommandBeforeBar,
    /// A command is missing after a `|` token.
    MissingCommandAfterBar,
    /// A command is missing after a `&&` or `||` token.
    MissingCommandAfterAndOr,
    /// A command is missing where one is required.
    MissingCommand,
    /// There is a redundant token.
    RedundantToken,
}

impl SyntaxError {
    /// Returns an error message describing the error.
    #[must_use]
    pub fn message(&self) -> &'static str {
        use SyntaxError::*;
        match self {
            IncompleteEscape => "the backslash is escaping nothing",
            UnclosedSingleQuote { .. } => "the single quote is not closed",
            UnclosedDoubleQuote { .. } => "the double quote is not closed",
            UnclosedParam { .. } => "the parameter expansion is not closed",
            EmptyParam => "the parameter name is missing",
            InvalidModifier => "the parameter expansion contains a malformed modifier",
            UnclosedCommandSubstitution { .. } => "the command substitution is not closed",
            UnclosedBackquote { .. } => "the backquote is not closed",
            UnclosedArith { .. } => "the arithmetic expansion is not closed",
            UnopenedSubshell => "there is no `(` matching the `)`",
            UnclosedSubshell { .. } => "the subshell is not closed",
            InvalidNewline => "the newline is not allowed here",
            UnsupportedGrouping => "brace grouping is not supported",
            MissingSeparator => "a separator is missing between the commands",
            FdOutOfRange => "the file descriptor is too large",
            MissingRedirOperand => "the redirection operator is missing its operand",
            MissingCommandBeforeBar => "a command is missing before `|`",
            MissingCommandAfterBar => "a command is missing after `|`",
            MissingCommandAfterAndOr => "a command is missing after `&&` or `||`",
            MissingCommand => "a command is missing",
            RedundantToken => "there is a redundant token",
        }
    }

    /// Returns a label for annotating the error location.
    #[must_use]
    pub fn label(&self) -> &'static str {
        use SyntaxError::*;
        match self {
            IncompleteEscape => "expected a character after the backslash",
            UnclosedSingleQuote { .. } => "expected `'`",
            UnclosedDoubleQuote { .. } => "expected `\"`",
            UnclosedParam { .. } => "expected `}`",
            EmptyParam => "expected a parameter name",
            InvalidModifier => "broken modifier",
            UnclosedCommandSubstitution { .. }
            | UnclosedSubshell { .. }
            | UnclosedArith { .. } => "expected `)`",
            UnclosedBackquote { .. } => "expected '`'",
            UnopenedSubshell => "unmatched `)`",
            InvalidNewline => "unquoted newline",
            UnsupportedGrouping => "grouping braces cannot be used here",
            MissingSeparator => "expected `;`, `&`, `|` or end of input",
            FdOutOfRange => "unusable file descriptor",
            MissingRedirOperand => "expected a word",
            MissingCommandBeforeBar | MissingCommandAfterBar | MissingCommandAfterAndOr
            | MissingCommand => "expected a command",
            RedundantToken => "unexpected token",
        }
    }

    /// Returns the location of the opening construct the error complains
    /// about, if any.
    #[must_use]
    pub fn opening_location(&self) -> Option<&Location> {
        use SyntaxError::*;
        match self {
            UnclosedSingleQuote { opening_location }
            | UnclosedDoubleQuote { opening_location }
            | UnclosedParam { opening_location }
            | UnclosedCommandSubstitution { opening_location }
            | UnclosedBackquote { opening_location }
            | UnclosedArith { opening_location }
            | UnclosedSubshell { opening_location } => Some(opening_location),
            _ => None,
        }
    }
}

/// Explanation of a failure in parsing
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{cause}")]
pub struct Error {
    /// Cause of the error
    pub cause: SyntaxError,
    /// Position of the error in the source code
    pub location: Location,
}

/// Converts an error into a printable diagnostic message.
impl<'a> From<&'a Error> for Message<'a> {
    fn from(error: &'a Error) -> Self {
        let mut annotations = vec![Annotation::new(
            AnnotationType::Error,
            error.cause.label().into(),
            &error.location,
        )];
        if let Some(opening_location) = error.cause.opening_location() {
            annotations.push(Annotation::new(
                AnnotationType::Info,
                "the construct started here".into(),
                opening_location,
            ));
        }
        Message {
            r#type: AnnotationType::Error,
            title: error.cause.message().into(),
            annotations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_uses_message() {
        let error = Error {
            cause: SyntaxError::EmptyParam,
            location: Location::dummy("${}"),
        };
        assert_eq!(error.to_string(), "the parameter name is missing");
    }

    #[test]
    fn message_includes_opening_location() {
        let error = Error {
            cause: SyntaxError::UnclosedSingleQuote {
                opening_location: Location::dummy("'"),
            },
            location: Location::dummy("'abc"),
        };
        let message = Message::from(&error);
        assert_eq!(message.annotations.len(), 2);
        assert_eq!(message.title, "the single quote is not closed");
    }
}
