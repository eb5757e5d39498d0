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

//! Shell command language syntax
//!
//! This module contains types that represent abstract syntax trees (ASTs) of
//! the shell language.
//!
//! The AST of one logical command line is a [`List`]: a vector of
//! [`Command`]s, each carrying the [`Connector`] that links it to the
//! following command. A command is either a simple command (a sequence of
//! [`Word`]s) or a parenthesized subshell holding a nested list, plus
//! redirections.
//!
//! A [`Word`] is a sequence of [`WordUnit`]s. A literal unit keeps the raw
//! source text, quote characters included; interpreting the quotes is the
//! word expansion's job. Parameter expansions, command substitutions and
//! arithmetic expansions are separate units.
//!
//! Most AST types implement the [`Display`](std::fmt::Display) trait, which
//! converts an AST back to (normalized) source code, and the [`FromStr`]
//! trait, so you can get an AST by calling `parse` on a `&str`:
//!
//! ```
//! # use conch_syntax::syntax::List;
//! let list: List = "diff foo bar; echo done".parse().unwrap();
//! assert_eq!(list.to_string(), "diff foo bar; echo done");
//! ```

use crate::source::Location;
use std::str::FromStr;

mod impl_display;

/// Parameter expansion [modifier](Modifier) that conditionally substitutes the
/// value being expanded
///
/// Examples of switches include `+foo`, `:-bar` and `:=baz`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Switch {
    /// How the value is substituted
    pub r#type: SwitchType,
    /// Word that substitutes the parameter value
    ///
    /// `None` when the word is empty, as in `${foo:-}`.
    pub word: Option<Word>,
}

/// Flag that specifies how the value is substituted in a [switch](Switch)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwitchType {
    /// Alter an existing value, if any. (`+`)
    Alter,
    /// Substitute a missing value with a default. (`-`)
    Default,
    /// Assign a default to the variable if the value is missing. (`=`)
    Assign,
    /// Error out if the value is missing. (`?`)
    Error,
}

/// Flag that specifies which side of the expanded value is removed in a
/// [trim](Trim)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TrimSide {
    /// Beginning of the value
    Prefix,
    /// End of the value
    Suffix,
}

/// Flag that specifies the pattern matching strategy in a [trim](Trim)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TrimLength {
    /// Match as small a number of characters as possible.
    Shortest,
    /// Match as large a number of characters as possible.
    Longest,
}

/// Parameter expansion [modifier](Modifier) that removes the beginning or end
/// of the value being expanded
///
/// Examples of trims include `#foo`, `##bar` and `%%baz*`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trim {
    /// Which side of the value is removed
    pub side: TrimSide,
    /// How long the pattern should match
    pub length: TrimLength,
    /// Pattern to be matched with the expanded value
    pub pattern: Option<Word>,
}

/// Variant of a [substitution](Subst) modifier
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubstVariant {
    /// Replace the leftmost longest match. (`/`)
    First,
    /// Replace every non-overlapping match. (`//`)
    All,
    /// Replace a match anchored at the beginning of the value. (`/#`)
    Prefix,
    /// Replace a match anchored at the end of the value. (`/%`)
    Suffix,
    /// Replace the value if the pattern matches it entirely. (`:/`)
    Whole,
}

/// Parameter expansion [modifier](Modifier) that replaces matching portions of
/// the value being expanded
///
/// Examples of substitutions include `/foo/bar` and `//x`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subst {
    /// Which matches are replaced
    pub variant: SubstVariant,
    /// Pattern to be matched with the expanded value
    pub pattern: Option<Word>,
    /// Word that replaces the matched portion
    ///
    /// `None` when the replacement is empty, as in `${foo/bar}`.
    pub replacement: Option<Word>,
}

/// Attribute that modifies a parameter expansion
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Modifier {
    /// No modifier
    None,
    /// `+`, `-`, `=` or `?` suffix, optionally with `:` (`${foo:-bar}`)
    Switch(Switch),
    /// `#`, `##`, `%` or `%%` suffix (`${foo#bar}`)
    Trim(Trim),
    /// `/` suffix (`${foo/bar/baz}`)
    Subst(Subst),
}

/// Parameter expansion
///
/// A parameter expansion names either a parameter or a nested expansion, and
/// applies an optional [modifier](Modifier) to the value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamExpansion {
    /// Name of the parameter to be expanded
    ///
    /// `None` when the node is a nested expansion.
    pub name: Option<String>,

    /// Nested word to be expanded in place of a named parameter
    /// (`${${foo}#bar}` and the like)
    pub nested: Option<Box<Word>>,

    /// Whether an empty value triggers the switch like an unset parameter
    /// (the `:` before the switch type)
    pub colon: bool,

    /// Whether each resulting element is replaced by its character count
    /// (`${#foo}`)
    pub length: bool,

    /// Modifier applied to the value
    pub modifier: Modifier,
}

/// Element of a [Word]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WordUnit {
    /// Raw source fragment, quote characters included
    ///
    /// The quotes `' " \` are interpreted by the word expansion, not by the
    /// parser.
    Literal(String),
    /// Parameter expansion (`$foo` or `${foo}`)
    Param(ParamExpansion),
    /// Command substitution (`$(...)` or `` `...` ``); the body is a parsed
    /// command list
    CommandSubst(List),
    /// Arithmetic expansion (`$((...))`); the expression is kept unevaluated
    Arith(String),
}

pub use WordUnit::*;

/// Token that may involve expansions and quotes
///
/// A word is a sequence of [word unit](WordUnit)s. A word appearing in a
/// command always has at least one unit; words in parameter expansion
/// modifiers may be represented as `None` instead of an empty word.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Word {
    /// Word units that constitute the word
    pub units: Vec<WordUnit>,
    /// Position of the word in the source code
    pub location: Location,
}

impl FromStr for Word {
    type Err = crate::parser::Error;
    fn from_str(s: &str) -> Result<Word, Self::Err> {
        crate::parser::parse_word(s)
    }
}

/// File descriptor
///
/// This is the `newtype` pattern applied to `i32`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Fd(pub i32);

impl Fd {
    /// File descriptor for the standard input
    pub const STDIN: Fd = Fd(0);
    /// File descriptor for the standard output
    pub const STDOUT: Fd = Fd(1);
    /// File descriptor for the standard error
    pub const STDERR: Fd = Fd(2);
}

/// Redirection operators
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RedirOp {
    /// `<` (open a file for input)
    FileIn,
    /// `<>` (open a file for input and output)
    FileInOut,
    /// `>` (open a file for output; truncate if existing)
    FileOut,
    /// `>>` (open a file for output; append if existing)
    FileAppend,
    /// `>|` (open a file for output; always truncate if existing)
    FileClobber,
    /// `<&` (copy a file descriptor for input)
    FdIn,
    /// `>&` (copy a file descriptor for output)
    FdOut,
}

/// Part of a redirection that defines the nature of the resulting file
/// descriptor
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RedirBody {
    /// Redirection with an operand word
    Normal {
        /// Operator
        operator: RedirOp,
        /// Operand word: a file name or, for `<&` and `>&`, a file descriptor
        operand: Word,
    },
    /// Closing a file descriptor (`<&-` and `>&-`)
    Close {
        /// Operator the `-` was attached to ([`FdIn`](RedirOp::FdIn) or
        /// [`FdOut`](RedirOp::FdOut))
        operator: RedirOp,
    },
}

/// Redirection
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redir {
    /// File descriptor that is modified by this redirection
    ///
    /// `None` means the redirection applies to the operator's default file
    /// descriptor.
    pub fd: Option<Fd>,
    /// Nature of the resulting file descriptor
    pub body: RedirBody,
}

impl Redir {
    /// Computes the file descriptor that is modified by this redirection.
    ///
    /// If `self.fd` is `Some(_)`, its value is returned intact. Otherwise, the
    /// default file descriptor is selected depending on the operator.
    #[must_use]
    pub fn fd_or_default(&self) -> Fd {
        use RedirOp::*;
        let operator = match &self.body {
            RedirBody::Normal { operator, .. } => *operator,
            RedirBody::Close { operator } => *operator,
        };
        self.fd.unwrap_or(match operator {
            FileIn | FileInOut | FdIn => Fd::STDIN,
            FileOut | FileAppend | FileClobber | FdOut => Fd::STDOUT,
        })
    }
}

/// Control connector between a command and the following one
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Connector {
    /// `;` or end of line
    Sequence,
    /// `&`
    Background,
    /// `|`
    Pipe,
    /// `&&`
    And,
    /// `||`
    Or,
}

/// Main part of a [`Command`]
///
/// Exactly one of the words and the subcommands is populated, which the enum
/// encodes structurally.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CommandBody {
    /// Simple command: command name and arguments
    Simple {
        /// Words that expand to the command name and arguments
        words: Vec<Word>,
    },
    /// Subshell group (`( list )`)
    Subshell {
        /// Commands executed in the subshell
        body: List,
    },
}

/// Element of a command [`List`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Command {
    /// Connector that links this command to the following one
    ///
    /// The final command of a line carries [`Connector::Sequence`] unless it
    /// is explicitly marked background.
    pub connector: Connector,
    /// Main part of this command
    pub body: CommandBody,
    /// Redirections
    pub redirs: Vec<Redir>,
    /// Verbatim source span of this command, for diagnostics
    pub source_text: String,
}

impl Command {
    /// Whether the command has no words, no subcommands and no redirections
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.redirs.is_empty()
            && match &self.body {
                CommandBody::Simple { words } => words.is_empty(),
                CommandBody::Subshell { .. } => false,
            }
    }
}

/// Sequence of [`Command`]s making up one logical line
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct List(pub Vec<Command>);

impl FromStr for List {
    type Err = crate::parser::Error;
    fn from_str(s: &str) -> Result<List, Self::Err> {
        crate::parser::parse_line(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redir_default_fd() {
        let operand: Word = "file".parse().unwrap();
        let redir = Redir {
            fd: None,
            body: RedirBody::Normal {
                operator: RedirOp::FileIn,
                operand: operand.clone(),
            },
        };
        assert_eq!(redir.fd_or_default(), Fd::STDIN);

        let redir = Redir {
            fd: None,
            body: RedirBody::Normal {
                operator: RedirOp::FileAppend,
                operand,
            },
        };
        assert_eq!(redir.fd_or_default(), Fd::STDOUT);

        let redir = Redir {
            fd: Some(Fd(5)),
            body: RedirBody::Close {
                operator: RedirOp::FdOut,
            },
        };
        assert_eq!(redir.fd_or_default(), Fd(5));
    }

    #[test]
    fn command_emptiness() {
        let list: List = "echo".parse().unwrap();
        assert!(!list.0[0].is_empty());

        let list: List = "(a)".parse().unwrap();
        assert!(!list.0[0].is_empty());
    }
}
