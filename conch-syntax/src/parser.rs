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

//! Syntax parser for the shell language
//!
//! The entry point is [`parse_line`], which turns one logical line of source
//! into a [`List`] of commands. The parser is a recursive descent over a
//! character cursor; its scanner recognizes quoting so that quoted
//! metacharacters do not delimit words, but quote characters themselves are
//! passed through into the AST verbatim for the word expansion to interpret.
//!
//! A line may contain newlines only inside quoted regions, command
//! substitutions and subshell groups. The parser reports a single
//! [`Error`] per invocation.

mod command;
mod core;
mod error;
mod param;
mod redir;
mod word;

pub use self::error::{Error, SyntaxError};

use self::core::Parser;
use crate::source::{Code, Source};
use crate::syntax::{List, Word};
use std::num::NonZeroU64;
use std::rc::Rc;

fn code_for(source_text: &str, source: Source) -> Rc<Code> {
    Rc::new(Code {
        value: source_text.to_string(),
        start_line_number: NonZeroU64::MIN,
        source,
    })
}

/// Parses one logical line of shell source into a command list.
///
/// ```
/// # use conch_syntax::parser::parse_line;
/// let list = parse_line("make -j2 && echo done").unwrap();
/// assert_eq!(list.0.len(), 2);
/// ```
pub fn parse_line(source_text: &str) -> Result<List, Error> {
    parse_line_with_source(source_text, Source::CommandString)
}

/// Like [`parse_line`], with an explicit [`Source`] tag for diagnostics.
pub(crate) fn parse_line_with_source(
    source_text: &str,
    source: Source,
) -> Result<List, Error> {
    let code = code_for(source_text, source);
    Parser::new(&code).line()
}

/// Parses a string that contains exactly one word.
///
/// This is mainly useful in tests and is what `str::parse::<Word>` calls.
pub(crate) fn parse_word(source_text: &str) -> Result<Word, Error> {
    let code = code_for(source_text, Source::Unknown);
    let mut parser = Parser::new(&code);
    let word = parser.word()?;
    if parser.peek().is_some() {
        return Err(parser.error_here(SyntaxError::RedundantToken));
    }
    Ok(word)
}
