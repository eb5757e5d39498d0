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

//! Word parsing
//!
//! A word is scanned as a maximal run of non-metacharacter input with
//! quoting recognized. Quote characters are not interpreted here; they are
//! kept verbatim in [`WordUnit::Literal`] fragments for the word expansion to
//! process. Only the `$`-forms and backquotes produce structured units.

use super::core::Parser;
use super::error::{Error, SyntaxError};
use crate::syntax::{Word, WordUnit};

/// Delimiting rule for a word being scanned
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum WordContext {
    /// Command word, ending at a blank or operator character
    Normal,
    /// Word in a `${...}` modifier, ending at the matching unquoted `}`
    BracedModifier,
    /// Pattern in a `${.../...}` substitution, ending at an unquoted `/` or
    /// the matching `}`
    SubstPattern,
}

impl Parser {
    /// Parses a word in the normal command context.
    pub fn word(&mut self) -> Result<Word, Error> {
        self.word_in(WordContext::Normal)
    }

    /// Parses a word, stopping according to the given context.
    ///
    /// The returned word may have no units if the input starts with a
    /// delimiter.
    pub fn word_in(&mut self, context: WordContext) -> Result<Word, Error> {
        fn flush(units: &mut Vec<WordUnit>, literal: &mut String) {
            if !literal.is_empty() {
                units.push(WordUnit::Literal(std::mem::take(literal)));
            }
        }

        let start = self.byte_pos();
        let mut units = Vec::new();
        let mut literal = String::new();
        let mut in_double_quote: Option<usize> = None;
        let mut brace_depth: usize = 0;

        loop {
            let Some(c) = self.peek() else {
                if let Some(opening) = in_double_quote {
                    let opening_location = self.location_from(opening);
                    return Err(self.error_here(SyntaxError::UnclosedDoubleQuote {
                        opening_location,
                    }));
                }
                break;
            };

            if in_double_quote.is_none() {
                match (context, c) {
                    (WordContext::Normal, ' ' | '\t' | '\n') => break,
                    (WordContext::Normal, ';' | '&' | '|' | '(' | ')' | '<' | '>' | '#') => break,
                    (WordContext::SubstPattern | WordContext::BracedModifier, '}') => {
                        if brace_depth == 0 {
                            break;
                        }
                        brace_depth -= 1;
                        literal.push(c);
                        self.next_char();
                        continue;
                    }
                    (WordContext::SubstPattern, '/') if brace_depth == 0 => break,
                    (WordContext::SubstPattern | WordContext::BracedModifier, '{') => {
                        brace_depth += 1;
                        literal.push(c);
                        self.next_char();
                        continue;
                    }
                    _ => (),
                }
            }

            match c {
                '\'' if in_double_quote.is_none() => {
                    let opening = self.byte_pos();
                    literal.push(c);
                    self.next_char();
                    loop {
                        match self.next_char() {
                            None => {
                                let opening_location = self.location_from(opening);
                                return Err(self.error_here(SyntaxError::UnclosedSingleQuote {
                                    opening_location,
                                }));
                            }
                            Some('\'') => {
                                literal.push('\'');
                                break;
                            }
                            Some(c) => literal.push(c),
                        }
                    }
                }

                '"' => {
                    in_double_quote = match in_double_quote {
                        None => Some(self.byte_pos()),
                        Some(_) => None,
                    };
                    literal.push(c);
                    self.next_char();
                }

                '\\' => {
                    self.next_char();
                    match self.next_char() {
                        None => return Err(self.error_here(SyntaxError::IncompleteEscape)),
                        Some(escaped) => {
                            literal.push('\\');
                            literal.push(escaped);
                        }
                    }
                }

                '$' => {
                    if self.dollar_starts_expansion() {
                        flush(&mut units, &mut literal);
                        self.dollar_unit(&mut units)?;
                    } else {
                        literal.push('$');
                        self.next_char();
                    }
                }

                '`' => {
                    flush(&mut units, &mut literal);
                    units.push(self.backquote_unit()?);
                }

                _ => {
                    literal.push(c);
                    self.next_char();
                }
            }
        }

        flush(&mut units, &mut literal);
        let location = self.location_from(start);
        Ok(Word { units, location })
    }

    /// Whether the `$` at the cursor starts an expansion rather than being a
    /// literal dollar
    fn dollar_starts_expansion(&self) -> bool {
        match self.peek_at(1) {
            Some('(' | '{' | '_' | '@' | '*' | '#' | '?' | '-' | '$' | '!') => true,
            Some(c) => c.is_ascii_alphanumeric(),
            None => false,
        }
    }

    /// Parses a `$`-form: a parameter expansion, command substitution or
    /// arithmetic expansion.
    ///
    /// A dollar followed by nothing special produces a literal dollar unit.
    pub(super) fn dollar_unit(&mut self, units: &mut Vec<WordUnit>) -> Result<(), Error> {
        let start = self.byte_pos();
        self.next_char(); // $
        match self.peek() {
            Some('(') => {
                self.next_char();
                if self.peek() == Some('(') {
                    self.next_char();
                    units.push(self.arith_unit(start)?);
                } else {
                    self.nesting += 1;
                    let body = self.command_list()?;
                    if self.peek() != Some(')') {
                        let opening_location = self.location_from(start);
                        return Err(self.error_here(SyntaxError::UnclosedCommandSubstitution {
                            opening_location,
                        }));
                    }
                    self.next_char();
                    self.nesting -= 1;
                    units.push(WordUnit::CommandSubst(body));
                }
            }
            Some('{') => {
                self.next_char();
                units.push(WordUnit::Param(self.braced_param(start)?));
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(c) = self.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        name.push(c);
                        self.next_char();
                    } else {
                        break;
                    }
                }
                units.push(WordUnit::Param(super::param::named(name)));
            }
            Some(c) if c.is_ascii_digit() => {
                // An unbraced positional parameter is a single digit.
                self.next_char();
                units.push(WordUnit::Param(super::param::named(c.to_string())));
            }
            Some(c @ ('@' | '*' | '#' | '?' | '-' | '$' | '!')) => {
                self.next_char();
                units.push(WordUnit::Param(super::param::named(c.to_string())));
            }
            _ => units.push(WordUnit::Literal("$".to_string())),
        }
        Ok(())
    }

    /// Parses an arithmetic expansion after the opening `$((`.
    ///
    /// The expression is kept as raw text; it is not evaluated.
    fn arith_unit(&mut self, start: usize) -> Result<WordUnit, Error> {
        let mut depth: usize = 0;
        let mut content = String::new();
        loop {
            match self.next_char() {
                Some('(') => {
                    depth += 1;
                    content.push('(');
                }
                Some(')') => {
                    if depth > 0 {
                        depth -= 1;
                        content.push(')');
                    } else if self.peek() == Some(')') {
                        self.next_char();
                        return Ok(WordUnit::Arith(content));
                    } else {
                        let opening_location = self.location_from(start);
                        return Err(
                            self.error_here(SyntaxError::UnclosedArith { opening_location })
                        );
                    }
                }
                Some(c) => content.push(c),
                None => {
                    let opening_location = self.location_from(start);
                    return Err(self.error_here(SyntaxError::UnclosedArith { opening_location }));
                }
            }
        }
    }

    /// Parses a backquoted command substitution.
    ///
    /// Inside backquotes, a backslash escapes `` \ ` $ ``. The collected
    /// content is parsed as a command list of its own.
    fn backquote_unit(&mut self) -> Result<WordUnit, Error> {
        let start = self.byte_pos();
        self.next_char(); // `
        let mut content = String::new();
        loop {
            match self.next_char() {
                None => {
                    let opening_location = self.location_from(start);
                    return Err(
                        self.error_here(SyntaxError::UnclosedBackquote { opening_location })
                    );
                }
                Some('`') => break,
                Some('\\') => match self.next_char() {
                    Some(c @ ('\\' | '`' | '$')) => content.push(c),
                    Some(c) => {
                        content.push('\\');
                        content.push(c);
                    }
                    None => {
                        let opening_location = self.location_from(start);
                        return Err(
                            self.error_here(SyntaxError::UnclosedBackquote { opening_location })
                        );
                    }
                },
                Some(c) => content.push(c),
            }
        }

        // The content is a command line of its own. Errors in it are
        // reported at the backquote span of the outer code.
        match super::parse_line_with_source(&content, crate::source::Source::CommandSubst) {
            Ok(list) => Ok(WordUnit::CommandSubst(list)),
            Err(inner) => Err(Error {
                cause: inner.cause,
                location: self.location_from(start),
            }),
        }
    }
}
