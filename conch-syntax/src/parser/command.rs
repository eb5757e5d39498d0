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

//! Parsing of commands and command lists

use super::core::Parser;
use super::error::{Error, SyntaxError};
use crate::syntax::{Command, CommandBody, Connector, List};
use std::ops::Range;

impl Parser {
    /// Parses a whole input line.
    pub fn line(&mut self) -> Result<List, Error> {
        let list = self.command_list()?;
        match self.peek() {
            None => Ok(list),
            Some(')') => Err(self.error_here(SyntaxError::UnopenedSubshell)),
            // `command_list` only stops at the end of input or at `)`.
            Some(_) => Err(self.error_here(SyntaxError::MissingSeparator)),
        }
    }

    /// Parses a sequence of commands joined by connectors.
    ///
    /// Parsing stops at the end of the input, at an unconsumed `)`, or at a
    /// comment. Inside a parenthesized context, newlines separate commands;
    /// outside, a newline is an error.
    pub(super) fn command_list(&mut self) -> Result<List, Error> {
        if self.nesting > 0 {
            self.skip_separator_newlines();
        }

        let mut entries = vec![self.command()?];
        loop {
            let Some(c) = self.peek() else { break };
            let connector = match c {
                ')' => break,
                '#' => {
                    self.skip_comment();
                    break;
                }
                '\n' if self.nesting > 0 => {
                    self.skip_separator_newlines();
                    Connector::Sequence
                }
                '\n' => return Err(self.error_here(SyntaxError::InvalidNewline)),
                ';' => {
                    self.next_char();
                    Connector::Sequence
                }
                '&' => {
                    self.next_char();
                    if self.peek() == Some('&') {
                        self.next_char();
                        Connector::And
                    } else {
                        Connector::Background
                    }
                }
                '|' => {
                    self.next_char();
                    if self.peek() == Some('|') {
                        self.next_char();
                        Connector::Or
                    } else {
                        Connector::Pipe
                    }
                }
                // The command before us ended at a character that does not
                // continue the list, e.g. `foo(bar` or `(a){`.
                _ => return Err(self.error_here(SyntaxError::MissingSeparator)),
            };
            if let Some((command, _)) = entries.last_mut() {
                command.connector = connector;
            }
            entries.push(self.command()?);
        }

        validate(self, &entries)?;

        let mut commands: Vec<Command> = entries.into_iter().map(|(c, _)| c).collect();
        commands.retain(|c| !c.is_empty());
        Ok(List(commands))
    }

    /// Skips newlines and blanks acting as a single command separator.
    fn skip_separator_newlines(&mut self) {
        loop {
            self.skip_blanks();
            if self.peek() == Some('\n') {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Parses a single command: a simple command or a subshell group.
    ///
    /// The command may be empty, which [`validate`] rejects except in the
    /// positions the grammar allows.
    fn command(&mut self) -> Result<(Command, Range<usize>), Error> {
        self.skip_blanks();
        let start = self.byte_pos();

        if self.peek() == Some('(') {
            return self.subshell(start);
        }

        let mut words = Vec::new();
        let mut redirs = Vec::new();
        loop {
            self.skip_blanks();
            if self.at_redirection() {
                redirs.push(self.redirection()?);
                continue;
            }
            match self.peek() {
                None | Some(';' | '&' | '|' | '(' | ')' | '#' | '\n') => break,
                Some(_) => {
                    let word_start = self.byte_pos();
                    let word = self.word()?;
                    debug_assert!(!word.units.is_empty());
                    // Brace grouping is not part of the supported grammar.
                    if words.is_empty() && matches!(self.source(word_start, self.byte_pos()), "{" | "}")
                    {
                        return Err(Error {
                            cause: SyntaxError::UnsupportedGrouping,
                            location: self.location_from(word_start),
                        });
                    }
                    words.push(word);
                }
            }
        }

        let end = self.byte_pos();
        let source_text = self.source(start, end).trim_end().to_string();
        let command = Command {
            connector: Connector::Sequence,
            body: CommandBody::Simple { words },
            redirs,
            source_text,
        };
        Ok((command, start..end))
    }

    /// Parses a subshell group and its trailing redirections.
    fn subshell(&mut self, start: usize) -> Result<(Command, Range<usize>), Error> {
        debug_assert_eq!(self.peek(), Some('('));
        self.next_char();
        self.nesting += 1;
        let body = self.command_list()?;
        if self.peek() != Some(')') {
            let opening_location = self.location_from(start);
            return Err(self.error_here(SyntaxError::UnclosedSubshell { opening_location }));
        }
        self.next_char();
        self.nesting -= 1;

        let mut redirs = Vec::new();
        loop {
            self.skip_blanks();
            if self.at_redirection() {
                redirs.push(self.redirection()?);
            } else {
                break;
            }
        }

        let end = self.byte_pos();
        let source_text = self.source(start, end).trim_end().to_string();
        let command = Command {
            connector: Connector::Sequence,
            body: CommandBody::Subshell { body },
            redirs,
            source_text,
        };
        Ok((command, start..end))
    }
}

/// Verifies where empty commands appeared in the parsed list.
///
/// The rules are:
///
/// - A pipe connector is never attached to, nor followed by, an empty
///   command.
/// - `&&` and `||` are never followed by an empty command.
/// - A leading empty command in a multi-command line is an error.
/// - A final empty command is accepted only as the residue of a trailing `;`
///   or `&` after a non-empty command.
fn validate(parser: &Parser, entries: &[(Command, Range<usize>)]) -> Result<(), Error> {
    let len = entries.len();
    for (i, (command, range)) in entries.iter().enumerate() {
        if !command.is_empty() {
            continue;
        }
        let error = |cause| {
            Err(Error {
                cause,
                location: parser.location_of(range.clone()),
            })
        };

        if i == 0 {
            if len >= 2 {
                return error(SyntaxError::MissingCommand);
            }
            // A lone empty line parses to an empty list.
            continue;
        }
        if command.connector == Connector::Pipe {
            return error(SyntaxError::MissingCommandBeforeBar);
        }

        let (previous, _) = &entries[i - 1];
        match previous.connector {
            Connector::Pipe => return error(SyntaxError::MissingCommandAfterBar),
            Connector::And | Connector::Or => {
                return error(SyntaxError::MissingCommandAfterAndOr);
            }
            Connector::Sequence | Connector::Background => {
                if i + 1 != len || previous.is_empty() {
                    return error(SyntaxError::MissingCommand);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parse(s: &str) -> List {
        s.parse().unwrap()
    }

    fn parse_err(s: &str) -> SyntaxError {
        s.parse::<List>().unwrap_err().cause
    }

    #[test]
    fn single_simple_command() {
        let list = parse("echo foo  bar");
        assert_eq!(list.0.len(), 1);
        let command = &list.0[0];
        assert_eq!(command.connector, Connector::Sequence);
        assert_eq!(command.source_text, "echo foo  bar");
        assert_matches!(&command.body, CommandBody::Simple { words } => {
            assert_eq!(words.len(), 3);
        });
    }

    #[test]
    fn connectors() {
        let list = parse("a; b & c | d && e || f");
        let connectors: Vec<_> = list.0.iter().map(|c| c.connector).collect();
        assert_eq!(
            connectors,
            [
                Connector::Sequence,
                Connector::Background,
                Connector::Pipe,
                Connector::And,
                Connector::Or,
                Connector::Sequence,
            ]
        );
    }

    #[test]
    fn source_text_excludes_connectors() {
        let list = parse("a b ; c");
        assert_eq!(list.0[0].source_text, "a b");
        assert_eq!(list.0[1].source_text, "c");
    }

    #[test]
    fn trailing_semicolon_and_ampersand() {
        let list = parse("a ;");
        assert_eq!(list.0.len(), 1);
        assert_eq!(list.0[0].connector, Connector::Sequence);

        let list = parse("a &");
        assert_eq!(list.0.len(), 1);
        assert_eq!(list.0[0].connector, Connector::Background);
    }

    #[test]
    fn empty_line_parses_to_empty_list() {
        assert_eq!(parse("").0.len(), 0);
        assert_eq!(parse("   ").0.len(), 0);
        assert_eq!(parse("# just a comment").0.len(), 0);
    }

    #[test]
    fn comment_ends_the_line() {
        let list = parse("echo a # echo b");
        assert_eq!(list.0.len(), 1);
        assert_eq!(list.0[0].source_text, "echo a");
    }

    #[test]
    fn subshell_group() {
        let list = parse("(a; b) >out");
        assert_eq!(list.0.len(), 1);
        assert_matches!(&list.0[0].body, CommandBody::Subshell { body } => {
            assert_eq!(body.0.len(), 2);
        });
        assert_eq!(list.0[0].redirs.len(), 1);
        assert_eq!(list.0[0].source_text, "(a; b) >out");
    }

    #[test]
    fn newlines_allowed_in_parenthesized_contexts() {
        let list = parse("(a\nb)");
        assert_matches!(&list.0[0].body, CommandBody::Subshell { body } => {
            assert_eq!(body.0.len(), 2);
        });

        let list = parse("(\na\n\nb\n)");
        assert_matches!(&list.0[0].body, CommandBody::Subshell { body } => {
            assert_eq!(body.0.len(), 2);
        });

        let list = parse("echo $(a\nb)");
        assert_eq!(list.0.len(), 1);
    }

    #[test]
    fn newline_outside_parentheses_is_an_error() {
        assert_eq!(parse_err("a\nb"), SyntaxError::InvalidNewline);
    }

    #[test]
    fn stray_close_paren_is_an_error() {
        assert_eq!(parse_err("a)"), SyntaxError::UnopenedSubshell);
    }

    #[test]
    fn unclosed_subshell_is_an_error() {
        assert_matches!(parse_err("(a"), SyntaxError::UnclosedSubshell { .. });
    }

    #[test]
    fn missing_separator_after_subshell() {
        assert_eq!(parse_err("(a)b"), SyntaxError::MissingSeparator);
        assert_eq!(parse_err("foo(bar)"), SyntaxError::MissingSeparator);
    }

    #[test]
    fn empty_command_acceptance() {
        // Leading empty commands
        assert_eq!(parse_err("; a"), SyntaxError::MissingCommand);
        assert_eq!(parse_err("&"), SyntaxError::MissingCommand);
        assert_eq!(parse_err("| a"), SyntaxError::MissingCommand);

        // Pipes require commands on both sides
        assert_eq!(parse_err("a |"), SyntaxError::MissingCommandAfterBar);
        assert_eq!(parse_err("a | ; b"), SyntaxError::MissingCommandAfterBar);
        assert_eq!(parse_err("a | | b"), SyntaxError::MissingCommandBeforeBar);

        // And-or lists require a following command
        assert_eq!(parse_err("a &&"), SyntaxError::MissingCommandAfterAndOr);
        assert_eq!(parse_err("a || ; b"), SyntaxError::MissingCommandAfterAndOr);

        // Sequential separators require non-empty commands in the middle
        assert_eq!(parse_err("a ; ; b"), SyntaxError::MissingCommand);
        assert_eq!(parse_err("a ; ;"), SyntaxError::MissingCommand);
        assert_eq!(parse_err("a & ; b"), SyntaxError::MissingCommand);
    }

    #[test]
    fn brace_grouping_is_rejected() {
        assert_eq!(parse_err("{ a; }"), SyntaxError::UnsupportedGrouping);
        assert_eq!(parse_err("a ; }"), SyntaxError::UnsupportedGrouping);
        // Braces inside a word are ordinary characters.
        assert_eq!(parse("echo {a,b}").0.len(), 1);
        assert_eq!(parse("echo {}").0.len(), 1);
    }

    #[test]
    fn redirection_only_command_is_not_empty() {
        let list = parse(">out ; b");
        assert_eq!(list.0.len(), 2);
        assert_eq!(list.0[0].redirs.len(), 1);
    }
}
