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

//! Parsing of redirections

use super::core::Parser;
use super::error::{Error, SyntaxError};
use crate::syntax::{Fd, Redir, RedirBody, RedirOp};

impl Parser {
    /// Whether the cursor is at the start of a redirection
    ///
    /// A redirection starts with `<` or `>`, optionally preceded by a run of
    /// digits that is immediately adjacent to the operator. Digits separated
    /// from the operator are an ordinary word, which the word parser has
    /// already consumed when we get here mid-command.
    pub(super) fn at_redirection(&self) -> bool {
        let mut ahead = 0;
        while self.peek_at(ahead).is_some_and(|c| c.is_ascii_digit()) {
            ahead += 1;
        }
        matches!(self.peek_at(ahead), Some('<' | '>'))
    }

    /// Parses one redirection.
    pub(super) fn redirection(&mut self) -> Result<Redir, Error> {
        let start = self.byte_pos();

        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.next_char();
        }
        let fd = if digits.is_empty() {
            None
        } else {
            match digits.parse::<i32>() {
                Ok(fd) => Some(Fd(fd)),
                Err(_) => {
                    return Err(Error {
                        cause: SyntaxError::FdOutOfRange,
                        location: self.location_from(start),
                    });
                }
            }
        };

        use RedirOp::*;
        let operator = match self.next_char() {
            Some('<') => match self.peek() {
                Some('>') => {
                    self.next_char();
                    FileInOut
                }
                Some('&') => {
                    self.next_char();
                    FdIn
                }
                _ => FileIn,
            },
            Some('>') => match self.peek() {
                Some('>') => {
                    self.next_char();
                    FileAppend
                }
                Some('|') => {
                    self.next_char();
                    FileClobber
                }
                Some('&') => {
                    self.next_char();
                    FdOut
                }
                _ => FileOut,
            },
            _ => return Err(self.error_here(SyntaxError::MissingRedirOperand)),
        };

        if matches!(operator, FdIn | FdOut) && self.peek() == Some('-') {
            self.next_char();
            return Ok(Redir {
                fd,
                body: RedirBody::Close { operator },
            });
        }

        self.skip_blanks();
        let operand = self.word()?;
        if operand.units.is_empty() {
            return Err(self.error_here(SyntaxError::MissingRedirOperand));
        }
        Ok(Redir {
            fd,
            body: RedirBody::Normal { operator, operand },
        })
    }
}
