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

//! Parsing of braced parameter expansions

use super::core::Parser;
use super::error::{Error, SyntaxError};
use super::word::WordContext;
use crate::syntax::{
    Modifier, ParamExpansion, Subst, SubstVariant, Switch, SwitchType, Trim, TrimLength, TrimSide,
    Word,
};

/// Creates a parameter expansion that names a parameter and has no modifier.
pub(super) fn named(name: String) -> ParamExpansion {
    ParamExpansion {
        name: Some(name),
        nested: None,
        colon: false,
        length: false,
        modifier: Modifier::None,
    }
}

impl Parser {
    /// Parses a braced parameter expansion after the opening `${`.
    ///
    /// `start` is the byte position of the `$`.
    pub(super) fn braced_param(&mut self, start: usize) -> Result<ParamExpansion, Error> {
        // `${#x}` is the length of `$x`, but `${#}` names the parameter `#`.
        let mut length = false;
        if self.peek() == Some('#') && !matches!(self.peek_at(1), Some('}') | None) {
            self.next_char();
            length = true;
        }

        let mut name = None;
        let mut nested = None;
        match self.peek() {
            Some('$') => {
                let nested_start = self.byte_pos();
                let mut units = Vec::new();
                self.dollar_unit(&mut units)?;
                let location = self.location_from(nested_start);
                nested = Some(Box::new(Word { units, location }));
            }
            _ => name = Some(self.param_name()?),
        }

        let mut colon = false;
        let modifier = match self.peek() {
            Some('}') | None => Modifier::None,
            Some(':') => {
                self.next_char();
                match self.peek() {
                    Some('/') => {
                        self.next_char();
                        Modifier::Subst(self.subst(SubstVariant::Whole)?)
                    }
                    Some(t @ ('-' | '=' | '?' | '+')) => {
                        self.next_char();
                        colon = true;
                        Modifier::Switch(self.switch(t)?)
                    }
                    _ => return Err(self.error_here(SyntaxError::InvalidModifier)),
                }
            }
            Some(t @ ('-' | '=' | '?' | '+')) => {
                self.next_char();
                Modifier::Switch(self.switch(t)?)
            }
            Some(side @ ('#' | '%')) => {
                self.next_char();
                let length = if self.peek() == Some(side) {
                    self.next_char();
                    TrimLength::Longest
                } else {
                    TrimLength::Shortest
                };
                let side = match side {
                    '#' => TrimSide::Prefix,
                    _ => TrimSide::Suffix,
                };
                let pattern = self.modifier_word(WordContext::BracedModifier)?;
                Modifier::Trim(Trim {
                    side,
                    length,
                    pattern,
                })
            }
            Some('/') => {
                self.next_char();
                let variant = match self.peek() {
                    Some('/') => {
                        self.next_char();
                        SubstVariant::All
                    }
                    Some('#') => {
                        self.next_char();
                        SubstVariant::Prefix
                    }
                    Some('%') => {
                        self.next_char();
                        SubstVariant::Suffix
                    }
                    _ => SubstVariant::First,
                };
                Modifier::Subst(self.subst(variant)?)
            }
            Some(_) => return Err(self.error_here(SyntaxError::InvalidModifier)),
        };

        if self.peek() != Some('}') {
            let opening_location = self.location_from(start);
            return Err(self.error_here(SyntaxError::UnclosedParam { opening_location }));
        }
        self.next_char();

        Ok(ParamExpansion {
            name,
            nested,
            colon,
            length,
            modifier,
        })
    }

    /// Parses a parameter name inside `${...}`.
    fn param_name(&mut self) -> Result<String, Error> {
        match self.peek() {
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
                Ok(name)
            }
            Some(c) if c.is_ascii_digit() => {
                let mut name = String::new();
                while let Some(c) = self.peek() {
                    if c.is_ascii_digit() {
                        name.push(c);
                        self.next_char();
                    } else {
                        break;
                    }
                }
                Ok(name)
            }
            Some(c @ ('@' | '*' | '#' | '?' | '-' | '$' | '!')) => {
                self.next_char();
                Ok(c.to_string())
            }
            _ => Err(self.error_here(SyntaxError::EmptyParam)),
        }
    }

    /// Parses the word of a modifier, returning `None` for an empty word.
    fn modifier_word(&mut self, context: WordContext) -> Result<Option<Word>, Error> {
        let word = self.word_in(context)?;
        Ok((!word.units.is_empty()).then_some(word))
    }

    fn switch(&mut self, r#type: char) -> Result<Switch, Error> {
        let r#type = match r#type {
            '+' => SwitchType::Alter,
            '-' => SwitchType::Default,
            '=' => SwitchType::Assign,
            _ => SwitchType::Error,
        };
        let word = self.modifier_word(WordContext::BracedModifier)?;
        Ok(Switch { r#type, word })
    }

    fn subst(&mut self, variant: SubstVariant) -> Result<Subst, Error> {
        let pattern = self.modifier_word(WordContext::SubstPattern)?;
        let replacement = if self.peek() == Some('/') {
            self.next_char();
            self.modifier_word(WordContext::BracedModifier)?
        } else {
            None
        };
        Ok(Subst {
            variant,
            pattern,
            replacement,
        })
    }
}
