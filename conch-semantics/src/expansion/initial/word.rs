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

//! Initial expansion of words
//!
//! [`expand_word_units`] drives the per-word expansion: it walks the word's
//! units with a quoting state machine that persists across units (a double
//! quote opened in one literal unit may be closed in a later one), triggers
//! tilde expansion, delegates parameter and command-substitution units, and
//! assembles the produced fields.
//!
//! A word usually expands to one field, but a parameter expansion may
//! produce any number of fields (`"$@"`), each of which but the first closes
//! the field being assembled. Whether a trailing empty field is emitted at
//! all is governed by two flags mirroring the quoting state: `force` is set
//! once a quote appears anywhere in the word, so that `""` yields an empty
//! argument; `suppress` is set when a parameter expansion produces no field,
//! so that an unquoted expansion of an empty variable makes the whole word
//! vanish. When both are set and nothing else was produced, `suppress`
//! wins.

use super::super::attr::{AttrChar, Origin};
use super::super::{Env, Error, ErrorCause, TildeMode};
use super::{command_subst, param, tilde};
use conch_syntax::syntax::{Word, WordUnit};

/// Characters that remain escapable by a backslash inside double quotes
const ESCAPABLE_IN_DOUBLE_QUOTES: [char; 4] = ['$', '`', '"', '\\'];

/// Performs the initial expansion of one word.
///
/// Returns the produced fields as attributed character strings. The result
/// may be empty when the word expands to nothing at all.
pub fn expand_word_units(
    env: &mut Env,
    word: &Word,
    tilde: TildeMode,
) -> Result<Vec<Vec<AttrChar>>, Error> {
    let mut fields = Vec::new();
    let mut buf: Vec<AttrChar> = Vec::new();
    let mut in_double_quote = false;
    let mut force = false;
    let mut suppress = false;

    for (index, unit) in word.units.iter().enumerate() {
        let has_next_unit = index + 1 < word.units.len();
        match unit {
            WordUnit::Literal(text) => expand_literal(
                env,
                text,
                index == 0,
                has_next_unit,
                tilde,
                &mut in_double_quote,
                &mut force,
                &mut buf,
            ),

            WordUnit::Param(p) => {
                let result = param::expand(env, p, in_double_quote, tilde, &word.location)?;
                let mut result = result.into_iter();
                match result.next() {
                    None => suppress = true,
                    Some(first) => {
                        force = true;
                        buf.extend(first);
                        for next in result {
                            fields.push(std::mem::replace(&mut buf, next));
                        }
                    }
                }
            }

            WordUnit::CommandSubst(command) => {
                let output = command_subst::expand(env, command, &word.location)?;
                buf.extend(output.chars().map(|c| AttrChar {
                    value: c,
                    origin: Origin::SoftExpansion,
                    is_quoted: in_double_quote,
                    is_quoting: false,
                }));
            }

            WordUnit::Arith(_) => {
                return Err(Error {
                    cause: ErrorCause::ArithmeticNotImplemented,
                    location: word.location.clone(),
                });
            }
        }
    }

    let has_content = buf.iter().any(|c| !c.is_quoting);
    if has_content || (fields.is_empty() && force && !suppress && !buf.is_empty()) {
        fields.push(buf);
    }
    Ok(fields)
}

/// Expands one literal unit, interpreting quote characters.
#[allow(clippy::too_many_arguments)]
fn expand_literal(
    env: &mut Env,
    text: &str,
    is_first_unit: bool,
    has_next_unit: bool,
    tilde: TildeMode,
    in_double_quote: &mut bool,
    force: &mut bool,
    buf: &mut Vec<AttrChar>,
) {
    let literal = |value, is_quoted| AttrChar {
        value,
        origin: Origin::Literal,
        is_quoted,
        is_quoting: false,
    };
    let quoting = |value, is_quoted| AttrChar {
        value,
        origin: Origin::Literal,
        is_quoted,
        is_quoting: true,
    };

    let chars: Vec<char> = text.chars().collect();
    let mut index = 0;

    if is_first_unit && tilde != TildeMode::None {
        index += tilde::expand(env, &chars, 0, has_next_unit, tilde, buf);
    }

    while index < chars.len() {
        let c = chars[index];
        match c {
            '"' => {
                *force = true;
                *in_double_quote = !*in_double_quote;
                buf.push(quoting('"', false));
            }

            '\'' if !*in_double_quote => {
                *force = true;
                buf.push(quoting('\'', false));
                index += 1;
                while index < chars.len() && chars[index] != '\'' {
                    buf.push(literal(chars[index], true));
                    index += 1;
                }
                if index < chars.len() {
                    buf.push(quoting('\'', false));
                }
            }

            '\\' => {
                let next = chars.get(index + 1).copied();
                if *in_double_quote
                    && !next.is_some_and(|n| ESCAPABLE_IN_DOUBLE_QUOTES.contains(&n))
                {
                    // Inside double quotes, a backslash before other
                    // characters is an ordinary character.
                    buf.push(literal('\\', true));
                } else {
                    buf.push(quoting('\\', *in_double_quote));
                    if let Some(next) = next {
                        buf.push(literal(next, true));
                        index += 1;
                    }
                }
            }

            ':' if !*in_double_quote && tilde == TildeMode::Multi => {
                buf.push(literal(':', false));
                index += 1;
                index += tilde::expand(env, &chars, index, has_next_unit, tilde, buf);
                continue;
            }

            _ => buf.push(literal(c, *in_double_quote)),
        }
        index += 1;
    }
}
