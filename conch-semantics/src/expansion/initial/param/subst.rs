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

//! Parameter expansion substitution semantics
//!
//! The `/` family of modifiers replaces matching portions of each element of
//! the value. The anchored variants replace a whole-value, prefix or suffix
//! match; the unanchored variants replace the leftmost longest match, once or
//! repeatedly. A zero-length match never consumes input: the scan copies one
//! character and moves on, so an empty pattern cannot loop.

use crate::expansion::{Env, Error, TildeMode, expand_single};
use conch_fnmatch::{Mode, Pattern};
use conch_syntax::syntax::{Subst, SubstVariant};

/// Applies the substitution modifier to each value.
pub fn apply(env: &mut Env, subst: &Subst, values: &mut [String]) -> Result<(), Error> {
    let mut pattern = super::expand_pattern(env, &subst.pattern)?;
    super::apply_escapes(&mut pattern);
    let replacement = match &subst.replacement {
        None => String::new(),
        Some(word) => expand_single(env, word, TildeMode::Single)?.value,
    };
    let config = super::pattern_config(env);
    let Ok(pattern) = Pattern::parse_with_config(super::to_pattern_chars(&pattern), config)
    else {
        // A broken pattern matches nothing.
        return Ok(());
    };
    let min = pattern.shortest_match_length();

    for value in values {
        let chars: Vec<char> = value.chars().collect();
        match subst.variant {
            SubstVariant::Whole => {
                if pattern.match_length_chars(&chars, Mode::Whole).is_some() {
                    *value = replacement.clone();
                }
            }

            SubstVariant::Prefix => {
                if let Some(n) = pattern.match_length_chars(&chars, Mode::Longest) {
                    let mut result = replacement.clone();
                    result.extend(&chars[n..]);
                    *value = result;
                }
            }

            SubstVariant::Suffix => {
                for index in 0..=chars.len().saturating_sub(min) {
                    if pattern.match_length_chars(&chars[index..], Mode::Whole).is_some() {
                        let mut result: String = chars[..index].iter().collect();
                        result.push_str(&replacement);
                        *value = result;
                        break;
                    }
                }
            }

            SubstVariant::First => *value = scan(&chars, &pattern, &replacement, false),
            SubstVariant::All => *value = scan(&chars, &pattern, &replacement, true),
        }
    }
    Ok(())
}

/// Replaces the leftmost longest match, repeatedly if `all`.
fn scan(chars: &[char], pattern: &Pattern, replacement: &str, all: bool) -> String {
    let mut result = String::new();
    let mut index = 0;
    while index < chars.len() {
        match pattern.match_length_chars(&chars[index..], Mode::Longest) {
            Some(n) if n > 0 => {
                result.push_str(replacement);
                index += n;
                if !all {
                    result.extend(&chars[index..]);
                    return result;
                }
            }
            _ => {
                result.push(chars[index]);
                index += 1;
            }
        }
    }
    result
}
