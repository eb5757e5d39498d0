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

//! Parameter expansion trim semantics
//!
//! The `#`, `##`, `%` and `%%` modifiers remove a matching prefix or suffix
//! from each element of the value. Prefix trims anchor the pattern at the
//! start and take the shortest or longest match directly. Suffix trims probe
//! every tail of the value: the longest variant scans from the left so the
//! first whole-tail match removes the most, the shortest variant scans from
//! the right.

use crate::expansion::{Env, Error};
use conch_fnmatch::{Mode, Pattern};
use conch_syntax::syntax::{Trim, TrimLength, TrimSide};

/// Applies the trim modifier to each value.
pub fn apply(env: &mut Env, trim: &Trim, values: &mut [String]) -> Result<(), Error> {
    let mut pattern = super::expand_pattern(env, &trim.pattern)?;
    super::apply_escapes(&mut pattern);
    let config = super::pattern_config(env);
    let Ok(pattern) = Pattern::parse_with_config(super::to_pattern_chars(&pattern), config)
    else {
        // A broken pattern matches nothing.
        return Ok(());
    };
    let min = pattern.shortest_match_length();

    for value in values {
        match (trim.side, trim.length) {
            (TrimSide::Prefix, length) => {
                let mode = match length {
                    TrimLength::Shortest => Mode::Shortest,
                    TrimLength::Longest => Mode::Longest,
                };
                if let Some(n) = pattern.match_length(value, mode) {
                    *value = value.chars().skip(n).collect();
                }
            }

            (TrimSide::Suffix, TrimLength::Longest) => {
                let chars: Vec<char> = value.chars().collect();
                for index in 0..=chars.len().saturating_sub(min) {
                    if pattern.match_length_chars(&chars[index..], Mode::Whole).is_some() {
                        *value = chars[..index].iter().collect();
                        break;
                    }
                }
            }

            (TrimSide::Suffix, TrimLength::Shortest) => {
                let chars: Vec<char> = value.chars().collect();
                if chars.len() < min {
                    continue;
                }
                for index in (0..=chars.len() - min).rev() {
                    if pattern.match_length_chars(&chars[index..], Mode::Whole).is_some() {
                        *value = chars[..index].iter().collect();
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}
