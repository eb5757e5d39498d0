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

//! Brace expansion
//!
//! Brace expansion runs on the result of the initial expansion. For each
//! unquoted literal `{`, two interpretations are tried in turn: a numeric
//! sequence `{N..M}`, then an alternation of at least two comma-separated
//! elements between matching braces. If neither applies, the `{` is ordinary
//! data and the scan continues behind it. Each produced word is expanded
//! again for further braces.
//!
//! Only [syntactic](AttrChar::is_syntactic) characters participate: a quoted
//! brace, or one produced by a parameter expansion or command substitution,
//! never starts an expansion. Digits generated by a numeric sequence are
//! marked [`HardExpansion`](Origin::HardExpansion) so they stay exempt from
//! field splitting and pattern matching, like the original braces and commas
//! would have been.

use super::attr::{AttrChar, AttrField, Origin};

/// Performs brace expansion on each field.
pub fn expand_each(fields: Vec<AttrField>) -> Vec<AttrField> {
    let mut results = Vec::new();
    for field in fields {
        expand_into(field, &mut results);
    }
    results
}

/// Performs brace expansion on one field, appending the results.
fn expand_into(field: AttrField, results: &mut Vec<AttrField>) {
    let mut from = 0;
    loop {
        let Some(open) = next_syntactic(&field.chars, from, &['{']) else {
            results.push(field);
            return;
        };
        if open + 1 >= field.chars.len() {
            // A `{` at the very end cannot open anything.
            results.push(field);
            return;
        }
        if try_sequence(&field, open, results) {
            return;
        }
        match find_alternation(&field.chars, open + 1) {
            Some((commas, close)) => {
                expand_alternation(&field, open, &commas, close, results);
                return;
            }
            // No matching `}` with a top-level comma; try the next `{`.
            None => from = open + 1,
        }
    }
}

/// Finds the next syntactic occurrence of one of the given characters.
fn next_syntactic(chars: &[AttrChar], from: usize, set: &[char]) -> Option<usize> {
    (from..chars.len()).find(|&i| chars[i].is_syntactic() && set.contains(&chars[i].value))
}

/// Scans for the alternation structure of the brace starting at `content`.
///
/// Returns the top-level comma positions and the position of the matching
/// `}`, or `None` when the brace has no matching `}` or contains no
/// top-level comma.
fn find_alternation(chars: &[AttrChar], content: usize) -> Option<(Vec<usize>, usize)> {
    let mut commas = Vec::new();
    let mut nest = 0usize;
    let mut i = content;
    while let Some(found) = next_syntactic(chars, i, &['{', ',', '}']) {
        match chars[found].value {
            '{' => nest += 1,
            ',' => {
                if nest == 0 {
                    commas.push(found);
                }
            }
            _ => {
                if nest > 0 {
                    nest -= 1;
                } else if commas.is_empty() {
                    return None;
                } else {
                    return Some((commas, found));
                }
            }
        }
        i = found + 1;
    }
    None
}

/// Emits one word per alternation element and recurses into each.
fn expand_alternation(
    field: &AttrField,
    open: usize,
    commas: &[usize],
    close: usize,
    results: &mut Vec<AttrField>,
) {
    let mut element_start = open + 1;
    for boundary in commas.iter().copied().chain(std::iter::once(close)) {
        let mut chars = Vec::with_capacity(field.chars.len());
        chars.extend_from_slice(&field.chars[..open]);
        chars.extend_from_slice(&field.chars[element_start..boundary]);
        chars.extend_from_slice(&field.chars[close + 1..]);
        expand_into(
            AttrField {
                chars,
                origin: field.origin.clone(),
            },
            results,
        );
        element_start = boundary + 1;
    }
}

/// Parses a signed decimal literal of syntactic characters.
///
/// Returns the value, the number of characters consumed (sign included), and
/// whether the literal has a plus sign and a leading zero.
fn parse_number(chars: &[AttrChar], start: usize) -> Option<(i64, usize, bool, bool)> {
    let mut i = start;
    let mut text = String::new();
    let take = |i: usize, pred: fn(char) -> bool| {
        chars
            .get(i)
            .filter(|c| c.is_syntactic() && pred(c.value))
            .map(|c| c.value)
    };

    let mut plus = false;
    if let Some(sign) = take(i, |c| c == '+' || c == '-') {
        plus = sign == '+';
        text.push(sign);
        i += 1;
    }
    let digits_start = i;
    while let Some(digit) = take(i, |c| c.is_ascii_digit()) {
        text.push(digit);
        i += 1;
    }
    if i == digits_start {
        return None;
    }
    let leading_zero = chars[digits_start].value == '0';
    let value = text.parse().ok()?;
    Some((value, i - start, plus, leading_zero))
}

/// Tries to expand a numeric sequence `{N..M}` whose `{` is at `open`.
///
/// On success the generated words are recursively expanded into `results`
/// and true is returned. Otherwise nothing happens.
fn try_sequence(field: &AttrField, open: usize, results: &mut Vec<AttrField>) -> bool {
    let chars = &field.chars;
    let mut i = open + 1;

    let Some((start_value, start_len, start_plus, start_zero)) = parse_number(chars, i) else {
        return false;
    };
    i += start_len;
    let dots = next_are(chars, i, "..");
    if !dots {
        return false;
    }
    i += 2;
    let Some((end_value, end_len, end_plus, end_zero)) = parse_number(chars, i) else {
        return false;
    };
    i += end_len;
    if !next_are(chars, i, "}") {
        return false;
    }
    let close = i;

    // The zero-padding width is the wider source span, counted only when
    // that literal has a leading zero. The plus sign survives if either
    // endpoint was written with one.
    let start_width = if start_zero { start_len } else { 0 };
    let end_width = if end_zero { end_len } else { 0 };
    let width = start_width.max(end_width);
    let plus = start_plus || end_plus;

    let mut value = start_value;
    loop {
        let digits = if plus {
            format!("{value:+0width$}")
        } else {
            format!("{value:0width$}")
        };
        let mut new_chars = Vec::with_capacity(chars.len());
        new_chars.extend_from_slice(&chars[..open]);
        new_chars.extend(digits.chars().map(|c| AttrChar {
            value: c,
            origin: Origin::HardExpansion,
            is_quoted: false,
            is_quoting: false,
        }));
        new_chars.extend_from_slice(&chars[close + 1..]);
        expand_into(
            AttrField {
                chars: new_chars,
                origin: field.origin.clone(),
            },
            results,
        );

        if value == end_value {
            break;
        }
        value += if start_value < end_value { 1 } else { -1 };
    }
    true
}

/// Whether the syntactic characters at `start` spell out `text`
fn next_are(chars: &[AttrChar], start: usize, text: &str) -> bool {
    let mut i = start;
    for expected in text.chars() {
        match chars.get(i) {
            Some(c) if c.is_syntactic() && c.value == expected => i += 1,
            _ => return false,
        }
    }
    true
}
