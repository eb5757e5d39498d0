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

//! Field splitting
//!
//! Field splitting divides a field into smaller parts delimited by a field
//! separator character obtained from the `$IFS` variable. Separators come in
//! two classes with different rules:
//!
//! - Whitespace separators are run-compressed: a run of adjacent whitespace
//!   separators acts as one delimiter, and leading or trailing runs produce
//!   no empty fields.
//! - Non-whitespace separators each delimit a field, so adjacent ones
//!   produce empty fields, and a trailing one (possibly surrounded by
//!   whitespace separators) produces a final empty field.
//!
//! Only characters [allowing splitting](AttrChar::allows_splitting) are
//! considered for delimiting; quoted characters and characters not produced
//! by an expansion never split.

use super::attr::{AttrChar, AttrField};
use std::borrow::Cow;

/// Collection of input field separator characters
#[derive(Clone, Debug, Eq)]
pub struct Ifs<'a> {
    chars: &'a str,
    non_whitespaces: Cow<'a, str>,
}

/// Extracts the non-whitespace characters of the given string.
fn non_whitespaces(s: &str) -> Cow<'_, str> {
    if s.chars().all(|c| !c.is_whitespace()) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.chars().filter(|c| !c.is_whitespace()).collect())
    }
}

impl<'a> Ifs<'a> {
    /// String containing the default separators: space, tab, and newline
    pub const DEFAULT: &'static str = " \t\n";

    /// Creates a new IFS consisting of the given separator characters.
    #[must_use]
    pub fn new(chars: &'a str) -> Self {
        Ifs {
            chars,
            non_whitespaces: non_whitespaces(chars),
        }
    }
}

/// The default IFS contains a space, tab, and newline.
impl Default for Ifs<'_> {
    fn default() -> Self {
        Self::new(Ifs::DEFAULT)
    }
}

/// The `==` operator compares the separator characters as a string.
impl PartialEq for Ifs<'_> {
    fn eq(&self, other: &Ifs) -> bool {
        self.chars == other.chars
    }
}

impl Ifs<'_> {
    /// Tests if the given character is a separator contained in this IFS.
    #[inline]
    #[must_use]
    pub fn is_ifs(&self, c: char) -> bool {
        self.chars.contains(c)
    }

    /// Tests if the given character is a non-whitespace separator.
    #[inline]
    #[must_use]
    pub fn is_ifs_non_whitespace(&self, c: char) -> bool {
        self.non_whitespaces.contains(c)
    }
}

/// Whether the field may be split at the given character
fn is_delimiter(ifs: &Ifs, c: AttrChar) -> bool {
    c.allows_splitting() && ifs.is_ifs(c.value)
}

/// Extracts a sub-range of a field.
fn subfield(field: &AttrField, range: std::ops::Range<usize>) -> AttrField {
    AttrField {
        chars: field.chars[range].to_vec(),
        origin: field.origin.clone(),
    }
}

/// Performs field splitting and appends the results to `dest`.
///
/// If no splitting occurs, the original field is moved into `dest` intact.
pub fn split_into(field: AttrField, ifs: &Ifs, dest: &mut Vec<AttrField>) {
    let saved_len = dest.len();
    let mut index = 0;
    let mut start = 0;
    while index < field.chars.len() {
        if is_delimiter(ifs, field.chars[index]) {
            // A delimiter run begins. Whitespace separators run-compress;
            // every non-whitespace separator bounds a field of its own.
            let mut split_on_non_whitespace = start >= index;
            let mut non_whitespace_seen = false;
            if start < index {
                dest.push(subfield(&field, start..index));
            }
            loop {
                if !field.chars[index].value.is_whitespace() {
                    if split_on_non_whitespace {
                        dest.push(subfield(&field, index..index));
                    }
                    split_on_non_whitespace = true;
                    non_whitespace_seen = true;
                }
                index += 1;
                if index == field.chars.len() {
                    if non_whitespace_seen && start < index {
                        dest.push(subfield(&field, index..index));
                    }
                    break;
                }
                if !is_delimiter(ifs, field.chars[index]) {
                    break;
                }
            }
            start = index;
        } else {
            index += 1;
        }
    }

    if dest.len() == saved_len {
        // No splitting happened; hand the field through unchanged.
        dest.push(field);
    } else if start < index {
        dest.push(subfield(&field, start..index));
    }
}

#[cfg(test)]
mod tests {
    use super::super::attr::Origin;
    use super::*;
    use conch_env::source::Location;

    fn soft_field(s: &str) -> AttrField {
        let chars = s
            .chars()
            .map(|c| AttrChar {
                value: c,
                origin: Origin::SoftExpansion,
                is_quoted: false,
                is_quoting: false,
            })
            .collect();
        AttrField {
            chars,
            origin: Location::dummy(""),
        }
    }

    fn split(field: AttrField, ifs: &Ifs) -> Vec<String> {
        let mut results = Vec::new();
        split_into(field, ifs, &mut results);
        results
            .into_iter()
            .map(|f| f.remove_quotes_and_strip().value)
            .collect()
    }

    #[test]
    fn ifs_classes() {
        let ifs = Ifs::new(" a");
        assert!(ifs.is_ifs(' '));
        assert!(ifs.is_ifs('a'));
        assert!(!ifs.is_ifs('b'));
        assert!(ifs.is_ifs_non_whitespace('a'));
        assert!(!ifs.is_ifs_non_whitespace(' '));
    }

    #[test]
    fn no_separator_passes_field_through() {
        let fields = split(soft_field("abc"), &Ifs::default());
        assert_eq!(fields, ["abc"]);
    }

    #[test]
    fn whitespace_separators_run_compress() {
        let ifs = Ifs::default();
        assert_eq!(split(soft_field("foo bar"), &ifs), ["foo", "bar"]);
        assert_eq!(split(soft_field("  foo \t bar  "), &ifs), ["foo", "bar"]);
        assert_eq!(
            split(soft_field(" one two  three four  "), &ifs),
            ["one", "two", "three", "four"]
        );
    }

    #[test]
    fn exactly_n_fields_from_n_tokens() {
        let ifs = Ifs::new(" ");
        let fields = split(soft_field("a   b  c d"), &ifs);
        assert_eq!(fields, ["a", "b", "c", "d"]);
    }

    #[test]
    fn non_whitespace_separators_delimit_empty_fields() {
        let ifs = Ifs::new(":");
        assert_eq!(split(soft_field("a::b"), &ifs), ["a", "", "b"]);
        assert_eq!(split(soft_field(":a"), &ifs), ["", "a"]);
    }

    #[test]
    fn trailing_non_whitespace_separator_emits_empty_field() {
        let ifs = Ifs::new(":");
        assert_eq!(split(soft_field("a:"), &ifs), ["a", ""]);

        let ifs = Ifs::new(": ");
        assert_eq!(split(soft_field("a : "), &ifs), ["a", ""]);
    }

    #[test]
    fn trailing_whitespace_separator_emits_nothing() {
        let ifs = Ifs::default();
        assert_eq!(split(soft_field("a "), &ifs), ["a"]);
    }

    #[test]
    fn mixed_separators() {
        let ifs = Ifs::new("- ");
        assert_eq!(
            split(soft_field("foo - bar -  - baz"), &ifs),
            ["foo", "bar", "", "baz"]
        );
    }

    #[test]
    fn quoted_characters_never_split() {
        let ifs = Ifs::default();
        let mut field = soft_field("a b");
        field.chars[1].is_quoted = true;
        assert_eq!(split(field, &ifs), ["a b"]);
    }

    #[test]
    fn literal_characters_never_split() {
        let ifs = Ifs::default();
        let mut field = soft_field("a b");
        field.chars[1].origin = Origin::Literal;
        assert_eq!(split(field, &ifs), ["a b"]);
    }
}
