// This file is part of conch, a POSIX-style shell.
// Copyright (C) 2026 conch authors

//! This crate performs pattern matching based on a globbing pattern.
//!
//! The following syntax is supported in patterns:
//!
//! - Any single character (`?`)
//! - Any character sequence (`*`)
//! - Bracket expression (`[...]`)
//!     - Character literals
//!     - Character ranges (e.g. `a-z`)
//!     - Complement (`[!...]` or `[^...]`)
//!     - Character classes (`[:alpha:]`)
//!
//! Character classes only match ASCII characters, and case folding uses the
//! simple one-to-one lowercase mapping. No other locale-specific
//! characteristics are supported.
//!
//! Unlike the usual `fnmatch` interface, a [`Pattern`] can match in three
//! [modes](Mode): anchored against the whole subject, or as the longest or
//! shortest matching prefix of the subject. The prefix modes return the number
//! of subject characters consumed, which is what the shell's prefix/suffix
//! trimming operators need.
//!
//! ```
//! # use conch_fnmatch::{Mode, Pattern, without_escape};
//! let p = Pattern::parse(without_escape("a*c")).unwrap();
//! assert_eq!(p.match_length("abcabc", Mode::Whole), Some(6));
//! assert_eq!(p.match_length("abcabc", Mode::Longest), Some(6));
//! assert_eq!(p.match_length("abcabc", Mode::Shortest), Some(3));
//! assert_eq!(p.match_length("abd", Mode::Whole), None);
//! ```

pub mod ast;
mod char_iter;
mod matcher;

pub use char_iter::{PatternChar, WithEscape, WithoutEscape, with_escape, without_escape};

use ast::Ast;
use matcher::Matcher;
use thiserror::Error;

/// Error that may happen in pattern parsing
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A bracket expression contains an undefined character class.
    #[error("undefined character class `{0}`")]
    UndefinedCharClass(String),
}

/// Configuration for a pattern
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct Config {
    /// Whether the pattern matches pathnames
    ///
    /// When set, `?`, `*` and bracket expressions do not match a slash.
    pub pathname: bool,

    /// Whether a leading period must be matched literally
    ///
    /// When set, `?`, `*` and bracket expressions do not match a period at
    /// the beginning of the subject or right after a slash.
    pub period: bool,

    /// Whether the matching is case-insensitive
    pub case_fold: bool,
}

/// How much of the subject a match must cover
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
    /// The pattern must consume the entire subject.
    Whole,
    /// Return the longest matching prefix.
    Longest,
    /// Return the shortest matching prefix.
    Shortest,
}

/// Compiled glob pattern
#[derive(Clone, Debug)]
pub struct Pattern {
    ast: Ast,
    config: Config,
}

impl Pattern {
    /// Parses a pattern with the default configuration.
    #[inline]
    pub fn parse<I>(pattern: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = PatternChar>,
        <I as IntoIterator>::IntoIter: Clone,
    {
        Self::parse_with_config(pattern, Config::default())
    }

    /// Parses a pattern with the given configuration.
    pub fn parse_with_config<I>(pattern: I, config: Config) -> Result<Self, Error>
    where
        I: IntoIterator<Item = PatternChar>,
        <I as IntoIterator>::IntoIter: Clone,
    {
        let ast = Ast::new(pattern)?;
        Ok(Pattern { ast, config })
    }

    /// Returns the configuration for this pattern.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the pattern contains no unescaped metacharacter
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.ast.is_literal()
    }

    /// Returns the pattern as a literal string if [literal](Self::is_literal).
    #[must_use]
    pub fn to_literal(&self) -> Option<String> {
        self.ast.to_literal()
    }

    /// Lower bound on the number of characters any match consumes
    ///
    /// Subjects shorter than this can be rejected without matching.
    #[must_use]
    pub fn shortest_match_length(&self) -> usize {
        self.ast.shortest_match_length()
    }

    /// Matches the pattern against the subject.
    ///
    /// Returns the number of subject characters consumed, or `None` on a
    /// mismatch. In [`Mode::Whole`], a successful match always consumes the
    /// entire subject.
    #[must_use]
    pub fn match_length(&self, subject: &str, mode: Mode) -> Option<usize> {
        let chars: Vec<char> = subject.chars().collect();
        self.match_length_chars(&chars, mode)
    }

    /// Like [`match_length`](Self::match_length), but on a character slice.
    #[must_use]
    pub fn match_length_chars(&self, subject: &[char], mode: Mode) -> Option<usize> {
        let min = self.ast.shortest_match_length();
        if subject.len() < min {
            return None;
        }
        let matcher = Matcher {
            config: self.config,
        };
        let whole = |n: &usize| matcher.match_whole(&self.ast.atoms, &subject[..*n], true);
        match mode {
            Mode::Whole => whole(&subject.len()).then_some(subject.len()),
            Mode::Longest => (min..=subject.len()).rev().find(whole),
            Mode::Shortest => (min..=subject.len()).find(whole),
        }
    }

    /// Whether the pattern matches the entire subject
    #[inline]
    #[must_use]
    pub fn is_match(&self, subject: &str) -> bool {
        self.match_length(subject, Mode::Whole).is_some()
    }
}

/// Tests whether a string contains an unescaped pattern metacharacter.
///
/// A backslash escapes the next character. The metacharacters are `*`, `?`
/// and `[`.
#[must_use]
pub fn has_special_char(s: &str) -> bool {
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '*' | '?' | '[' => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_pattern_round_trip() {
        let p = Pattern::parse(with_escape(r"a\*b")).unwrap();
        assert!(p.is_literal());
        assert_eq!(p.to_literal(), Some("a*b".to_string()));
        assert!(p.is_match("a*b"));
        assert!(!p.is_match("axb"));
    }

    #[test]
    fn non_literal_pattern() {
        let p = Pattern::parse(without_escape("a*b")).unwrap();
        assert!(!p.is_literal());
        assert_eq!(p.to_literal(), None);
    }

    #[test]
    fn subject_shorter_than_minimum_is_rejected() {
        let p = Pattern::parse(without_escape("a?c?")).unwrap();
        assert_eq!(p.shortest_match_length(), 4);
        assert_eq!(p.match_length("abc", Mode::Longest), None);
    }

    #[test]
    fn special_char_detection() {
        assert!(has_special_char("a*b"));
        assert!(has_special_char("a?"));
        assert!(has_special_char("x[y]"));
        assert!(!has_special_char("plain"));
        assert!(!has_special_char(r"a\*b"));
        assert!(!has_special_char(r"end\"));
    }
}
