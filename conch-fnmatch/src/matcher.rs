// This file is part of conch, a POSIX-style shell.
// Copyright (C) 2026 conch authors

//! Recursive pattern matcher
//!
//! The matcher walks the [`Ast`] and the subject character slice in parallel,
//! backtracking on `*`. All matching is performed in terms of whole characters,
//! never bytes.

use crate::Config;
use crate::ast::{Atom, Bracket, BracketItem};
use regex_syntax::ast::ClassAsciiKind;

/// Tests whether a character belongs to an ASCII character class.
fn class_contains(kind: ClassAsciiKind, c: char) -> bool {
    use ClassAsciiKind::*;
    match kind {
        Alnum => c.is_ascii_alphanumeric(),
        Alpha => c.is_ascii_alphabetic(),
        Ascii => c.is_ascii(),
        Blank => c == ' ' || c == '\t',
        Cntrl => c.is_ascii_control(),
        Digit => c.is_ascii_digit(),
        Graph => c.is_ascii_graphic(),
        Lower => c.is_ascii_lowercase(),
        Print => c.is_ascii_graphic() || c == ' ',
        Punct => c.is_ascii_punctuation(),
        Space => c.is_ascii_whitespace(),
        Upper => c.is_ascii_uppercase(),
        Word => c.is_ascii_alphanumeric() || c == '_',
        Xdigit => c.is_ascii_hexdigit(),
    }
}

pub(crate) struct Matcher {
    pub config: Config,
}

impl Matcher {
    fn fold(&self, c: char) -> char {
        if self.config.case_fold {
            c.to_lowercase().next().unwrap_or(c)
        } else {
            c
        }
    }

    /// Whether a `?` or bracket expression may consume `c` at this position.
    fn single_can_match(&self, c: char, component_start: bool) -> bool {
        !(self.config.pathname && c == '/')
            && !(self.config.period && component_start && c == '.')
    }

    /// Whether a `*` may consume `c` at this position.
    fn multi_can_match(&self, c: char, component_start: bool) -> bool {
        self.single_can_match(c, component_start)
    }

    fn bracket_matches(&self, bracket: &Bracket, c: char) -> bool {
        use crate::ast::BracketAtom::*;
        let folded = self.fold(c);
        let found = bracket.items.iter().any(|item| match item {
            BracketItem::Atom(Char(p)) => self.fold(*p) == folded,
            BracketItem::Atom(CharClass(kind)) => class_contains(kind.clone(), folded),
            BracketItem::Range(range) => {
                (self.fold(*range.start())..=self.fold(*range.end())).contains(&folded)
            }
        });
        found != bracket.complement
    }

    /// Matches the atoms against the entire subject.
    ///
    /// `component_start` is true at the beginning of the subject and right
    /// after a matched `/`, where the `period` flag protects a leading dot.
    pub fn match_whole(&self, atoms: &[Atom], subject: &[char], component_start: bool) -> bool {
        let Some((atom, rest)) = atoms.split_first() else {
            return subject.is_empty();
        };
        match atom {
            Atom::Char(p) => match subject.split_first() {
                Some((c, tail)) if self.fold(*p) == self.fold(*c) => {
                    self.match_whole(rest, tail, *c == '/')
                }
                _ => false,
            },

            Atom::AnyChar => match subject.split_first() {
                Some((c, tail)) if self.single_can_match(*c, component_start) => {
                    self.match_whole(rest, tail, false)
                }
                _ => false,
            },

            Atom::Bracket(bracket) => match subject.split_first() {
                Some((c, tail))
                    if self.single_can_match(*c, component_start)
                        && self.bracket_matches(bracket, *c) =>
                {
                    self.match_whole(rest, tail, false)
                }
                _ => false,
            },

            Atom::AnyString => {
                let mut i = 0;
                loop {
                    if self.match_whole(rest, &subject[i..], component_start && i == 0) {
                        return true;
                    }
                    if i == subject.len()
                        || !self.multi_can_match(subject[i], component_start && i == 0)
                    {
                        return false;
                    }
                    i += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Config;
    use crate::Mode;
    use crate::Pattern;
    use crate::without_escape;

    fn pattern(s: &str) -> Pattern {
        Pattern::parse(without_escape(s)).unwrap()
    }

    #[test]
    fn literal_whole_match() {
        let p = pattern("abc");
        assert_eq!(p.match_length("abc", Mode::Whole), Some(3));
        assert_eq!(p.match_length("abd", Mode::Whole), None);
        assert_eq!(p.match_length("abcd", Mode::Whole), None);
    }

    #[test]
    fn any_char() {
        let p = pattern("a?c");
        assert_eq!(p.match_length("abc", Mode::Whole), Some(3));
        assert_eq!(p.match_length("a.c", Mode::Whole), Some(3));
        assert_eq!(p.match_length("ac", Mode::Whole), None);
    }

    #[test]
    fn any_string_backtracks() {
        let p = pattern("a*c*");
        assert_eq!(p.match_length("abcbcb", Mode::Whole), Some(6));
        assert_eq!(p.match_length("ab", Mode::Whole), None);
    }

    #[test]
    fn star_matches_empty() {
        let p = pattern("a*");
        assert_eq!(p.match_length("a", Mode::Whole), Some(1));
    }

    #[test]
    fn longest_prefix() {
        let p = pattern("a*c");
        assert_eq!(p.match_length("abcabcd", Mode::Longest), Some(6));
    }

    #[test]
    fn shortest_prefix() {
        let p = pattern("a*c");
        assert_eq!(p.match_length("abcabcd", Mode::Shortest), Some(3));
    }

    #[test]
    fn empty_pattern_prefixes() {
        let p = pattern("");
        assert_eq!(p.match_length("xyz", Mode::Shortest), Some(0));
        assert_eq!(p.match_length("xyz", Mode::Longest), Some(0));
        assert_eq!(p.match_length("", Mode::Whole), Some(0));
    }

    #[test]
    fn bracket_expression() {
        let p = pattern("[a-cx]z");
        assert_eq!(p.match_length("bz", Mode::Whole), Some(2));
        assert_eq!(p.match_length("xz", Mode::Whole), Some(2));
        assert_eq!(p.match_length("dz", Mode::Whole), None);
    }

    #[test]
    fn bracket_complement() {
        let p = pattern("[!a-c]");
        assert_eq!(p.match_length("d", Mode::Whole), Some(1));
        assert_eq!(p.match_length("b", Mode::Whole), None);
    }

    #[test]
    fn character_class() {
        let p = pattern("[[:digit:]][[:alpha:]]");
        assert_eq!(p.match_length("7x", Mode::Whole), Some(2));
        assert_eq!(p.match_length("x7", Mode::Whole), None);
    }

    #[test]
    fn case_fold() {
        let mut config = Config::default();
        config.case_fold = true;
        let p = Pattern::parse_with_config(without_escape("Ab[c-e]"), config).unwrap();
        assert_eq!(p.match_length("abC", Mode::Whole), Some(3));
        assert_eq!(p.match_length("ABD", Mode::Whole), Some(3));
    }

    #[test]
    fn pathname_slash_not_matched_by_wildcards() {
        let mut config = Config::default();
        config.pathname = true;
        let p = Pattern::parse_with_config(without_escape("a*b"), config).unwrap();
        assert_eq!(p.match_length("axyb", Mode::Whole), Some(4));
        assert_eq!(p.match_length("ax/b", Mode::Whole), None);

        let p = Pattern::parse_with_config(without_escape("a?b"), config).unwrap();
        assert_eq!(p.match_length("a/b", Mode::Whole), None);

        let p = Pattern::parse_with_config(without_escape("a[/x]b"), config).unwrap();
        assert_eq!(p.match_length("a/b", Mode::Whole), None);
        assert_eq!(p.match_length("axb", Mode::Whole), Some(3));
    }

    #[test]
    fn pathname_slash_matched_literally() {
        let mut config = Config::default();
        config.pathname = true;
        let p = Pattern::parse_with_config(without_escape("a/*"), config).unwrap();
        assert_eq!(p.match_length("a/b", Mode::Whole), Some(3));
    }

    #[test]
    fn leading_period_protected() {
        let mut config = Config::default();
        config.pathname = true;
        config.period = true;
        let p = Pattern::parse_with_config(without_escape("*"), config).unwrap();
        assert_eq!(p.match_length(".profile", Mode::Whole), None);
        assert_eq!(p.match_length("profile", Mode::Whole), Some(7));

        let p = Pattern::parse_with_config(without_escape("?profile"), config).unwrap();
        assert_eq!(p.match_length(".profile", Mode::Whole), None);

        let p = Pattern::parse_with_config(without_escape(".*"), config).unwrap();
        assert_eq!(p.match_length(".profile", Mode::Whole), Some(8));
    }

    #[test]
    fn literal_pattern_matches_exactly_itself() {
        let p = pattern("just a name");
        assert_eq!(p.match_length("just a name", Mode::Whole), Some(11));
        assert_eq!(p.match_length("just a nam", Mode::Whole), None);
        assert_eq!(p.match_length("Just a name", Mode::Whole), None);
    }
}
