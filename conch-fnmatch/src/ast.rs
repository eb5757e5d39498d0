// This file is part of conch, a POSIX-style shell.
// Copyright (C) 2026 conch authors

//! Abstract syntax tree for globbing patterns

mod parse;

use crate::Error;
use crate::PatternChar;
use regex_syntax::ast::ClassAsciiKind;
use std::ops::RangeInclusive;

/// Bracket expression component
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketAtom {
    /// Literal character
    Char(char),
    /// Character class (`[:digit:]`)
    CharClass(ClassAsciiKind),
}

impl From<char> for BracketAtom {
    fn from(c: char) -> Self {
        BracketAtom::Char(c)
    }
}

/// Bracket expression item
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketItem {
    /// Atom
    Atom(BracketAtom),
    /// Character range
    Range(RangeInclusive<char>),
}

impl<T: Into<BracketAtom>> From<T> for BracketItem {
    fn from(value: T) -> Self {
        BracketItem::Atom(value.into())
    }
}
impl From<RangeInclusive<char>> for BracketItem {
    fn from(range: RangeInclusive<char>) -> Self {
        BracketItem::Range(range)
    }
}

/// Bracket expression
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bracket {
    /// Whether there is an initial `!` or `^`
    ///
    /// When the bracket expression starts with an `!` or `^`, the set of
    /// matching characters is inverted.
    pub complement: bool,

    /// Content of the bracket expression
    pub items: Vec<BracketItem>,
}

/// Pattern component
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Atom {
    /// Literal character
    Char(char),
    /// Pattern that matches a single character (`?`)
    AnyChar,
    /// Pattern that matches any string (`*`)
    AnyString,
    /// Bracket expression
    Bracket(Bracket),
}

/// Abstract syntax tree for a whole pattern
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Ast {
    /// Content of the pattern
    pub atoms: Vec<Atom>,
}

impl Ast {
    /// Parses a pattern.
    #[inline]
    pub fn new<I>(pattern: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = PatternChar>,
        <I as IntoIterator>::IntoIter: Clone,
    {
        let mut atoms = Vec::new();
        let mut i = pattern.into_iter();
        while let Some((atom, j)) = Atom::parse(i)? {
            atoms.push(atom);
            i = j;
        }
        Ok(Ast { atoms })
    }

    /// Whether the pattern consists of literal characters only
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.atoms.iter().all(|atom| matches!(atom, Atom::Char(_)))
    }

    /// Returns the pattern as a literal string if [literal](Self::is_literal).
    #[must_use]
    pub fn to_literal(&self) -> Option<String> {
        self.atoms
            .iter()
            .map(|atom| match atom {
                Atom::Char(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Lower bound on the number of characters the pattern consumes
    ///
    /// Every atom but `*` matches at least one character, so the bound is the
    /// number of non-`*` atoms. Useful for rejecting subjects that are too
    /// short without running the matcher.
    #[must_use]
    pub fn shortest_match_length(&self) -> usize {
        self.atoms
            .iter()
            .filter(|atom| !matches!(atom, Atom::AnyString))
            .count()
    }
}
