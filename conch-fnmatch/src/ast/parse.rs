// This file is part of conch, a POSIX-style shell.
// Copyright (C) 2026 conch authors

//! AST parser

use super::*;
use crate::Error;
use crate::PatternChar;
use regex_syntax::ast::ClassAsciiKind;

impl BracketAtom {
    /// Parses a character class (except the initial `[`).
    ///
    /// If successful, returns the class as well as an iterator that yields
    /// characters following the closing bracket. Returns `Ok(None)` if the
    /// input does not start a character class.
    fn parse_class<I>(mut i: I) -> Result<Option<(Self, I)>, Error>
    where
        I: Iterator<Item = PatternChar>,
    {
        if !matches!(i.next(), Some(PatternChar::Normal(':'))) {
            return Ok(None);
        }
        let mut value = Vec::new();
        while let Some(pc) = i.next() {
            value.push(pc);
            if value.ends_with(&[PatternChar::Normal(':'), PatternChar::Normal(']')]) {
                value.truncate(value.len() - 2);
                let name: String = value.into_iter().map(PatternChar::char_value).collect();
                return if let Some(class) = ClassAsciiKind::from_name(&name) {
                    Ok(Some((BracketAtom::CharClass(class), i)))
                } else {
                    Err(Error::UndefinedCharClass(name))
                };
            }
        }
        Ok(None)
    }
}

/// Converts the last three items into a range if applicable.
fn make_range(items: &mut Vec<BracketItem>) {
    use BracketAtom::Char;
    use BracketItem::{Atom, Range};

    if let [.., Atom(Char(start)), Atom(Char('-')), Atom(Char(end))] = items.as_slice() {
        let range = *start..=*end;
        items.truncate(items.len() - 3);
        items.push(Range(range));
    }
}

impl Bracket {
    /// Parses a bracket expression (except the initial `[`).
    ///
    /// If successful, returns the expression as well as an iterator that
    /// yields characters following it. Returns `Ok(None)` if no closing
    /// bracket is found, in which case the caller should treat the opening
    /// bracket as a literal character.
    fn parse<I>(mut i: I) -> Result<Option<(Self, I)>, Error>
    where
        I: Iterator<Item = PatternChar> + Clone,
    {
        let mut bracket = Bracket {
            complement: false,
            items: Vec::new(),
        };
        while let Some(pc) = i.next() {
            match pc {
                PatternChar::Normal(']') if !bracket.items.is_empty() => {
                    return Ok(Some((bracket, i)));
                }
                PatternChar::Normal('!' | '^')
                    if !bracket.complement && bracket.items.is_empty() =>
                {
                    bracket.complement = true
                }
                PatternChar::Normal('[') => {
                    if let Some((atom, j)) = BracketAtom::parse_class(i.clone())? {
                        bracket.items.push(atom.into());
                        i = j;
                    } else {
                        bracket.items.push('['.into());
                    }
                }
                c => bracket.items.push(c.char_value().into()),
            }
            make_range(&mut bracket.items);
        }
        Ok(None)
    }
}

impl Atom {
    pub(crate) fn parse<I>(mut i: I) -> Result<Option<(Self, I)>, Error>
    where
        I: Iterator<Item = PatternChar> + Clone,
    {
        if let Some(pc) = i.next() {
            let atom = match pc {
                PatternChar::Normal('?') => Atom::AnyChar,
                PatternChar::Normal('*') => Atom::AnyString,
                PatternChar::Normal('[') => {
                    if let Some((bracket, j)) = Bracket::parse(i.clone())? {
                        i = j;
                        Atom::Bracket(bracket)
                    } else {
                        Atom::Char('[')
                    }
                }
                c => Atom::Char(c.char_value()),
            };
            Ok(Some((atom, i)))
        } else {
            Ok(None)
        }
    }
}
