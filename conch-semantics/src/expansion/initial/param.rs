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

//! Parameter expansion
//!
//! The expansion of a parameter proceeds in the fixed order the shell
//! language defines: obtain the value list (from a variable lookup or a
//! nested expansion), treat empty values as unset under the `:` condition,
//! apply the switch or pattern modifier, join concatenating forms with the
//! first `IFS` character, apply the length conversion, and finally decide
//! whether an unquoted empty result vanishes.

pub mod subst;
pub mod switch;
pub mod trim;

use super::super::attr::{AttrChar, Origin, Strip, skip_quotes};
use super::super::{Env, Error, ErrorCause, TildeMode, ifs_join};
use super::word;
use conch_env::option::{Off, Unset};
use conch_env::source::Location;
use conch_env::variable::Lookup;
use conch_fnmatch::PatternChar;
use conch_syntax::syntax::{Modifier, ParamExpansion, SwitchType, Word};

/// Performs a parameter expansion.
///
/// The result is a list of fields: usually one, any number for `@` and array
/// variables, and none at all when an unquoted expansion of an empty value
/// makes the word disappear.
pub fn expand(
    env: &mut Env,
    param: &ParamExpansion,
    in_double_quote: bool,
    tilde: TildeMode,
    location: &Location,
) -> Result<Vec<Vec<AttrChar>>, Error> {
    // Obtain the value list //
    let (mut values, concat, mut unset) = resolve(env, param, tilde, location)?;

    // The colon condition treats empty values as unset //
    if param.colon && (values.is_empty() || matches!(values.as_slice(), [v] if v.is_empty())) {
        unset = true;
    }

    // Switch //
    if let Modifier::Switch(sw) = &param.modifier {
        match (sw.r#type, unset) {
            (SwitchType::Alter, false) | (SwitchType::Default, true) => {
                return switch::substitute(env, &sw.word, in_double_quote);
            }
            (SwitchType::Assign, true) => {
                values = vec![switch::assign(env, param, &sw.word, location)?];
            }
            (SwitchType::Error, true) => {
                return Err(switch::empty_error(env, param, &sw.word, location));
            }
            _ => (),
        }
    }

    // Pattern modifiers //
    match &param.modifier {
        Modifier::Trim(trim) => trim::apply(env, trim, &mut values)?,
        Modifier::Subst(subst) => subst::apply(env, subst, &mut values)?,
        Modifier::None | Modifier::Switch(_) => (),
    }

    // Concatenation forms join into a single field //
    if concat {
        values = vec![ifs_join(&values, &env.inner.variables)];
    }

    // Length //
    if param.length {
        for value in &mut values {
            *value = value.chars().count().to_string();
        }
    }

    let mut fields: Vec<Vec<AttrChar>> =
        values.iter().map(|v| to_field(v, in_double_quote)).collect();

    // An unquoted expansion of a sole empty value produces no field, making
    // the containing word disappear unless something else contributes.
    if !in_double_quote && matches!(fields.as_slice(), [f] if f.is_empty()) {
        fields.clear();
    }
    Ok(fields)
}

/// Produces the value list for the parameter: the nested expansion or the
/// looked-up variable value, with the concatenation and unset markers.
fn resolve(
    env: &mut Env,
    param: &ParamExpansion,
    tilde: TildeMode,
    location: &Location,
) -> Result<(Vec<String>, bool, bool), Error> {
    if let Some(nested) = &param.nested {
        let fields = word::expand_word_units(env, nested, tilde)?;
        let values = fields
            .into_iter()
            .map(|chars| skip_quotes(chars).strip().collect())
            .collect();
        return Ok((values, true, false));
    }

    let name = param.name.as_deref().unwrap_or_default();
    match env.inner.variables.lookup(name) {
        Lookup::Unset => {
            if env.inner.options.get(Unset) == Off {
                return Err(Error {
                    cause: ErrorCause::UnsetParameter {
                        name: name.to_owned(),
                    },
                    location: location.clone(),
                });
            }
            Ok((vec![String::new()], false, true))
        }
        Lookup::Scalar(value) => Ok((vec![value], false, false)),
        Lookup::Array { values, concat } => Ok((values, concat, false)),
    }
}

/// Converts a value string into attributed characters.
///
/// All characters are marked as produced by a soft expansion, and as quoted
/// when the expansion occurs inside double quotes.
fn to_field(value: &str, in_double_quote: bool) -> Vec<AttrChar> {
    value
        .chars()
        .map(|c| AttrChar {
            value: c,
            origin: Origin::SoftExpansion,
            is_quoted: in_double_quote,
            is_quoting: false,
        })
        .collect()
}

/// Expands the pattern word of a trim or substitution modifier, keeping the
/// character attributes that tell quoted characters from pattern syntax.
fn expand_pattern(env: &mut Env, word: &Option<Word>) -> Result<Vec<AttrChar>, Error> {
    match word {
        None => Ok(Vec::new()),
        Some(word) => super::super::expand_single_attr(env, word, TildeMode::Single),
    }
}

/// Converts unquoted backslashes to quoting characters.
///
/// A backslash produced by an expansion still escapes the character after
/// it when the string is used as a pattern.
fn apply_escapes(chars: &mut [AttrChar]) {
    for j in 1..chars.len() {
        let i = j - 1;
        if chars[i].value == '\\' && !chars[i].is_quoting && !chars[i].is_quoted {
            chars[i].is_quoting = true;
            chars[j].is_quoted = true;
        }
    }
}

/// Adapts attributed characters for the pattern parser.
fn to_pattern_chars(chars: &[AttrChar]) -> impl Iterator<Item = PatternChar> + Clone + '_ {
    chars.iter().filter_map(|c| {
        if c.is_quoting {
            None
        } else if c.is_quoted {
            Some(PatternChar::Literal(c.value))
        } else {
            Some(PatternChar::Normal(c.value))
        }
    })
}

/// Pattern configuration derived from the shell options.
fn pattern_config(env: &Env) -> conch_fnmatch::Config {
    use conch_env::option::CaseGlob;
    let mut config = conch_fnmatch::Config::default();
    config.case_fold = env.inner.options.get(CaseGlob) == Off;
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::TestEnv;
    use assert_matches::assert_matches;
    use conch_env::variable::{IFS, Value};

    pub(crate) fn expand_param(env: &mut TestEnv, source: &str, in_double_quote: bool) -> Vec<String> {
        let word: Word = source.parse().unwrap();
        let param = match &word.units[0] {
            conch_syntax::syntax::WordUnit::Param(p) => p.clone(),
            other => panic!("not a param: {other:?}"),
        };
        let location = word.location.clone();
        let mut env = env.env();
        expand(&mut env, &param, in_double_quote, TildeMode::Single, &location)
            .unwrap()
            .into_iter()
            .map(|chars| skip_quotes(chars).strip().collect())
            .collect()
    }

    fn expand_param_err(env: &mut TestEnv, source: &str) -> Error {
        let word: Word = source.parse().unwrap();
        let param = match &word.units[0] {
            conch_syntax::syntax::WordUnit::Param(p) => p.clone(),
            other => panic!("not a param: {other:?}"),
        };
        let location = word.location.clone();
        let mut env = env.env();
        expand(&mut env, &param, false, TildeMode::Single, &location).unwrap_err()
    }

    #[test]
    fn basic_expansion() {
        let mut env = TestEnv::new();
        env.assign("foo", "value");
        assert_eq!(expand_param(&mut env, "${foo}", false), ["value"]);
    }

    #[test]
    fn unset_expands_to_nothing() {
        let mut env = TestEnv::new();
        assert_eq!(expand_param(&mut env, "${foo}", false).len(), 0);
        // Quoted, the expansion keeps one empty field.
        assert_eq!(expand_param(&mut env, "${foo}", true), [""]);
    }

    #[test]
    fn nounset_makes_unset_an_error() {
        let mut env = TestEnv::new();
        env.option(Unset, Off);
        let e = expand_param_err(&mut env, "${foo}");
        assert_matches!(e.cause, ErrorCause::UnsetParameter { name } if name == "foo");
    }

    #[test]
    fn array_expands_to_multiple_fields() {
        let mut env = TestEnv::new();
        env.env
            .variables
            .assign("a", Value::array(["x", "y"]), None)
            .unwrap();
        assert_eq!(expand_param(&mut env, "${a}", false), ["x", "y"]);
    }

    #[test]
    fn asterisk_joins_with_first_ifs_character() {
        let mut env = TestEnv::new();
        env.positional(["a", "b", "c"]);
        env.assign(IFS, "-x");
        assert_eq!(expand_param(&mut env, "${*}", false), ["a-b-c"]);
    }

    #[test]
    fn asterisk_joins_with_space_when_ifs_unset() {
        let mut env = TestEnv::new();
        env.positional(["a", "b"]);
        assert_eq!(expand_param(&mut env, "${*}", false), ["a b"]);
    }

    #[test]
    fn length_of_scalar() {
        let mut env = TestEnv::new();
        env.assign("foo", "hello");
        assert_eq!(expand_param(&mut env, "${#foo}", false), ["5"]);
    }

    #[test]
    fn length_of_each_array_element() {
        let mut env = TestEnv::new();
        env.env
            .variables
            .assign("a", Value::array(["x", "four"]), None)
            .unwrap();
        assert_eq!(expand_param(&mut env, "${#a}", false), ["1", "4"]);
    }

    #[test]
    fn length_of_unset() {
        let mut env = TestEnv::new();
        assert_eq!(expand_param(&mut env, "${#foo}", false), ["0"]);
    }

    #[test]
    fn nested_expansion() {
        let mut env = TestEnv::new();
        env.assign("inner", "abcde");
        assert_eq!(expand_param(&mut env, "${${inner}#ab}", false), ["cde"]);
    }

    #[test]
    fn case_fold_option_affects_patterns() {
        let mut env = TestEnv::new();
        env.assign("x", "ABCD");
        assert_eq!(expand_param(&mut env, "${x#ab}", false), ["ABCD"]);
        env.option(conch_env::option::CaseGlob, Off);
        assert_eq!(expand_param(&mut env, "${x#ab}", false), ["CD"]);
    }

    #[test]
    fn escape_application() {
        let mut chars = to_field(r"a\*b", false);
        apply_escapes(&mut chars);
        let pattern: Vec<_> = to_pattern_chars(&chars).collect();
        assert_eq!(
            pattern,
            [
                PatternChar::Normal('a'),
                PatternChar::Literal('*'),
                PatternChar::Normal('b'),
            ]
        );
    }
}
