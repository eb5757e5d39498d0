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

//! Parameter expansion switch semantics
//!
//! The `-`, `+`, `=` and `?` modifiers conditionally replace the value being
//! expanded. `-` and `+` substitute the expansion of their word; `=`
//! additionally assigns it to the variable; `?` turns the condition into an
//! error carrying an optional message.

use crate::expansion::attr::{AttrChar, Origin};
use crate::expansion::initial::word;
use crate::expansion::{EmptyError, Env, Error, ErrorCause, TildeMode, expand_single};
use conch_env::source::Location;
use conch_env::variable::is_name;
use conch_syntax::syntax::{ParamExpansion, Word};

/// Expands the switch word in place of the parameter value.
///
/// The result is re-attributed as the output of a parameter expansion: its
/// literal characters become [soft expansion](Origin::SoftExpansion) output
/// subject to field splitting, and inside double quotes every character is
/// marked quoted.
pub fn substitute(
    env: &mut Env,
    word: &Option<Word>,
    in_double_quote: bool,
) -> Result<Vec<Vec<AttrChar>>, Error> {
    let Some(word) = word else {
        return Ok(Vec::new());
    };
    let mut fields = word::expand_word_units(env, word, TildeMode::Single)?;
    for field in &mut fields {
        for c in field.iter_mut() {
            if c.origin == Origin::Literal {
                c.origin = Origin::SoftExpansion;
            }
            if in_double_quote {
                c.is_quoted = true;
            }
        }
    }
    Ok(fields)
}

/// Expands the switch word, assigns it to the parameter, and returns the
/// assigned value.
///
/// Assignment requires a plain variable name: a nested expansion or an
/// invalid identifier is an error, as is a read-only variable.
pub fn assign(
    env: &mut Env,
    param: &ParamExpansion,
    word: &Option<Word>,
    location: &Location,
) -> Result<String, Error> {
    let name = match (&param.nested, &param.name) {
        (None, Some(name)) if is_name(name) => name.clone(),
        _ => {
            return Err(Error {
                cause: ErrorCause::NonassignableParameter {
                    name: param.to_string(),
                },
                location: location.clone(),
            });
        }
    };

    let value = match word {
        None => String::new(),
        Some(word) => expand_single(env, word, TildeMode::Single)?.value,
    };
    env.inner
        .variables
        .assign(&name, value.clone(), Some(location.clone()))
        .map_err(|e| Error {
            cause: ErrorCause::AssignReadOnly(e),
            location: location.clone(),
        })?;
    Ok(value)
}

/// Builds the error for the `?` switch, expanding the message word.
pub fn empty_error(
    env: &mut Env,
    param: &ParamExpansion,
    word: &Option<Word>,
    location: &Location,
) -> Error {
    let message = match word {
        None => None,
        Some(word) => match expand_single(env, word, TildeMode::Single) {
            Ok(field) => Some(field.value),
            Err(error) => return error,
        },
    };
    Error {
        cause: ErrorCause::EmptyExpansion(EmptyError {
            name: param.name.clone(),
            message,
            colon: param.colon,
        }),
        location: location.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::expand_param;
    use super::*;
    use crate::tests::TestEnv;
    use assert_matches::assert_matches;

    #[test]
    fn default_on_unset() {
        let mut env = TestEnv::new();
        assert_eq!(expand_param(&mut env, "${u:-fallback}", false), ["fallback"]);
        env.assign("u", "set");
        assert_eq!(expand_param(&mut env, "${u:-fallback}", false), ["set"]);
    }

    #[test]
    fn colon_treats_empty_as_unset() {
        let mut env = TestEnv::new();
        env.assign("e", "");
        assert_eq!(expand_param(&mut env, "${e:-d}", false), ["d"]);
        // Without the colon, the empty value is "set".
        assert_eq!(expand_param(&mut env, "${e-d}", false).len(), 0);
    }

    #[test]
    fn alter_on_set() {
        let mut env = TestEnv::new();
        env.assign("v", "x");
        assert_eq!(expand_param(&mut env, "${v+alt}", false), ["alt"]);
        assert_eq!(expand_param(&mut env, "${w+alt}", false).len(), 0);
    }

    #[test]
    fn alter_with_empty_value_and_colon() {
        let mut env = TestEnv::new();
        env.assign("e", "");
        assert_eq!(expand_param(&mut env, "${e:+alt}", false).len(), 0);
        assert_eq!(expand_param(&mut env, "${e+alt}", false), ["alt"]);
    }

    #[test]
    fn empty_default_word_vanishes() {
        let mut env = TestEnv::new();
        assert_eq!(expand_param(&mut env, "${u:-}", false).len(), 0);
    }

    #[test]
    fn default_word_is_tilde_and_parameter_expanded() {
        let mut env = TestEnv::new();
        env.assign(conch_env::variable::HOME, "/h");
        env.assign("x", "val");
        assert_eq!(expand_param(&mut env, "${u:-~/$x}", false), ["/h/val"]);
    }

    #[test]
    fn assign_default_sets_the_variable() {
        let mut env = TestEnv::new();
        assert_eq!(expand_param(&mut env, "${u:=d}", false), ["d"]);
        assert_eq!(env.env.variables.get_scalar("u"), Some("d"));
        // Already set now; the word is not expanded again.
        assert_eq!(expand_param(&mut env, "${u:=other}", false), ["d"]);
    }

    #[test]
    fn assign_to_nested_expansion_is_an_error() {
        let mut env = TestEnv::new();
        let word: Word = "${${x}:=d}".parse().unwrap();
        let param = assert_matches!(&word.units[0], conch_syntax::syntax::WordUnit::Param(p) => p.clone());
        let mut exp_env = env.env();
        let e = super::super::expand(&mut exp_env, &param, false, TildeMode::Single, &word.location)
            .unwrap_err();
        assert_matches!(e.cause, ErrorCause::NonassignableParameter { .. });
    }

    #[test]
    fn assign_to_special_parameter_is_an_error() {
        let mut env = TestEnv::new();
        let word: Word = "${@:=d}".parse().unwrap();
        let param = assert_matches!(&word.units[0], conch_syntax::syntax::WordUnit::Param(p) => p.clone());
        let mut exp_env = env.env();
        let e = super::super::expand(&mut exp_env, &param, false, TildeMode::Single, &word.location)
            .unwrap_err();
        assert_matches!(e.cause, ErrorCause::NonassignableParameter { .. });
    }

    #[test]
    fn assign_to_read_only_variable_is_an_error() {
        let mut env = TestEnv::new();
        env.env
            .variables
            .make_read_only("r", Location::dummy("readonly r"));
        let word: Word = "${r:=d}".parse().unwrap();
        let param = assert_matches!(&word.units[0], conch_syntax::syntax::WordUnit::Param(p) => p.clone());
        let mut exp_env = env.env();
        let e = super::super::expand(&mut exp_env, &param, false, TildeMode::Single, &word.location)
            .unwrap_err();
        assert_matches!(e.cause, ErrorCause::AssignReadOnly(_));
    }

    #[test]
    fn error_switch_with_message() {
        let mut env = TestEnv::new();
        let word: Word = "${u:?not set here}".parse().unwrap();
        let param = assert_matches!(&word.units[0], conch_syntax::syntax::WordUnit::Param(p) => p.clone());
        let mut exp_env = env.env();
        let e = super::super::expand(&mut exp_env, &param, false, TildeMode::Single, &word.location)
            .unwrap_err();
        assert_matches!(e.cause, ErrorCause::EmptyExpansion(empty) => {
            assert_eq!(empty.name.as_deref(), Some("u"));
            assert_eq!(empty.message.as_deref(), Some("not set here"));
            assert!(empty.colon);
        });
    }

    #[test]
    fn error_switch_not_triggered_when_set() {
        let mut env = TestEnv::new();
        env.assign("u", "ok");
        assert_eq!(expand_param(&mut env, "${u:?msg}", false), ["ok"]);
    }
}
