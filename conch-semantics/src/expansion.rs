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

//! Word expansion
//!
//! This module turns parsed [`Word`]s into the final argument strings. The
//! pipeline has four stages:
//!
//! 1. **Initial expansion** ([`initial`]): tilde expansion, parameter
//!    expansion and command substitution, producing strings of
//!    [attributed characters](attr).
//! 2. **Brace expansion** ([`brace`]): `{a,b}` alternations and `{N..M}`
//!    sequences, when the `braceexpand` option is on.
//! 3. **Field splitting** ([`split`]): `$IFS`-driven division of the
//!    unquoted expansion results.
//! 4. **Pathname expansion** ([`glob`]): file name generation, ending with
//!    quote removal and attribute stripping.
//!
//! [`expand_words`] runs the full pipeline for a command's words.
//! [`expand_single`] expands one word to one field without the multi-field
//! stages, as used for assignment values and expansion-internal words, and
//! [`expand_single_with_glob`] adds pathname expansion for redirection
//! targets.
//!
//! The first failing unit aborts the expansion of its word and the error is
//! returned; [`report_error`] prints the diagnostic and decides whether the
//! shell must exit.

pub mod attr;
pub mod brace;
pub mod glob;
pub mod initial;
pub mod split;

use self::attr::{AttrChar, AttrField, Origin};
use self::split::Ifs;
use crate::runtime::Runtime;
use conch_env::option::{BraceExpand, Glob, Interactive, Off, On, PosixlyCorrect};
use conch_env::semantics::{ExitStatus, Field};
use conch_env::source::Location;
use conch_env::system::Errno;
use conch_env::variable::{AssignError, IFS, VariableSet};
use conch_syntax::source::pretty::{Annotation, AnnotationType, Message};
use conch_syntax::syntax::Word;
use itertools::Itertools;
use thiserror::Error as ThisError;

/// How tilde expansion applies to a word
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TildeMode {
    /// No tilde expansion
    None,
    /// Only a tilde at the very beginning of the word expands.
    Single,
    /// A tilde expands at the beginning and after every unquoted colon, as
    /// in the value of an assignment.
    Multi,
}

/// Environment the word expansion runs in
///
/// This couples the shell [environment](conch_env::Env) with the
/// [`Runtime`] collaborator that performs command substitution.
#[derive(Debug)]
pub struct Env<'e> {
    /// Variables, options and the system interface
    pub inner: &'e mut conch_env::Env,
    /// Command execution support
    pub runtime: &'e mut dyn Runtime,
}

impl<'e> Env<'e> {
    /// Creates a new expansion environment.
    pub fn new(inner: &'e mut conch_env::Env, runtime: &'e mut dyn Runtime) -> Self {
        Env { inner, runtime }
    }
}

/// Error caused by an `${x?}` switch on an empty value
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmptyError {
    /// Name of the parameter, if the expansion named one
    pub name: Option<String>,
    /// Message expanded from the switch word
    pub message: Option<String>,
    /// Whether the switch had the `:` condition
    pub colon: bool,
}

impl std::fmt::Display for EmptyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.name, &self.message) {
            (Some(name), Some(message)) => write!(f, "{name}: {message}"),
            (None, Some(message)) => message.fmt(f),
            (Some(name), None) if self.colon => {
                write!(f, "{name}: parameter null or not set")
            }
            (Some(name), None) => write!(f, "{name}: parameter not set"),
            (None, None) => "parameter null".fmt(f),
        }
    }
}

impl std::error::Error for EmptyError {}

/// Types of errors that may occur in the word expansion
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[non_exhaustive]
pub enum ErrorCause {
    /// Expansion of an unset parameter with the `nounset` option in effect
    #[error("{name}: parameter not set")]
    UnsetParameter {
        /// Name of the parameter
        name: String,
    },

    /// Error switch on an unset or empty value
    #[error(transparent)]
    EmptyExpansion(EmptyError),

    /// Assignment to something that is not an assignable variable
    #[error("cannot assign to `{name}` in parameter expansion")]
    NonassignableParameter {
        /// Description of the target of the assignment
        name: String,
    },

    /// Assignment to a read-only variable
    #[error(transparent)]
    AssignReadOnly(AssignError),

    /// Failure in running a command substitution
    #[error("error in command substitution: {0}")]
    CommandSubstError(Errno),

    /// Arithmetic expansion is not implemented.
    #[error("arithmetic expansion not implemented")]
    ArithmeticNotImplemented,

    /// Pathname expansion of a single word did not produce exactly one
    /// pathname.
    #[error("{word}: not a single file")]
    NotSingleField {
        /// The word after quote removal
        word: String,
    },
}

/// Explanation of an expansion failure
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{cause}")]
pub struct Error {
    /// Cause of the error
    pub cause: ErrorCause,
    /// Position of the word the error occurred in
    pub location: Location,
}

/// Converts an error into a printable diagnostic message.
impl<'a> From<&'a Error> for Message<'a> {
    fn from(error: &'a Error) -> Self {
        Message {
            r#type: AnnotationType::Error,
            title: error.cause.to_string().into(),
            annotations: vec![Annotation::new(
                AnnotationType::Error,
                "in this word".into(),
                &error.location,
            )],
        }
    }
}

/// Reports an expansion error.
///
/// The diagnostic is rendered and written to the standard error through the
/// [`System`](conch_env::System). In a non-interactive shell the error is
/// fatal: the dedicated [`ExitStatus::EXP_ERROR`] is returned and the caller
/// must exit with it. In an interactive shell, `None` is returned and the
/// caller abandons the current command.
pub fn report_error(env: &mut conch_env::Env, error: &Error) -> Option<ExitStatus> {
    let message = Message::from(error);
    env.system.print_error(&message.render());
    (env.options.get(Interactive) == Off).then_some(ExitStatus::EXP_ERROR)
}

/// Joins values with the first `IFS` character.
///
/// The separator is a space when `IFS` is unset and nothing when `IFS` is
/// empty.
pub(crate) fn ifs_join(values: &[String], variables: &VariableSet) -> String {
    let separator = match variables.get_scalar(IFS) {
        None => " ".to_string(),
        Some(ifs) => ifs.chars().next().map(String::from).unwrap_or_default(),
    };
    values.iter().join(&separator)
}

/// Expands a single word to one attributed character string.
///
/// This performs the initial expansion only. If the word produces more than
/// one field (`$@` and friends), the fields are joined with the first `IFS`
/// character.
pub fn expand_single_attr(
    env: &mut Env,
    word: &Word,
    tilde: TildeMode,
) -> Result<Vec<AttrChar>, Error> {
    let mut fields = initial::word::expand_word_units(env, word, tilde)?;
    if fields.len() == 1 {
        return Ok(fields.pop().unwrap_or_default());
    }

    let separator = match env.inner.variables.get_scalar(IFS) {
        None => Some(' '),
        Some(ifs) => ifs.chars().next(),
    };
    let mut result = Vec::new();
    for (index, field) in fields.into_iter().enumerate() {
        if index > 0 {
            if let Some(separator) = separator {
                result.push(AttrChar {
                    value: separator,
                    origin: Origin::SoftExpansion,
                    is_quoted: false,
                    is_quoting: false,
                });
            }
        }
        result.extend(field);
    }
    Ok(result)
}

/// Expands a single word to one field.
///
/// Brace expansion, field splitting and pathname expansion are not
/// performed; quote removal is. This is the expansion used for assignment
/// values and for the words inside parameter expansion modifiers.
pub fn expand_single(env: &mut Env, word: &Word, tilde: TildeMode) -> Result<Field, Error> {
    let chars = expand_single_attr(env, word, tilde)?;
    let field = AttrField {
        chars,
        origin: word.location.clone(),
    };
    Ok(field.remove_quotes_and_strip())
}

/// Expands a single word to one field, with pathname expansion.
///
/// If the glob produces anything but exactly one pathname, the word after
/// quote removal is kept under `posixly_correct`, and a
/// [`NotSingleField`](ErrorCause::NotSingleField) error is reported
/// otherwise. This is the expansion used for redirection targets.
pub fn expand_single_with_glob(env: &mut Env, word: &Word) -> Result<Field, Error> {
    let chars = expand_single_attr(env, word, TildeMode::Single)?;
    let field = AttrField {
        chars,
        origin: word.location.clone(),
    };
    if env.inner.options.get(Glob) == Off || !glob::has_pattern_chars(&field.chars) {
        return Ok(field.remove_quotes_and_strip());
    }

    let mut matches = glob::glob_matches(env.inner, &field);
    if matches.len() == 1 {
        Ok(matches.remove(0))
    } else if env.inner.options.get(PosixlyCorrect) == On {
        Ok(field.remove_quotes_and_strip())
    } else {
        let origin = field.origin.clone();
        let word = field.remove_quotes_and_strip().value;
        Err(Error {
            cause: ErrorCause::NotSingleField { word },
            location: origin,
        })
    }
}

/// Expands the words of a command to the final fields.
///
/// This runs the whole pipeline: initial expansion, brace expansion, field
/// splitting and pathname expansion, in that order, honoring the
/// `braceexpand`, `glob` and related options.
pub fn expand_words(env: &mut Env, words: &[Word]) -> Result<Vec<Field>, Error> {
    let mut split_fields = Vec::new();
    for word in words {
        let fields = initial::word::expand_word_units(env, word, TildeMode::Single)?;
        let mut attr_fields: Vec<AttrField> = fields
            .into_iter()
            .map(|chars| AttrField {
                chars,
                origin: word.location.clone(),
            })
            .collect();

        if env.inner.options.get(BraceExpand) == On {
            attr_fields = brace::expand_each(attr_fields);
        }

        let ifs_value = env.inner.variables.get_scalar(IFS).map(str::to_owned);
        let ifs = Ifs::new(ifs_value.as_deref().unwrap_or(Ifs::DEFAULT));
        for field in attr_fields {
            split::split_into(field, &ifs, &mut split_fields);
        }
    }
    Ok(glob::glob_fields(env.inner, split_fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::TestEnv;
    use assert_matches::assert_matches;
    use conch_env::option::{BraceExpand, Unset};
    use conch_syntax::syntax::List;

    /// Parses a line and expands the words of its sole simple command.
    fn expand_line(env: &mut TestEnv, line: &str) -> Vec<String> {
        let list: List = line.parse().unwrap();
        assert_eq!(list.0.len(), 1, "one command in {line:?}");
        let words = match &list.0[0].body {
            conch_syntax::syntax::CommandBody::Simple { words } => words.clone(),
            other => panic!("not a simple command: {other:?}"),
        };
        let mut env = env.env();
        expand_words(&mut env, &words)
            .unwrap()
            .into_iter()
            .map(|f| f.value)
            .collect()
    }

    fn expand_line_err(env: &mut TestEnv, line: &str) -> Error {
        let list: List = line.parse().unwrap();
        let words = match &list.0[0].body {
            conch_syntax::syntax::CommandBody::Simple { words } => words.clone(),
            other => panic!("not a simple command: {other:?}"),
        };
        let mut env = env.env();
        expand_words(&mut env, &words).unwrap_err()
    }

    #[test]
    fn unquoted_variable_field_splits() {
        let mut env = TestEnv::new();
        env.assign("A", "foo bar");
        assert_eq!(expand_line(&mut env, "echo $A"), ["echo", "foo", "bar"]);
    }

    #[test]
    fn quoted_variable_never_splits() {
        let mut env = TestEnv::new();
        env.assign("A", "foo bar");
        assert_eq!(expand_line(&mut env, "echo \"$A\""), ["echo", "foo bar"]);
    }

    #[test]
    fn brace_alternation_product() {
        let mut env = TestEnv::new();
        assert_eq!(
            expand_line(&mut env, "echo {a,b}{1,2}"),
            ["echo", "a1", "a2", "b1", "b2"]
        );
    }

    #[test]
    fn brace_numeric_sequence_with_padding() {
        let mut env = TestEnv::new();
        assert_eq!(
            expand_line(&mut env, "echo {03..5}"),
            ["echo", "03", "04", "05"]
        );
    }

    #[test]
    fn braceexpand_off_keeps_braces() {
        let mut env = TestEnv::new();
        env.option(BraceExpand, Off);
        assert_eq!(expand_line(&mut env, "echo {a,b}"), ["echo", "{a,b}"]);
    }

    #[test]
    fn prefix_trim() {
        let mut env = TestEnv::new();
        env.assign("X", "abcde");
        assert_eq!(expand_line(&mut env, "echo ${X#a*c}"), ["echo", "de"]);
    }

    #[test]
    fn substitute_all() {
        let mut env = TestEnv::new();
        env.assign("X", "abcabc");
        assert_eq!(expand_line(&mut env, "echo ${X//a/Z}"), ["echo", "ZbcZbc"]);
    }

    #[test]
    fn tilde_expansion_in_command_words() {
        let mut env = TestEnv::new();
        env.assign(conch_env::variable::HOME, "/h");
        assert_eq!(expand_line(&mut env, "echo ~/x"), ["echo", "/h/x"]);
    }

    #[test]
    fn ifs_with_non_whitespace_separator() {
        let mut env = TestEnv::new();
        env.assign(IFS, ":");
        env.assign("A", "a::b");
        assert_eq!(expand_line(&mut env, "echo $A"), ["echo", "a", "", "b"]);
    }

    #[test]
    fn command_substitution_splits_unquoted() {
        let mut env = TestEnv::new();
        env.command_output("ls", "a b\n");
        assert_eq!(expand_line(&mut env, "echo $(ls)"), ["echo", "a", "b"]);
        assert_eq!(expand_line(&mut env, "echo \"$(ls)\""), ["echo", "a b"]);
    }

    #[test]
    fn backquote_substitution_expands() {
        let mut env = TestEnv::new();
        env.command_output("date", "today\n");
        assert_eq!(expand_line(&mut env, "echo `date`"), ["echo", "today"]);
    }

    #[test]
    fn pathname_expansion_of_command_words() {
        let mut env = TestEnv::new();
        env.save_file("x.txt");
        env.save_file("y.txt");
        assert_eq!(
            expand_line(&mut env, "echo *.txt"),
            ["echo", "x.txt", "y.txt"]
        );
    }

    #[test]
    fn quote_removal_is_the_last_pass() {
        let mut env = TestEnv::new();
        assert_eq!(
            expand_line(&mut env, r#"echo a'b c'"d"\ e"#),
            ["echo", "ab cd e"]
        );
    }

    #[test]
    fn empty_quotes_make_an_empty_argument() {
        let mut env = TestEnv::new();
        assert_eq!(expand_line(&mut env, "echo ''"), ["echo", ""]);
        assert_eq!(expand_line(&mut env, "echo \"\""), ["echo", ""]);
    }

    #[test]
    fn unset_parameter_error_aborts_the_expansion() {
        let mut env = TestEnv::new();
        env.option(Unset, Off);
        let e = expand_line_err(&mut env, "echo $missing");
        assert_matches!(e.cause, ErrorCause::UnsetParameter { name } if name == "missing");
    }

    #[test]
    fn expand_single_joins_multiple_fields() {
        let mut env = TestEnv::new();
        env.positional(["a", "b"]);
        env.assign(IFS, "-");
        let word: Word = "$@".parse().unwrap();
        let mut exp_env = env.env();
        let field = expand_single(&mut exp_env, &word, TildeMode::Single).unwrap();
        assert_eq!(field.value, "a-b");
    }

    #[test]
    fn expand_single_with_glob_single_match() {
        let mut env = TestEnv::new();
        env.save_file("only.txt");
        let word: Word = "*.txt".parse().unwrap();
        let mut exp_env = env.env();
        let field = expand_single_with_glob(&mut exp_env, &word).unwrap();
        assert_eq!(field.value, "only.txt");
    }

    #[test]
    fn expand_single_with_glob_multiple_matches_is_an_error() {
        let mut env = TestEnv::new();
        env.save_file("a.txt");
        env.save_file("b.txt");
        let word: Word = "*.txt".parse().unwrap();
        let mut exp_env = env.env();
        let e = expand_single_with_glob(&mut exp_env, &word).unwrap_err();
        assert_matches!(e.cause, ErrorCause::NotSingleField { word } if word == "*.txt");
    }

    #[test]
    fn expand_single_with_glob_posix_keeps_the_pattern() {
        let mut env = TestEnv::new();
        env.save_file("a.txt");
        env.save_file("b.txt");
        env.option(PosixlyCorrect, On);
        let word: Word = "*.txt".parse().unwrap();
        let mut exp_env = env.env();
        let field = expand_single_with_glob(&mut exp_env, &word).unwrap();
        assert_eq!(field.value, "*.txt");
    }

    #[test]
    fn report_error_is_fatal_when_not_interactive() {
        let mut env = TestEnv::new();
        let error = Error {
            cause: ErrorCause::ArithmeticNotImplemented,
            location: Location::dummy("$((1))"),
        };
        let status = report_error(&mut env.env, &error);
        assert_eq!(status, Some(ExitStatus::EXP_ERROR));
        assert!(env.stderr().contains("arithmetic expansion not implemented"));

        env.option(Interactive, On);
        let status = report_error(&mut env.env, &error);
        assert_eq!(status, None);
    }

    #[test]
    fn assignment_value_uses_multi_tilde_mode() {
        let mut env = TestEnv::new();
        env.assign(conch_env::variable::HOME, "/h");
        let word: Word = "~:~".parse().unwrap();
        let mut exp_env = env.env();
        let field = expand_single(&mut exp_env, &word, TildeMode::Multi).unwrap();
        assert_eq!(field.value, "/h:/h");
    }
}
