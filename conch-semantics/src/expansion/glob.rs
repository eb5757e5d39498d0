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

//! Pathname expansion
//!
//! Pathname expansion scans directories for pathnames matching the fields
//! that contain an unquoted pattern character. The field is split at slashes
//! and each component is matched against directory entries through the
//! [`System`](conch_env::System) collaborator; components without pattern
//! characters are used verbatim without scanning. Matches are returned
//! sorted. When nothing matches, the field is kept as the literal pattern,
//! or dropped entirely under the `nullglob` option.
//!
//! Quoted characters and characters produced by tilde or brace-sequence
//! expansion are matched literally; characters produced by parameter
//! expansion or command substitution are pattern syntax, like literal ones.

use super::attr::{AttrChar, AttrField, Origin, Strip, skip_quotes};
use conch_env::option::{DotGlob, ExtendedGlob, Glob, MarkDirs, NullGlob, Off, On};
use conch_env::semantics::Field;
use conch_env::source::Location;
use conch_fnmatch::{Config, Pattern, PatternChar};

/// Performs pathname expansion on each field, producing the final fields.
///
/// This is the last step of the multi-field expansion; the returned fields
/// have gone through quote removal and attribute stripping.
pub fn glob_fields(env: &conch_env::Env, fields: Vec<AttrField>) -> Vec<Field> {
    let mut results = Vec::new();
    for field in fields {
        if env.options.get(Glob) == Off || !has_pattern_chars(&field.chars) {
            results.push(field.remove_quotes_and_strip());
            continue;
        }
        let matches = glob_matches(env, &field);
        if matches.is_empty() {
            if env.options.get(NullGlob) == Off {
                results.push(field.remove_quotes_and_strip());
            }
        } else {
            results.extend(matches);
        }
    }
    results
}

/// Whether the field contains a character that triggers pathname expansion
pub fn has_pattern_chars(chars: &[AttrChar]) -> bool {
    chars.iter().any(|c| {
        matches!(c.value, '*' | '?' | '[')
            && !c.is_quoted
            && !c.is_quoting
            && c.origin != Origin::HardExpansion
    })
}

/// Matches the field against the file system, returning the sorted matches.
///
/// An empty result means nothing matched; the caller decides between keeping
/// the literal and dropping the field.
pub fn glob_matches(env: &conch_env::Env, field: &AttrField) -> Vec<Field> {
    let mut search = SearchEnv {
        env,
        period: env.options.get(DotGlob) == Off,
        case_fold: env.options.get(conch_env::option::CaseGlob) == Off,
        mark_dirs: env.options.get(MarkDirs) == On,
        extended: env.options.get(ExtendedGlob) == On,
        prefix: String::new(),
        origin: field.origin.clone(),
        results: Vec::new(),
    };
    search.search_dir(&field.chars);
    let mut results = search.results;
    results.sort_unstable_by(|a, b| a.value.cmp(&b.value));
    results
}

struct SearchEnv<'e> {
    env: &'e conch_env::Env,
    period: bool,
    case_fold: bool,
    mark_dirs: bool,
    extended: bool,
    /// Path assembled so far
    prefix: String,
    origin: Location,
    results: Vec<Field>,
}

impl SearchEnv<'_> {
    /// Directory to scan for the current prefix
    fn dir_path(&self) -> &str {
        if self.prefix.is_empty() {
            "."
        } else {
            let trimmed = self.prefix.trim_end_matches('/');
            if trimmed.is_empty() { "/" } else { trimmed }
        }
    }

    /// Recursively searches directories for matching pathnames.
    ///
    /// `suffix` is the remaining part of the field, starting at the current
    /// path component.
    fn search_dir(&mut self, suffix: &[AttrChar]) {
        let (this, rest) = match suffix.iter().position(|c| c.value == '/') {
            None => (suffix, None),
            Some(index) => (&suffix[..index], Some(&suffix[index + 1..])),
        };

        if self.extended && is_double_star(this) {
            if let Some(rest) = rest {
                self.search_descendants(rest);
                return;
            }
        }

        match self.to_pattern(this) {
            // A malformed pattern component matches only itself.
            Err(_) => {
                let literal: String = skip_quotes(this.iter().copied()).strip().collect();
                self.push_component(rest, |prefix| prefix.push_str(&literal));
            }
            Ok(pattern) => match pattern.to_literal() {
                Some(literal) => {
                    self.push_component(rest, |prefix| prefix.push_str(&literal));
                }
                None => {
                    let Ok(names) = self.env.system.read_dir(self.dir_path()) else {
                        return;
                    };
                    for name in names {
                        if pattern.is_match(&name) {
                            self.push_component(rest, |prefix| prefix.push_str(&name));
                        }
                    }
                }
            },
        }
    }

    /// Matches the rest of the field in this directory and in every
    /// descendant directory (the `**` component).
    fn search_descendants(&mut self, suffix: &[AttrChar]) {
        self.search_dir(suffix);

        let Ok(names) = self.env.system.read_dir(self.dir_path()) else {
            return;
        };
        for name in names {
            if self.period && name.starts_with('.') {
                continue;
            }
            let old_len = self.prefix.len();
            self.prefix.push_str(&name);
            if self.env.system.is_directory(&self.prefix) {
                self.prefix.push('/');
                self.search_descendants(suffix);
            }
            self.prefix.truncate(old_len);
        }
    }

    /// Appends a component to the prefix, then continues with the rest of
    /// the field or records a result.
    fn push_component<F>(&mut self, rest: Option<&[AttrChar]>, push: F)
    where
        F: FnOnce(&mut String),
    {
        let old_len = self.prefix.len();
        push(&mut self.prefix);

        match rest {
            None => {
                if self.env.system.file_exists(&self.prefix) {
                    let mut value = self.prefix.clone();
                    if self.mark_dirs
                        && !value.ends_with('/')
                        && self.env.system.is_directory(&value)
                    {
                        value.push('/');
                    }
                    self.results.push(Field {
                        value,
                        origin: self.origin.clone(),
                    });
                }
            }
            Some(rest) => {
                self.prefix.push('/');
                self.search_dir(rest);
            }
        }

        self.prefix.truncate(old_len);
    }

    /// Compiles one path component into a pattern.
    fn to_pattern(&self, component: &[AttrChar]) -> Result<Pattern, conch_fnmatch::Error> {
        let chars = component.iter().filter_map(|c| {
            if c.is_quoting {
                None
            } else if c.is_quoted || c.origin == Origin::HardExpansion {
                Some(PatternChar::Literal(c.value))
            } else {
                Some(PatternChar::Normal(c.value))
            }
        });
        let mut config = Config::default();
        config.period = self.period;
        config.case_fold = self.case_fold;
        Pattern::parse_with_config(chars, config)
    }
}

/// Whether the component is an unquoted literal `**`
fn is_double_star(component: &[AttrChar]) -> bool {
    component.len() == 2 && component.iter().all(|c| c.value == '*' && c.is_syntactic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::TestEnv;

    fn soft_or_literal_field(s: &str) -> AttrField {
        let chars = s
            .chars()
            .map(|c| AttrChar {
                value: c,
                origin: Origin::Literal,
                is_quoted: false,
                is_quoting: false,
            })
            .collect();
        AttrField {
            chars,
            origin: Location::dummy(s),
        }
    }

    fn glob(env: &TestEnv, s: &str) -> Vec<String> {
        glob_fields(&env.env, vec![soft_or_literal_field(s)])
            .into_iter()
            .map(|f| f.value)
            .collect()
    }

    #[test]
    fn literal_field_skips_the_scan() {
        let env = TestEnv::new();
        assert_eq!(glob(&env, "no-metachars"), ["no-metachars"]);
    }

    #[test]
    fn single_component_matches() {
        let mut env = TestEnv::new();
        env.save_file("foo.exe");
        env.save_file("foo.txt");
        assert_eq!(glob(&env, "foo.*"), ["foo.exe", "foo.txt"]);
        assert_eq!(glob(&env, "*.txt"), ["foo.txt"]);
    }

    #[test]
    fn no_match_keeps_the_pattern() {
        let mut env = TestEnv::new();
        env.save_file("foo.exe");
        assert_eq!(glob(&env, "*.txt"), ["*.txt"]);
    }

    #[test]
    fn no_match_with_nullglob_drops_the_field() {
        let mut env = TestEnv::new();
        env.option(NullGlob, On);
        assert_eq!(glob(&env, "*.txt").len(), 0);
    }

    #[test]
    fn noglob_disables_the_scan() {
        let mut env = TestEnv::new();
        env.save_file("foo.txt");
        env.option(Glob, Off);
        assert_eq!(glob(&env, "*.txt"), ["*.txt"]);
    }

    #[test]
    fn multi_component_patterns() {
        let mut env = TestEnv::new();
        for path in ["a/a/a", "a/a/b", "a/b/a", "b/a/a"] {
            env.save_file(path);
        }
        assert_eq!(glob(&env, "a/?/a"), ["a/a/a", "a/b/a"]);
        assert_eq!(glob(&env, "?/a/*"), ["a/a/a", "a/a/b", "b/a/a"]);
    }

    #[test]
    fn absolute_patterns() {
        let mut env = TestEnv::new();
        env.save_file("/etc/hosts");
        env.save_file("/etc/hostname");
        assert_eq!(glob(&env, "/etc/host*"), ["/etc/hostname", "/etc/hosts"]);
    }

    #[test]
    fn literal_components_are_not_scanned() {
        let mut env = TestEnv::new();
        env.save_file("dir/file.txt");
        assert_eq!(glob(&env, "dir/*.txt"), ["dir/file.txt"]);
    }

    #[test]
    fn leading_dot_needs_dotglob() {
        let mut env = TestEnv::new();
        env.save_file(".hidden");
        env.save_file("visible");
        assert_eq!(glob(&env, "*"), ["visible"]);
        env.option(DotGlob, On);
        assert_eq!(glob(&env, "*"), [".hidden", "visible"]);
    }

    #[test]
    fn case_fold_with_nocaseglob() {
        let mut env = TestEnv::new();
        env.save_file("README");
        assert_eq!(glob(&env, "read*"), ["read*"]);
        env.option(conch_env::option::CaseGlob, Off);
        assert_eq!(glob(&env, "read*"), ["README"]);
    }

    #[test]
    fn mark_dirs_appends_slash() {
        let mut env = TestEnv::new();
        env.save_file("dir/file");
        env.save_file("plain");
        env.option(MarkDirs, On);
        assert_eq!(glob(&env, "*"), ["dir/", "plain"]);
    }

    #[test]
    fn quoted_metacharacters_do_not_glob() {
        let mut env = TestEnv::new();
        env.save_file("foo.x");
        let mut field = soft_or_literal_field("foo.*");
        field.chars[4].is_quoted = true;
        let results = glob_fields(&env.env, vec![field]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].value, "foo.*");
    }

    #[test]
    fn hard_expansion_metacharacters_do_not_glob() {
        let mut env = TestEnv::new();
        env.save_file("foo.x");
        let mut field = soft_or_literal_field("foo.*");
        field.chars[4].origin = Origin::HardExpansion;
        let results = glob_fields(&env.env, vec![field]);
        assert_eq!(results[0].value, "foo.*");
    }

    #[test]
    fn soft_expansion_metacharacters_do_glob() {
        let mut env = TestEnv::new();
        env.save_file("foo.x");
        let mut field = soft_or_literal_field("foo.*");
        for c in &mut field.chars {
            c.origin = Origin::SoftExpansion;
        }
        let results = glob_fields(&env.env, vec![field]);
        assert_eq!(results[0].value, "foo.x");
    }

    #[test]
    fn malformed_component_matches_itself() {
        let mut env = TestEnv::new();
        env.save_file("x");
        assert_eq!(glob(&env, "*[[:bogus:]]*"), ["*[[:bogus:]]*"]);
    }

    #[test]
    fn double_star_recursion() {
        let mut env = TestEnv::new();
        for path in ["a/x.c", "a/b/y.c", "a/b/c/z.c", "a/b/c/w.h"] {
            env.save_file(path);
        }
        env.option(ExtendedGlob, On);
        assert_eq!(
            glob(&env, "a/**/*.c"),
            ["a/b/c/z.c", "a/b/y.c", "a/x.c"]
        );
    }

    #[test]
    fn double_star_without_extendedglob_is_ordinary() {
        let mut env = TestEnv::new();
        env.save_file("a/b/c.txt");
        env.save_file("a/d.txt");
        assert_eq!(glob(&env, "a/**/*.txt"), ["a/b/c.txt"]);
    }
}
