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

//! Tilde expansion semantics

use super::super::Env;
use super::super::TildeMode;
use super::super::attr::{AttrChar, Origin};
use conch_env::option::{Off, PosixlyCorrect};
use conch_env::variable::{HOME, OLDPWD, PWD};

/// Attempts tilde expansion at `chars[start..]`.
///
/// `chars` is the content of a literal word unit and `start` must point at
/// the candidate tilde. The name runs up to the next `/` (or `/` and `:` in
/// [`TildeMode::Multi`]); if no terminator is found and more word units
/// follow, the tilde is not expanded. An empty name expands to `$HOME`, `+`
/// to `$PWD` and `-` to `$OLDPWD` (outside posix mode); any other name is
/// resolved through the password database. A name containing a quote
/// character is never expanded.
///
/// On success, the expansion is appended to `output` as unsplittable
/// [`HardExpansion`](Origin::HardExpansion) characters and the number of
/// input characters consumed is returned. If the tilde does not expand, the
/// function has no effect and returns 0.
pub fn expand(
    env: &Env,
    chars: &[char],
    start: usize,
    has_next_unit: bool,
    mode: TildeMode,
    output: &mut Vec<AttrChar>,
) -> usize {
    if chars.get(start) != Some(&'~') {
        return 0;
    }
    let rest = &chars[start + 1..];

    let is_terminator = |c: &char| *c == '/' || (mode == TildeMode::Multi && *c == ':');
    let name_len = match rest.iter().position(is_terminator) {
        Some(len) => len,
        None if has_next_unit => return 0,
        None => rest.len(),
    };
    let name: String = rest[..name_len].iter().collect();
    if name.contains(['"', '\'', '\\']) {
        return 0;
    }

    let Some(value) = directory_for(env, &name) else {
        return 0;
    };
    if value.is_empty() {
        // A dummy quote keeps the empty result from vanishing in field
        // splitting; quote removal drops it in the end.
        output.push(AttrChar {
            value: '"',
            origin: Origin::HardExpansion,
            is_quoted: false,
            is_quoting: true,
        });
    } else {
        output.extend(value.chars().map(|c| AttrChar {
            value: c,
            origin: Origin::HardExpansion,
            is_quoted: false,
            is_quoting: false,
        }));
    }
    1 + name_len
}

/// Resolves a tilde name to a directory.
fn directory_for(env: &Env, name: &str) -> Option<String> {
    let variables = &env.inner.variables;
    if name.is_empty() {
        return variables.get_scalar(HOME).map(str::to_owned);
    }
    if env.inner.options.get(PosixlyCorrect) == Off {
        match name {
            "+" => return variables.get_scalar(PWD).map(str::to_owned),
            "-" => return variables.get_scalar(OLDPWD).map(str::to_owned),
            _ => (),
        }
    }
    env.inner.system.getpwnam_dir(name)
}
