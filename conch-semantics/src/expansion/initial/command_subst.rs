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

//! Expansion of command substitutions

use super::super::{Env, Error, ErrorCause};
use conch_env::source::Location;
use conch_syntax::syntax::List;

/// Runs the command substitution and returns its output.
///
/// The command is run through the [`Runtime`](crate::runtime::Runtime)
/// collaborator; the call blocks until the command finishes. Trailing
/// newlines are removed from the output.
pub fn expand(env: &mut Env, command: &List, location: &Location) -> Result<String, Error> {
    match env.runtime.command_substitution(env.inner, command) {
        Ok(mut output) => {
            output.truncate(output.trim_end_matches('\n').len());
            Ok(output)
        }
        Err(errno) => Err(Error {
            cause: ErrorCause::CommandSubstError(errno),
            location: location.clone(),
        }),
    }
}
