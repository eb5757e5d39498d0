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

//! Definition of `Runtime`
//!
//! The word expansion needs one capability it cannot provide itself: running
//! a command and capturing its output for command substitution. That
//! capability belongs to the command execution layer, which sits above this
//! crate. The [`Runtime`] trait is the narrow contract through which the
//! expansion reaches it.

use conch_env::system::Errno;
use conch_syntax::syntax::List;
use std::fmt::Debug;

/// Runtime support the word expansion requires from the surrounding shell
pub trait Runtime: Debug {
    /// Runs the command list in a subshell and returns its standard output.
    ///
    /// The call blocks until the command finishes. The returned string is the
    /// raw output; the expansion trims trailing newlines itself.
    fn command_substitution(
        &mut self,
        env: &mut conch_env::Env,
        command: &List,
    ) -> Result<String, Errno>;
}
