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

//! Initial expansion
//!
//! The initial expansion is the first stage of the pipeline: tilde
//! expansion, parameter expansion and command substitution, driven per word
//! by [`word::expand_word_units`]. Its result is a list of attributed
//! character strings that the brace expansion, field splitting and pathname
//! expansion stages refine into the final fields.

pub mod command_subst;
pub mod param;
pub mod tilde;
pub mod word;
