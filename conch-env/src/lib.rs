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

//! Shell execution environment interface
//!
//! This crate defines the state the parser and the word expansion operate
//! on: [variables](variable), [shell options](option), [source code
//! positions](source), [execution result types](semantics), and the
//! [`System`] trait that abstracts the operating system behind the
//! expansion's collaborator contracts.
//!
//! The whole environment is bundled in the [`Env`] struct, which the word
//! expansion takes a mutable reference to.

pub mod option;
pub mod semantics;
pub mod source;
pub mod system;
pub mod variable;

#[doc(no_inline)]
pub use crate::system::System;

use crate::option::OptionSet;
use crate::system::VirtualSystem;
use crate::variable::VariableSet;

/// Collection of the state the shell core operates on
#[derive(Debug)]
pub struct Env {
    /// Shell variables and positional parameters
    pub variables: VariableSet,

    /// Shell option states
    pub options: OptionSet,

    /// Interface to the underlying system
    pub system: Box<dyn System>,
}

impl Env {
    /// Creates a new environment with the given system.
    #[must_use]
    pub fn with_system(system: Box<dyn System>) -> Env {
        Env {
            variables: VariableSet::new(),
            options: OptionSet::default(),
            system,
        }
    }

    /// Creates a new environment with a [`VirtualSystem`], for testing.
    #[must_use]
    pub fn new_virtual() -> Env {
        Env::with_system(Box::new(VirtualSystem::new()))
    }
}
