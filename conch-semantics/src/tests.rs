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

//! Utilities for unit tests

use crate::expansion::Env;
use crate::runtime::Runtime;
use conch_env::option::{Option, State};
use conch_env::system::r#virtual::SystemState;
use conch_env::system::{Errno, VirtualSystem};
use conch_env::variable::Value;
use conch_syntax::syntax::List;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// `Runtime` implementation returning canned command substitution outputs
///
/// Outputs are keyed by the display form of the command list. Commands with
/// no registered output fail with a non-zero errno.
#[derive(Debug, Default)]
pub struct FixedRuntime {
    pub outputs: HashMap<String, String>,
}

impl Runtime for FixedRuntime {
    fn command_substitution(
        &mut self,
        _env: &mut conch_env::Env,
        command: &List,
    ) -> Result<String, Errno> {
        self.outputs
            .get(&command.to_string())
            .cloned()
            .ok_or(Errno::ENOENT)
    }
}

/// Test environment bundling a virtual system, a canned runtime, and
/// convenience setters
#[derive(Debug)]
pub struct TestEnv {
    pub env: conch_env::Env,
    pub runtime: FixedRuntime,
    pub state: Rc<RefCell<SystemState>>,
}

impl TestEnv {
    pub fn new() -> Self {
        let system = VirtualSystem::new();
        let state = Rc::clone(&system.state);
        TestEnv {
            env: conch_env::Env::with_system(Box::new(system)),
            runtime: FixedRuntime::default(),
            state,
        }
    }

    /// Borrows this test environment as an expansion environment.
    pub fn env(&mut self) -> Env<'_> {
        Env::new(&mut self.env, &mut self.runtime)
    }

    /// Assigns a scalar variable.
    pub fn assign<V: Into<Value>>(&mut self, name: &str, value: V) {
        self.env
            .variables
            .assign(name, value, None)
            .expect("assignment in test setup");
    }

    /// Sets the positional parameters.
    pub fn positional<const N: usize>(&mut self, params: [&str; N]) {
        self.env.variables.set_positional_params(params);
    }

    /// Sets a shell option.
    pub fn option(&mut self, option: Option, state: State) {
        self.env.options.set(option, state);
    }

    /// Registers a file in the virtual file system.
    pub fn save_file(&mut self, path: &str) {
        self.state.borrow_mut().save_file(path);
    }

    /// Registers a user's home directory.
    pub fn home_dir(&mut self, user: &str, dir: &str) {
        self.state
            .borrow_mut()
            .home_dirs
            .insert(user.to_string(), dir.to_string());
    }

    /// Registers the output of a command substitution.
    pub fn command_output(&mut self, command: &str, output: &str) {
        self.runtime
            .outputs
            .insert(command.to_string(), output.to_string());
    }

    /// Returns everything printed to the standard error so far.
    pub fn stderr(&self) -> String {
        self.state.borrow().stderr.clone()
    }
}
