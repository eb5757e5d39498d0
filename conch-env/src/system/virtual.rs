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

//! System simulated in memory
//!
//! [`VirtualSystem`] provides a deterministic [`System`] implementation for
//! tests: a file system represented as a set of paths, a home-directory
//! table, and a captured standard error stream. The state is shared behind
//! `Rc<RefCell<_>>` so a test can keep a handle to it while the environment
//! owns the system.

use super::{Errno, System};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

/// State of a [`VirtualSystem`]
#[derive(Clone, Debug, Default)]
pub struct SystemState {
    /// Existing regular files, identified by path
    ///
    /// Directories are implied: every path prefix of a saved file names a
    /// directory.
    pub file_system: BTreeSet<String>,

    /// Map from user names to home directories
    pub home_dirs: HashMap<String, String>,

    /// Everything written to the standard error so far
    pub stderr: String,
}

impl SystemState {
    /// Registers a regular file in the file system.
    pub fn save_file<S: Into<String>>(&mut self, path: S) {
        self.file_system.insert(path.into());
    }

    fn is_directory(&self, path: &str) -> bool {
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            return true;
        }
        let prefix = format!("{path}/");
        self.file_system.iter().any(|f| f.starts_with(&prefix))
    }
}

/// Simulated [`System`] for testing
#[derive(Clone, Debug, Default)]
pub struct VirtualSystem {
    /// State of the system, shared with the creator
    pub state: Rc<RefCell<SystemState>>,
}

impl VirtualSystem {
    /// Creates a virtual system with an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for VirtualSystem {
    fn getpwnam_dir(&self, user: &str) -> Option<String> {
        self.state.borrow().home_dirs.get(user).cloned()
    }

    fn read_dir(&self, dir: &str) -> Result<Vec<String>, Errno> {
        let state = self.state.borrow();

        // "." stands for the top of the relative-path namespace.
        let prefix = match dir {
            "." => String::new(),
            "/" => "/".to_string(),
            _ => {
                if !state.is_directory(dir) {
                    return Err(Errno::ENOENT);
                }
                format!("{}/", dir.trim_end_matches('/'))
            }
        };

        let mut names = BTreeSet::new();
        for path in &state.file_system {
            if prefix.is_empty() && path.starts_with('/') {
                continue;
            }
            if let Some(rest) = path.strip_prefix(&prefix) {
                let name = rest.split('/').next().unwrap_or(rest);
                if !name.is_empty() {
                    names.insert(name.to_string());
                }
            }
        }
        Ok(names.into_iter().collect())
    }

    fn is_directory(&self, path: &str) -> bool {
        self.state.borrow().is_directory(path)
    }

    fn file_exists(&self, path: &str) -> bool {
        let state = self.state.borrow();
        if let Some(dir) = path.strip_suffix('/') {
            return state.is_directory(dir);
        }
        state.file_system.contains(path) || state.is_directory(path)
    }

    fn print_error(&mut self, message: &str) {
        self.state.borrow_mut().stderr.push_str(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system_with_files<const N: usize>(paths: [&str; N]) -> VirtualSystem {
        let system = VirtualSystem::new();
        {
            let mut state = system.state.borrow_mut();
            for path in paths {
                state.save_file(path);
            }
        }
        system
    }

    #[test]
    fn read_dir_of_relative_root() {
        let system = system_with_files(["foo.txt", "bar/baz", "/abs"]);
        assert_eq!(system.read_dir(".").unwrap(), ["bar", "foo.txt"]);
    }

    #[test]
    fn read_dir_of_absolute_root() {
        let system = system_with_files(["/a/b", "/c", "rel"]);
        assert_eq!(system.read_dir("/").unwrap(), ["a", "c"]);
    }

    #[test]
    fn read_dir_of_subdirectory() {
        let system = system_with_files(["a/b/c", "a/b/d", "a/e"]);
        assert_eq!(system.read_dir("a").unwrap(), ["b", "e"]);
        assert_eq!(system.read_dir("a/b").unwrap(), ["c", "d"]);
    }

    #[test]
    fn read_dir_of_missing_directory() {
        let system = system_with_files(["a/b"]);
        assert_eq!(system.read_dir("c"), Err(Errno::ENOENT));
    }

    #[test]
    fn existence_checks() {
        let system = system_with_files(["a/b/c"]);
        assert!(system.file_exists("a/b/c"));
        assert!(system.file_exists("a/b"));
        assert!(system.file_exists("a/b/"));
        assert!(system.is_directory("a"));
        assert!(!system.is_directory("a/b/c"));
        assert!(!system.file_exists("a/x"));
    }

    #[test]
    fn captured_stderr() {
        let mut system = VirtualSystem::new();
        let state = Rc::clone(&system.state);
        system.print_error("oops\n");
        assert_eq!(state.borrow().stderr, "oops\n");
    }

    #[test]
    fn home_directories() {
        let system = VirtualSystem::new();
        system
            .state
            .borrow_mut()
            .home_dirs
            .insert("alice".to_string(), "/home/alice".to_string());
        assert_eq!(system.getpwnam_dir("alice"), Some("/home/alice".to_string()));
        assert_eq!(system.getpwnam_dir("bob"), None);
    }
}
