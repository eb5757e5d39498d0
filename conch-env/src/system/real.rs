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

//! Implementation of `System` that performs real system calls

use super::{Errno, System};
use std::path::Path;

/// Implementation of [`System`] backed by the underlying operating system
#[derive(Clone, Copy, Debug, Default)]
pub struct RealSystem;

impl System for RealSystem {
    #[cfg(unix)]
    fn getpwnam_dir(&self, user: &str) -> Option<String> {
        use std::ffi::{CStr, CString};
        let name = CString::new(user).ok()?;
        // SAFETY: getpwnam returns a pointer to a statically allocated passwd
        // entry, or null. The entry stays valid until the next getpwnam call,
        // and we copy out of it before returning.
        let passwd = unsafe { libc::getpwnam(name.as_ptr()) };
        if passwd.is_null() {
            return None;
        }
        let dir = unsafe { (*passwd).pw_dir };
        if dir.is_null() {
            return None;
        }
        let dir = unsafe { CStr::from_ptr(dir) };
        Some(dir.to_string_lossy().into_owned())
    }

    #[cfg(not(unix))]
    fn getpwnam_dir(&self, _user: &str) -> Option<String> {
        None
    }

    fn read_dir(&self, dir: &str) -> Result<Vec<String>, Errno> {
        fn to_errno(e: &std::io::Error) -> Errno {
            e.raw_os_error().map(Errno).unwrap_or(Errno::EIO)
        }

        let entries = std::fs::read_dir(dir).map_err(|e| to_errno(&e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| to_errno(&e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn is_directory(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn file_exists(&self, path: &str) -> bool {
        let path = Path::new(path);
        path.symlink_metadata().is_ok()
    }

    fn print_error(&mut self, message: &str) {
        eprint!("{message}");
    }
}
