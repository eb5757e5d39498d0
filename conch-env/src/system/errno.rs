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

//! Error values
//!
//! This module provides the [`Errno`] type, a thin wrapper around the
//! `errno` value reported by underlying system calls. Compared to
//! [`std::io::Error`], it is lightweight and `Copy`, which suits the
//! low-level [`System`](super::System) functions.

/// Raw error value
pub type RawErrno = i32;

/// Error value
///
/// This is the new type pattern applied to the [raw error value](RawErrno).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct Errno(pub RawErrno);

impl Errno {
    /// Dummy error value that does not equal any real error value
    pub const NO_ERROR: Self = Self(0);
}

#[cfg(unix)]
impl Errno {
    /// Input/output error
    pub const EIO: Self = Self(libc::EIO as _);
    /// No such file or directory
    pub const ENOENT: Self = Self(libc::ENOENT as _);
    /// Function not implemented
    pub const ENOSYS: Self = Self(libc::ENOSYS as _);
}

#[cfg(not(unix))]
impl Errno {
    /// Input/output error
    pub const EIO: Self = Self(5);
    /// No such file or directory
    pub const ENOENT: Self = Self(2);
    /// Function not implemented
    pub const ENOSYS: Self = Self(38);
}

/// Converts [`Errno`] to [`errno::Errno`].
impl From<Errno> for errno::Errno {
    #[inline]
    fn from(errno: Errno) -> Self {
        errno::Errno(errno.0)
    }
}

/// Converts [`errno::Errno`] to [`Errno`].
impl From<errno::Errno> for Errno {
    #[inline]
    fn from(errno: errno::Errno) -> Self {
        Self(errno.0)
    }
}

/// The message is the one the system associates with the error value.
impl std::fmt::Display for Errno {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        errno::Errno::from(*self).fmt(f)
    }
}

impl std::error::Error for Errno {}
