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

//! Shell language syntax and parser
//!
//! This crate defines the abstract syntax tree of the shell command language
//! ([`syntax`]), the parser producing it ([`parser`]), and pretty-printed
//! diagnostics referencing the source code ([`source::pretty`]).
//!
//! ```
//! # use conch_syntax::syntax::List;
//! let list: List = "echo ${HOME:-nowhere} >log".parse().unwrap();
//! assert_eq!(list.to_string(), "echo ${HOME:-nowhere} >log");
//! ```

pub mod parser;
pub mod source;
pub mod syntax;
