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

//! Shell variables
//!
//! This module provides the variable storage the word expansion reads from and
//! (for the `=` switch) writes to. A [`VariableSet`] maps names to
//! [`Variable`]s and also holds the positional parameters, which back the `@`
//! and `*` parameters. The expansion accesses values through
//! [`VariableSet::lookup`], which resolves a parameter name to a
//! [`Lookup`] describing the scalar or array value and whether the elements
//! are to be concatenated into one field.

use crate::source::Location;
use std::collections::HashMap;
use thiserror::Error;

/// Name of the variable holding the user's home directory
pub const HOME: &str = "HOME";
/// Name of the variable defining the field separator characters
pub const IFS: &str = "IFS";
/// Name of the variable holding the previous working directory
pub const OLDPWD: &str = "OLDPWD";
/// Name of the variable holding the current working directory
pub const PWD: &str = "PWD";
/// Name of the variable counting the depth of nested shells
pub const SHLVL: &str = "SHLVL";

/// Value of a variable
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    /// Single string value
    Scalar(String),
    /// Array of zero or more strings
    Array(Vec<String>),
}

pub use Value::*;

impl Value {
    /// Creates a scalar value.
    #[must_use]
    pub fn scalar<S: Into<String>>(value: S) -> Self {
        Scalar(value.into())
    }

    /// Creates an array value.
    #[must_use]
    pub fn array<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Array(values.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::scalar(value)
    }
}
impl From<String> for Value {
    fn from(value: String) -> Self {
        Scalar(value)
    }
}

/// Definition of a variable
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Variable {
    /// Value of the variable
    ///
    /// The value is `None` if the variable has been declared without
    /// assignment.
    pub value: Option<Value>,

    /// Optional location of the assignment that gave the current value
    pub last_assigned_location: Option<Location>,

    /// Whether this variable is exported to the environment of child processes
    pub is_exported: bool,

    /// Optional location where this variable was made read-only
    ///
    /// `None` means the variable is not read-only.
    pub read_only_location: Option<Location>,
}

impl Variable {
    /// Creates a new scalar variable from a string.
    #[must_use]
    pub fn new<S: Into<String>>(value: S) -> Self {
        Variable {
            value: Some(Value::scalar(value)),
            ..Default::default()
        }
    }

    /// Whether this variable is read-only
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only_location.is_some()
    }
}

/// Error that occurs when assigning to a read-only variable
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("cannot assign to read-only variable `{name}`")]
pub struct AssignError {
    /// Name of the variable
    pub name: String,
    /// Location where the variable was made read-only
    pub read_only_location: Location,
}

/// Result of looking up a parameter
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Lookup {
    /// The parameter is not set.
    Unset,
    /// The parameter has a single string value.
    Scalar(String),
    /// The parameter has zero or more values.
    Array {
        /// Values of the parameter
        values: Vec<String>,
        /// Whether the values are joined into a single field with the first
        /// `IFS` character when expanded
        concat: bool,
    },
}

/// Collection of variables and positional parameters
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VariableSet {
    variables: HashMap<String, Variable>,
    positional_params: Vec<String>,
}

impl VariableSet {
    /// Creates an empty variable set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the variable with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Returns the value of the given scalar variable.
    ///
    /// Returns `None` if the variable is unset or an array.
    #[must_use]
    pub fn get_scalar(&self, name: &str) -> Option<&str> {
        match &self.get(name)?.value {
            Some(Scalar(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the positional parameters.
    #[must_use]
    pub fn positional_params(&self) -> &[String] {
        &self.positional_params
    }

    /// Replaces the positional parameters.
    pub fn set_positional_params<I, S>(&mut self, params: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positional_params = params.into_iter().map(Into::into).collect();
    }

    /// Resolves a parameter name to its value.
    ///
    /// `@` and `*` resolve to the positional parameters; `*` additionally
    /// requests concatenation. A decimal name resolves to a single positional
    /// parameter, counted from 1. Any other name resolves to the so-named
    /// variable; array variables expand to one field per element.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Lookup {
        match name {
            "@" | "*" => Lookup::Array {
                values: self.positional_params.clone(),
                concat: name == "*",
            },
            _ if name.chars().all(|c| c.is_ascii_digit()) && !name.is_empty() => {
                match name.parse::<usize>() {
                    Ok(index) if index >= 1 => match self.positional_params.get(index - 1) {
                        Some(value) => Lookup::Scalar(value.clone()),
                        None => Lookup::Unset,
                    },
                    _ => Lookup::Unset,
                }
            }
            _ => match self.get(name).and_then(|v| v.value.as_ref()) {
                None => Lookup::Unset,
                Some(Scalar(value)) => Lookup::Scalar(value.clone()),
                Some(Array(values)) => Lookup::Array {
                    values: values.clone(),
                    concat: false,
                },
            },
        }
    }

    /// Assigns a value to the named variable, creating it if necessary.
    ///
    /// On success, returns the previous value. Fails if the variable is
    /// read-only.
    pub fn assign<V: Into<Value>>(
        &mut self,
        name: &str,
        value: V,
        location: Option<Location>,
    ) -> Result<Option<Value>, AssignError> {
        let variable = self.variables.entry(name.to_owned()).or_default();
        if let Some(read_only_location) = &variable.read_only_location {
            return Err(AssignError {
                name: name.to_owned(),
                read_only_location: read_only_location.clone(),
            });
        }
        let old_value = std::mem::replace(&mut variable.value, Some(value.into()));
        variable.last_assigned_location = location;
        Ok(old_value)
    }

    /// Makes the named variable read-only.
    pub fn make_read_only(&mut self, name: &str, location: Location) {
        let variable = self.variables.entry(name.to_owned()).or_default();
        variable.read_only_location.get_or_insert(location);
    }
}

/// Tests whether the given character may appear in a variable name.
#[must_use]
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tests whether the given string is a valid variable name.
///
/// A valid name is non-empty, consists of ASCII alphanumerics and
/// underscores, and does not start with a digit.
#[must_use]
pub fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_name_char(c) && !c.is_ascii_digit() => chars.all(is_name_char),
        _ => false,
    }
}
