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

//! Implementations of [`std::fmt::Display`] for the shell language syntax
//! types
//!
//! The produced source code is normalized: parameter expansions are always
//! braced and connectors are surrounded by single spaces. Re-parsing the
//! output of `Display` yields a structurally equivalent AST.

use super::*;
use itertools::Itertools;
use std::fmt::{Display, Formatter, Result, Write};

impl Display for Fd {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.0.fmt(f)
    }
}

impl RedirOp {
    const fn as_str(self) -> &'static str {
        use RedirOp::*;
        match self {
            FileIn => "<",
            FileInOut => "<>",
            FileOut => ">",
            FileAppend => ">>",
            FileClobber => ">|",
            FdIn => "<&",
            FdOut => ">&",
        }
    }
}

impl Display for RedirOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.as_str())
    }
}

impl Display for Redir {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if let Some(fd) = self.fd {
            write!(f, "{fd}")?;
        }
        match &self.body {
            RedirBody::Normal { operator, operand } => write!(f, "{operator}{operand}"),
            RedirBody::Close { operator } => write!(f, "{operator}-"),
        }
    }
}

impl Display for SwitchType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        use SwitchType::*;
        f.write_char(match self {
            Alter => '+',
            Default => '-',
            Assign => '=',
            Error => '?',
        })
    }
}

impl Display for ParamExpansion {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str("${")?;
        if self.length {
            f.write_char('#')?;
        }
        if let Some(nested) = &self.nested {
            write!(f, "{nested}")?;
        } else if let Some(name) = &self.name {
            f.write_str(name)?;
        }
        fn word_opt(f: &mut Formatter<'_>, word: &Option<Word>) -> Result {
            match word {
                Some(word) => write!(f, "{word}"),
                None => Ok(()),
            }
        }
        match &self.modifier {
            Modifier::None => (),
            Modifier::Switch(switch) => {
                if self.colon {
                    f.write_char(':')?;
                }
                write!(f, "{}", switch.r#type)?;
                word_opt(f, &switch.word)?;
            }
            Modifier::Trim(trim) => {
                let c = match trim.side {
                    TrimSide::Prefix => '#',
                    TrimSide::Suffix => '%',
                };
                f.write_char(c)?;
                if trim.length == TrimLength::Longest {
                    f.write_char(c)?;
                }
                word_opt(f, &trim.pattern)?;
            }
            Modifier::Subst(subst) => {
                use SubstVariant::*;
                f.write_str(match subst.variant {
                    First => "/",
                    All => "//",
                    Prefix => "/#",
                    Suffix => "/%",
                    Whole => ":/",
                })?;
                word_opt(f, &subst.pattern)?;
                if subst.replacement.is_some() {
                    f.write_char('/')?;
                    word_opt(f, &subst.replacement)?;
                }
            }
        }
        f.write_char('}')
    }
}

impl Display for WordUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Literal(value) => f.write_str(value),
            Param(param) => param.fmt(f),
            CommandSubst(list) => write!(f, "$({list})"),
            Arith(value) => write!(f, "$(({value}))"),
        }
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.units.iter().format(""))
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let mut first = true;
        let mut separate = |f: &mut Formatter<'_>| {
            if first {
                first = false;
                Ok(())
            } else {
                f.write_char(' ')
            }
        };
        match &self.body {
            CommandBody::Simple { words } => {
                for word in words {
                    separate(f)?;
                    word.fmt(f)?;
                }
            }
            CommandBody::Subshell { body } => {
                separate(f)?;
                write!(f, "({body})")?;
            }
        }
        for redir in &self.redirs {
            separate(f)?;
            redir.fmt(f)?;
        }
        Ok(())
    }
}

impl Display for List {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for (i, command) in self.0.iter().enumerate() {
            command.fmt(f)?;
            let last = i + 1 == self.0.len();
            use Connector::*;
            match (command.connector, last) {
                (Sequence, true) => (),
                (Sequence, false) => f.write_str("; ")?,
                (Background, true) => f.write_str(" &")?,
                (Background, false) => f.write_str(" & ")?,
                (Pipe, _) => f.write_str(" | ")?,
                (And, _) => f.write_str(" && ")?,
                (Or, _) => f.write_str(" || ")?,
            }
        }
        Ok(())
    }
}
