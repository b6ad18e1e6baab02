//! Typed script commands.
//!
//! Construction is two-phase. `parse` keeps the raw line and runs the arity
//! and content checks; fields that depend on interpreter state (screen area,
//! resolved targets, image handles) are assigned afterwards by the engine.

mod choice;
mod draw;
mod flow;
mod image;
mod label;
mod message;

pub use choice::ChoiceCommand;
pub use draw::DrawCommand;
pub use flow::{JumpCommand, WaitCommand};
pub use image::ImageCommand;
pub use label::LabelCommand;
pub use message::MessageCommand;

use std::fmt;

use crate::error::{CommandError, CommandResult};
use crate::script::{CommandKind, ScriptLine};

/// Token count a command accepts, discriminator included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(expected) => count == expected,
            Arity::AtLeast(minimum) => count >= minimum,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Originating line number and tokens shared by every command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandBase {
    line_number: usize,
    script: ScriptLine,
}

impl CommandBase {
    pub fn new(line_number: usize, script: ScriptLine) -> Self {
        Self {
            line_number,
            script,
        }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn script(&self) -> &ScriptLine {
        &self.script
    }

    /// Token `index`; only meaningful once the arity check passed.
    pub fn token(&self, index: usize) -> &str {
        self.script.token(index).unwrap_or_default()
    }

    pub fn check_arity(&self, kind: CommandKind, arity: Arity) -> CommandResult<()> {
        let found = self.script.len();
        if arity.accepts(found) {
            Ok(())
        } else {
            Err(CommandError::Arity {
                kind,
                expected: arity,
                found,
            })
        }
    }
}

/// Capability shared by the typed commands.
pub trait Command {
    const KIND: CommandKind;
    const ARITY: Arity;

    fn base(&self) -> &CommandBase;

    fn line_number(&self) -> usize {
        self.base().line_number()
    }
}

pub(crate) fn parse_int(token: &str) -> CommandResult<i32> {
    token.parse().map_err(|_| CommandError::InvalidInteger {
        token: token.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/command_tests.rs"]
mod tests;
