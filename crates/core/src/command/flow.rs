use crate::error::{CommandError, CommandResult};
use crate::script::{CommandKind, ScriptLine};

use super::{parse_int, Arity, Command, CommandBase};

/// `w, <frames>`: pauses parsing for a number of frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaitCommand {
    base: CommandBase,
    frames: u32,
}

impl WaitCommand {
    /// Negative durations are rejected like any other malformed integer.
    pub fn parse(line_number: usize, script: ScriptLine) -> CommandResult<Self> {
        let base = CommandBase::new(line_number, script);
        base.check_arity(Self::KIND, Self::ARITY)?;
        let token = base.token(1);
        let frames =
            u32::try_from(parse_int(token)?).map_err(|_| CommandError::InvalidInteger {
                token: token.to_string(),
            })?;
        Ok(Self { base, frames })
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl Command for WaitCommand {
    const KIND: CommandKind = CommandKind::Wait;
    const ARITY: Arity = Arity::AtLeast(2);

    fn base(&self) -> &CommandBase {
        &self.base
    }
}

/// `j, <label>`: moves the program counter to a label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JumpCommand {
    base: CommandBase,
}

impl JumpCommand {
    pub fn parse(line_number: usize, script: ScriptLine) -> CommandResult<Self> {
        let base = CommandBase::new(line_number, script);
        base.check_arity(Self::KIND, Self::ARITY)?;
        Ok(Self { base })
    }

    pub fn target(&self) -> &str {
        self.base.token(1)
    }
}

impl Command for JumpCommand {
    const KIND: CommandKind = CommandKind::Jump;
    const ARITY: Arity = Arity::AtLeast(2);

    fn base(&self) -> &CommandBase {
        &self.base
    }
}
