use crate::error::CommandResult;
use crate::script::{CommandKind, ScriptLine};

use super::{Arity, Command, CommandBase};

/// `l, <name>`: marks a jump target at its own line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelCommand {
    base: CommandBase,
}

impl LabelCommand {
    pub fn parse(line_number: usize, script: ScriptLine) -> CommandResult<Self> {
        let base = CommandBase::new(line_number, script);
        base.check_arity(Self::KIND, Self::ARITY)?;
        Ok(Self { base })
    }

    pub fn name(&self) -> &str {
        self.base.token(1)
    }
}

impl Command for LabelCommand {
    const KIND: CommandKind = CommandKind::Label;
    const ARITY: Arity = Arity::Exactly(2);

    fn base(&self) -> &CommandBase {
        &self.base
    }
}
