use crate::backend::ImageHandle;
use crate::error::CommandResult;
use crate::script::{CommandKind, ScriptLine};

use super::{parse_int, Arity, Command, CommandBase};

/// `d, <index>, <image label>, <x>, <y>`: shows an image on layer `index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawCommand {
    base: CommandBase,
    index: i32,
    x: i32,
    y: i32,
    handle: Option<ImageHandle>,
}

impl DrawCommand {
    pub fn parse(line_number: usize, script: ScriptLine) -> CommandResult<Self> {
        let base = CommandBase::new(line_number, script);
        base.check_arity(Self::KIND, Self::ARITY)?;
        let index = parse_int(base.token(1))?;
        let x = parse_int(base.token(3))?;
        let y = parse_int(base.token(4))?;
        Ok(Self {
            base,
            index,
            x,
            y,
            handle: None,
        })
    }

    pub fn bind(&mut self, handle: ImageHandle) {
        self.handle = Some(handle);
    }

    /// Layer key: lower indices render first.
    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn label(&self) -> &str {
        self.base.token(2)
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn handle(&self) -> Option<ImageHandle> {
        self.handle
    }
}

impl Command for DrawCommand {
    const KIND: CommandKind = CommandKind::Draw;
    const ARITY: Arity = Arity::Exactly(5);

    fn base(&self) -> &CommandBase {
        &self.base
    }
}
