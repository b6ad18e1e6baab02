use crate::backend::{Graphics, ImageHandle};
use crate::error::{CommandError, CommandResult};
use crate::script::{CommandKind, ScriptLine};

use super::{Arity, Command, CommandBase};

/// `i, <label>, <path>`: registers an image under a label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageCommand {
    base: CommandBase,
    handle: ImageHandle,
}

impl ImageCommand {
    /// Checks the arity, then asks `graphics` to load the file. A failed load
    /// rejects the command.
    pub fn parse<G: Graphics + ?Sized>(
        line_number: usize,
        script: ScriptLine,
        graphics: &mut G,
    ) -> CommandResult<Self> {
        let base = CommandBase::new(line_number, script);
        base.check_arity(Self::KIND, Self::ARITY)?;
        let path = base.token(2);
        let handle = graphics
            .load_image(path)
            .ok_or_else(|| CommandError::ImageLoad(path.to_string()))?;
        Ok(Self { base, handle })
    }

    pub fn label(&self) -> &str {
        self.base.token(1)
    }

    pub fn path(&self) -> &str {
        self.base.token(2)
    }

    pub fn handle(&self) -> ImageHandle {
        self.handle
    }
}

impl Command for ImageCommand {
    const KIND: CommandKind = CommandKind::Image;
    const ARITY: Arity = Arity::Exactly(3);

    fn base(&self) -> &CommandBase {
        &self.base
    }
}
