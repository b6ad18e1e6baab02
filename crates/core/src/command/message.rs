use crate::error::{CommandError, CommandResult};
use crate::layout::Rect;
use crate::script::{CommandKind, ScriptLine};

use super::{Arity, Command, CommandBase};

/// `m, <text>`: one line of dialogue, revealed left to right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageCommand {
    base: CommandBase,
    text: String,
    area: Rect,
    right_goal: i32,
}

impl MessageCommand {
    pub fn parse(line_number: usize, script: ScriptLine) -> CommandResult<Self> {
        let base = CommandBase::new(line_number, script);
        base.check_arity(Self::KIND, Self::ARITY)?;
        let text = base.script().rest_from(1);
        if text.is_empty() {
            return Err(CommandError::EmptyMessage);
        }
        Ok(Self {
            base,
            text,
            area: Rect::default(),
            right_goal: 0,
        })
    }

    /// Assigns the screen slot and the fully revealed right edge.
    pub fn place(&mut self, area: Rect, right_goal: i32) {
        self.area = area;
        self.right_goal = right_goal;
    }

    /// Moves to another slot, keeping how much has been revealed.
    pub fn move_to(&mut self, slot: Rect) {
        let revealed = self.area.width();
        self.right_goal += slot.left - self.area.left;
        self.area = Rect::new(slot.left, slot.top, slot.left + revealed, slot.bottom);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Currently visible region.
    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn right_goal(&self) -> i32 {
        self.right_goal
    }

    pub fn is_revealed(&self) -> bool {
        self.area.right >= self.right_goal
    }

    pub fn advance_reveal(&mut self, step: i32) {
        self.area.right = (self.area.right + step).min(self.right_goal);
    }

    pub fn reveal_all(&mut self) {
        self.area.right = self.right_goal;
    }
}

impl Command for MessageCommand {
    const KIND: CommandKind = CommandKind::Message;
    const ARITY: Arity = Arity::AtLeast(2);

    fn base(&self) -> &CommandBase {
        &self.base
    }
}
