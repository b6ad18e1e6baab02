use crate::backend::Color;
use crate::error::CommandResult;
use crate::layout::Rect;
use crate::script::{CommandKind, ScriptLine};

use super::{Arity, Command, CommandBase};

/// `c, <label>, <text>`: a selectable option jumping to `label`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceCommand {
    base: CommandBase,
    text: String,
    area: Rect,
    target_line: usize,
    cursor_over: bool,
    color: Color,
}

impl ChoiceCommand {
    pub fn parse(line_number: usize, script: ScriptLine) -> CommandResult<Self> {
        let base = CommandBase::new(line_number, script);
        base.check_arity(Self::KIND, Self::ARITY)?;
        let text = base.script().rest_from(2);
        Ok(Self {
            base,
            text,
            area: Rect::default(),
            target_line: 0,
            cursor_over: false,
            color: Color::rgb(0, 0, 0),
        })
    }

    pub fn place(&mut self, area: Rect, target_line: usize, color: Color) {
        self.area = area;
        self.target_line = target_line;
        self.color = color;
    }

    pub fn move_to(&mut self, slot: Rect) {
        self.area = slot;
    }

    pub fn set_highlight(&mut self, cursor_over: bool, color: Color) {
        self.cursor_over = cursor_over;
        self.color = color;
    }

    /// Label name the choice jumps to.
    pub fn label(&self) -> &str {
        self.base.token(1)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn target_line(&self) -> usize {
        self.target_line
    }

    pub fn is_cursor_over(&self) -> bool {
        self.cursor_over
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Command for ChoiceCommand {
    const KIND: CommandKind = CommandKind::Choice;
    const ARITY: Arity = Arity::AtLeast(3);

    fn base(&self) -> &CommandBase {
        &self.base
    }
}
