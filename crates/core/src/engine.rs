//! Script interpreter and presentation state machine.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::backend::{Graphics, ImageHandle, InputDevice};
use crate::command::{
    ChoiceCommand, DrawCommand, ImageCommand, JumpCommand, LabelCommand, MessageCommand,
    WaitCommand,
};
use crate::config::EngineConfig;
use crate::display::{BoundedList, DrawList};
use crate::error::{CommandError, CommandResult, EngineError, EngineResult};
use crate::input::InputManager;
use crate::layout::Layout;
use crate::registry::{ImageRegistry, LabelRegistry};
use crate::script::{CommandKind, ScriptLine, ScriptSource};

/// Presentation state. `End` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptState {
    Parsing,
    TimeWait,
    ClickWait,
    ChoiceWait,
    End,
}

impl ScriptState {
    /// States during which the message reveal animation runs.
    pub fn is_waiting(self) -> bool {
        matches!(
            self,
            ScriptState::TimeWait | ScriptState::ClickWait | ScriptState::ChoiceWait
        )
    }
}

/// What the dispatch loop does after a line.
enum Flow {
    Next,
    Halt,
    Goto(usize),
}

/// Frame-driven interpreter. Owns the script, the registries and every
/// display list; the frame loop lends it graphics and input per call.
pub struct ScriptEngine {
    source: Box<dyn ScriptSource>,
    config: EngineConfig,
    layout: Layout,
    input: InputManager,
    state: ScriptState,
    max_line: usize,
    now_line: usize,
    wait_count: u32,
    cursor_image: ImageHandle,
    click_wait_image: Option<ImageHandle>,
    is_click_wait_visible: bool,
    is_message_output: bool,
    labels: LabelRegistry,
    images: ImageRegistry,
    messages: BoundedList<MessageCommand>,
    choices: BoundedList<ChoiceCommand>,
    draws: DrawList,
}

impl ScriptEngine {
    /// Pre-parses labels and images, resolves the reserved images and
    /// computes the layout.
    #[instrument(skip_all)]
    pub fn initialize<S, G>(
        source: S,
        graphics: &mut G,
        config: EngineConfig,
    ) -> EngineResult<Self>
    where
        S: ScriptSource + 'static,
        G: Graphics + ?Sized,
    {
        let max_line = source.line_count();
        if max_line == 0 {
            return Err(EngineError::EmptyScript);
        }

        let (labels, images) = pre_parse(&source, graphics, |line_number, kind, err| {
            drop_on_error(line_number, kind, Err(err))
        });

        let cursor_image = images.handle_of(&config.images.cursor).ok_or_else(|| {
            EngineError::MissingCursorImage {
                label: config.images.cursor.clone(),
            }
        })?;
        graphics.set_cursor_visible(false);

        let click_wait_image = images.handle_of(&config.images.click_wait);
        if click_wait_image.is_none() {
            warn!(
                label = %config.images.click_wait,
                "click-wait image not registered, icon disabled"
            );
        }

        graphics.set_font_size(config.text.font_size);
        let (width, height) = graphics
            .screen_size()
            .ok_or(EngineError::InvalidScreenMetrics)?;
        let layout =
            Layout::new(&config, width, height).ok_or(EngineError::InvalidScreenMetrics)?;

        info!(
            lines = max_line,
            labels = labels.len(),
            images = images.len(),
            width,
            height,
            "script engine initialized"
        );

        Ok(Self {
            source: Box::new(source),
            messages: BoundedList::new(config.message.line_max),
            choices: BoundedList::new(config.choice.line_max),
            config,
            layout,
            input: InputManager::new(),
            state: ScriptState::Parsing,
            max_line,
            now_line: 0,
            wait_count: 0,
            cursor_image,
            click_wait_image,
            is_click_wait_visible: false,
            is_message_output: false,
            labels,
            images,
            draws: DrawList::default(),
        })
    }

    /// Advances the interpreter by one frame.
    pub fn update<I: InputDevice + ?Sized>(&mut self, device: &I) {
        self.input.update(device);

        let animate = match self.state {
            ScriptState::Parsing => {
                self.parse();
                false
            }
            ScriptState::TimeWait => {
                self.time_wait();
                true
            }
            ScriptState::ClickWait => {
                self.click_wait();
                true
            }
            ScriptState::ChoiceWait => {
                self.choice_wait();
                true
            }
            ScriptState::End => false,
        };

        if animate {
            self.update_message();
        }
    }

    /// True on the frame the exit key was pressed.
    pub fn is_exit(&self) -> bool {
        self.input.is_exit()
    }

    pub fn is_end(&self) -> bool {
        self.state == ScriptState::End
    }

    /// Still parsing, but the program counter ran past the last line.
    pub fn is_exhausted(&self) -> bool {
        self.state == ScriptState::Parsing && self.now_line >= self.max_line
    }

    fn parse(&mut self) {
        let budget = self.config.runtime.max_lines_per_frame.max(1);
        let mut dispatched = 0usize;

        while self.now_line < self.max_line {
            if dispatched == budget {
                warn!(
                    line = self.now_line,
                    budget, "line budget exhausted, resuming next frame"
                );
                return;
            }
            dispatched += 1;

            let line_number = self.now_line;
            let script = self.source.line_at(line_number);
            match self.dispatch(line_number, script) {
                Flow::Next => self.now_line += 1,
                Flow::Halt => {
                    self.now_line += 1;
                    return;
                }
                Flow::Goto(target) => self.now_line = target,
            }
        }
    }

    fn dispatch(&mut self, line_number: usize, script: ScriptLine) -> Flow {
        let Some(kind) = script.kind() else {
            return Flow::Next;
        };

        match kind {
            // Registered during the pre-parse.
            CommandKind::Label | CommandKind::Image => Flow::Next,
            CommandKind::ClickSync => {
                self.on_click_sync();
                Flow::Halt
            }
            CommandKind::Message => {
                let result = self.on_message(line_number, script);
                drop_on_error(line_number, kind, result);
                Flow::Next
            }
            CommandKind::Wait => match WaitCommand::parse(line_number, script) {
                Ok(wait) => {
                    self.wait_count = wait.frames();
                    self.state = ScriptState::TimeWait;
                    Flow::Halt
                }
                Err(err) => {
                    drop_on_error(line_number, kind, Err(err));
                    Flow::Next
                }
            },
            CommandKind::Jump => match self.resolve_jump(line_number, script) {
                Ok(target) => Flow::Goto(target),
                Err(err) => {
                    drop_on_error(line_number, kind, Err(err));
                    Flow::Next
                }
            },
            CommandKind::Choice => {
                let result = self.on_choice(line_number, script);
                drop_on_error(line_number, kind, result);
                Flow::Next
            }
            CommandKind::Draw => {
                let result = self.on_draw(line_number, script);
                drop_on_error(line_number, kind, result);
                Flow::Next
            }
            CommandKind::End => {
                info!(line = line_number, "script reached end");
                self.state = ScriptState::End;
                Flow::Halt
            }
        }
    }

    fn on_click_sync(&mut self) {
        self.state = if self.choices.is_empty() {
            ScriptState::ClickWait
        } else {
            ScriptState::ChoiceWait
        };
    }

    fn on_message(&mut self, line_number: usize, script: ScriptLine) -> CommandResult<()> {
        let mut message = MessageCommand::parse(line_number, script)?;
        let area = self.layout.message_slot(self.messages.next_slot());
        let right_goal = self.layout.message_right_goal(message.text());
        message.place(area, right_goal);

        if self.messages.push(message).is_some() {
            for (slot, entry) in self.messages.iter_mut().enumerate() {
                entry.move_to(self.layout.message_slot(slot));
            }
        }
        self.is_message_output = true;
        Ok(())
    }

    fn resolve_jump(&self, line_number: usize, script: ScriptLine) -> CommandResult<usize> {
        let jump = JumpCommand::parse(line_number, script)?;
        self.labels
            .line_of(jump.target())
            .ok_or_else(|| CommandError::UnknownLabel(jump.target().to_string()))
    }

    fn on_choice(&mut self, line_number: usize, script: ScriptLine) -> CommandResult<()> {
        let mut choice = ChoiceCommand::parse(line_number, script)?;
        let target_line = self
            .labels
            .line_of(choice.label())
            .ok_or_else(|| CommandError::UnknownLabel(choice.label().to_string()))?;
        let area = self.layout.choice_slot(self.choices.next_slot());
        choice.place(area, target_line, self.config.palette.choice_normal);

        if self.choices.push(choice).is_some() {
            for (slot, entry) in self.choices.iter_mut().enumerate() {
                entry.move_to(self.layout.choice_slot(slot));
            }
        }
        Ok(())
    }

    fn on_draw(&mut self, line_number: usize, script: ScriptLine) -> CommandResult<()> {
        let mut draw = DrawCommand::parse(line_number, script)?;
        let handle = self
            .images
            .handle_of(draw.label())
            .ok_or_else(|| CommandError::UnknownImage(draw.label().to_string()))?;
        draw.bind(handle);
        self.draws.insert(draw);
        Ok(())
    }

    fn time_wait(&mut self) {
        if self.is_message_output {
            return;
        }
        self.wait_count = self.wait_count.saturating_sub(1);
        if self.wait_count == 0 {
            self.state = ScriptState::Parsing;
        }
    }

    fn click_wait(&mut self) {
        if self.is_message_output {
            return;
        }
        if self.input.is_click() {
            self.messages.clear();
            self.state = ScriptState::Parsing;
        }
    }

    fn choice_wait(&mut self) {
        let (x, y) = self.input.cursor();
        let is_click = self.input.is_click();
        let palette = &self.config.palette;

        let mut selected = None;
        for choice in self.choices.iter_mut() {
            if choice.area().contains(x, y) {
                if is_click {
                    selected = Some(choice.target_line());
                    break;
                }
                choice.set_highlight(true, palette.choice_select);
            } else {
                choice.set_highlight(false, palette.choice_normal);
            }
        }

        if let Some(target) = selected {
            debug!(target, "choice selected");
            self.now_line = target;
            self.messages.clear();
            self.choices.clear();
            self.state = ScriptState::Parsing;
        }
    }

    /// One tick of the reveal animation.
    fn update_message(&mut self) {
        let is_click = self.input.is_click();
        let step = self.config.text.font_size;

        for message in self.messages.iter_mut() {
            if is_click {
                message.reveal_all();
                continue;
            }
            if !message.is_revealed() {
                message.advance_reveal(step);
                return;
            }
        }

        self.is_message_output = false;
        self.is_click_wait_visible =
            self.state == ScriptState::ClickWait && self.click_wait_image.is_some();
    }

    pub fn state(&self) -> ScriptState {
        self.state
    }

    /// Program counter.
    pub fn now_line(&self) -> usize {
        self.now_line
    }

    pub fn line_count(&self) -> usize {
        self.max_line
    }

    pub fn wait_count(&self) -> u32 {
        self.wait_count
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.input.cursor()
    }

    pub fn is_message_output(&self) -> bool {
        self.is_message_output
    }

    pub fn is_click_wait_visible(&self) -> bool {
        self.is_click_wait_visible
    }

    pub fn messages(&self) -> &[MessageCommand] {
        self.messages.as_slice()
    }

    pub fn choices(&self) -> &[ChoiceCommand] {
        self.choices.as_slice()
    }

    pub fn draws(&self) -> &[DrawCommand] {
        self.draws.as_slice()
    }

    pub fn labels(&self) -> &LabelRegistry {
        &self.labels
    }

    pub fn images(&self) -> &ImageRegistry {
        &self.images
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cursor_image(&self) -> ImageHandle {
        self.cursor_image
    }

    pub fn click_wait_image(&self) -> Option<ImageHandle> {
        self.click_wait_image
    }
}

/// Scans the whole script once, registering every valid label and image.
/// Rejected label and image lines are handed to `on_drop`.
pub(crate) fn pre_parse<S, G, F>(
    source: &S,
    graphics: &mut G,
    mut on_drop: F,
) -> (LabelRegistry, ImageRegistry)
where
    S: ScriptSource + ?Sized,
    G: Graphics + ?Sized,
    F: FnMut(usize, CommandKind, CommandError),
{
    let mut labels = LabelRegistry::default();
    let mut images = ImageRegistry::default();

    for line_number in 0..source.line_count() {
        let script = source.line_at(line_number);
        match script.kind() {
            Some(CommandKind::Label) => match LabelCommand::parse(line_number, script) {
                Ok(label) => labels.push(label),
                Err(err) => on_drop(line_number, CommandKind::Label, err),
            },
            Some(CommandKind::Image) => {
                match ImageCommand::parse(line_number, script, graphics) {
                    Ok(image) => images.push(image),
                    Err(err) => on_drop(line_number, CommandKind::Image, err),
                }
            }
            _ => {}
        }
    }

    (labels, images)
}

fn drop_on_error(line_number: usize, kind: CommandKind, result: CommandResult<()>) {
    if let Err(err) = result {
        debug!(line = line_number, %kind, %err, "command dropped");
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
