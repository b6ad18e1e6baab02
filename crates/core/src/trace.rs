//! Observable engine state for deterministic testing and offline traces.
//!
//! A snapshot is the contractual view of the engine: what is on screen and
//! where the program counter sits, without handles or backend details.

use serde::{Deserialize, Serialize};

use crate::backend::MouseButtons;
use crate::engine::{ScriptEngine, ScriptState};
use crate::headless::ScriptedInput;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageView {
    pub text: String,
    /// Revealed width in pixels.
    pub revealed: i32,
    /// Width once fully revealed.
    pub target: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    pub text: String,
    pub target_line: usize,
    pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawView {
    pub index: i32,
    pub label: String,
    pub x: i32,
    pub y: i32,
}

/// Presentation state at the end of a frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub state: ScriptState,
    pub now_line: usize,
    pub wait_count: u32,
    pub message_output: bool,
    pub click_wait_visible: bool,
    pub messages: Vec<MessageView>,
    pub choices: Vec<ChoiceView>,
    pub draws: Vec<DrawView>,
}

impl ScriptEngine {
    pub fn snapshot(&self) -> EngineSnapshot {
        let messages = self
            .messages()
            .iter()
            .map(|message| {
                let left = message.area().left;
                MessageView {
                    text: message.text().to_string(),
                    revealed: message.area().width(),
                    target: message.right_goal() - left,
                }
            })
            .collect();

        let choices = self
            .choices()
            .iter()
            .map(|choice| ChoiceView {
                text: choice.text().to_string(),
                target_line: choice.target_line(),
                highlighted: choice.is_cursor_over(),
            })
            .collect();

        let draws = self
            .draws()
            .iter()
            .map(|draw| {
                let (x, y) = draw.position();
                DrawView {
                    index: draw.index(),
                    label: draw.label().to_string(),
                    x,
                    y,
                }
            })
            .collect();

        EngineSnapshot {
            state: self.state(),
            now_line: self.now_line(),
            wait_count: self.wait_count(),
            message_output: self.is_message_output(),
            click_wait_visible: self.is_click_wait_visible(),
            messages,
            choices,
            draws,
        }
    }
}

/// One recorded frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceFrame {
    pub frame: u32,
    pub snapshot: EngineSnapshot,
}

/// Frames whose snapshot differs from the previous recorded one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameTrace {
    pub frames: Vec<TraceFrame>,
}

impl FrameTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `snapshot` unless it equals the last recorded one.
    pub fn push(&mut self, frame: u32, snapshot: EngineSnapshot) -> bool {
        if self
            .frames
            .last()
            .is_some_and(|last| last.snapshot == snapshot)
        {
            return false;
        }
        self.frames.push(TraceFrame { frame, snapshot });
        true
    }

    pub fn last(&self) -> Option<&EngineSnapshot> {
        self.frames.last().map(|frame| &frame.snapshot)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Input pattern for [`run_headless`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeadlessRun {
    /// Frames to simulate at most.
    pub frames: u32,
    /// Press the left button every `n` frames and release it in between.
    /// Values below 2 never release, so they produce a single press edge.
    pub click_every: Option<u32>,
    /// Choice to hover while waiting on a choice.
    pub choose: Option<usize>,
    /// Stop once the script reaches `e` or runs past its last line.
    pub stop_at_end: bool,
}

impl Default for HeadlessRun {
    fn default() -> Self {
        Self {
            frames: 600,
            click_every: Some(2),
            choose: Some(0),
            stop_at_end: true,
        }
    }
}

impl HeadlessRun {
    fn input_for(&self, frame: u32, engine: &ScriptEngine) -> ScriptedInput {
        let cursor = match (engine.state(), self.choose) {
            (ScriptState::ChoiceWait, Some(index)) => engine
                .choices()
                .get(index)
                .map(|choice| {
                    let area = choice.area();
                    (area.left + area.width() / 2, area.top + area.height() / 2)
                })
                .unwrap_or_else(|| engine.cursor()),
            _ => engine.cursor(),
        };
        let pressed = match self.click_every {
            Some(every) if every >= 2 => (frame + 1) % every == 0,
            Some(_) => true,
            None => false,
        };
        ScriptedInput {
            cursor,
            buttons: if pressed {
                MouseButtons::LEFT
            } else {
                MouseButtons::NONE
            },
            exit: false,
        }
    }
}

/// Drives `engine` without a window, recording every change of state.
pub fn run_headless(engine: &mut ScriptEngine, run: HeadlessRun) -> FrameTrace {
    let mut trace = FrameTrace::new();
    trace.push(0, engine.snapshot());

    for frame in 0..run.frames {
        let input = run.input_for(frame, engine);
        engine.update(&input);
        trace.push(frame + 1, engine.snapshot());
        if run.stop_at_end && (engine.is_end() || engine.is_exhausted()) {
            break;
        }
    }

    trace
}
