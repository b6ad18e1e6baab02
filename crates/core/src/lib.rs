//! Frame-driven interpreter for line-oriented visual-novel scripts.
//!
//! A script is a list of comma-separated lines. Labels and images are
//! registered once up front; every other line is dispatched by a small
//! state machine that presents messages, waits on time or clicks, offers
//! choices and layers images. Rendering and input go through the
//! [`Graphics`] and [`InputDevice`] traits so the same engine runs in a
//! window or headless.

mod backend;
mod command;
mod config;
mod display;
mod engine;
mod error;
mod headless;
mod input;
mod layout;
mod registry;
mod render;
mod script;
mod trace;
mod validate;

pub use backend::{Color, Graphics, ImageHandle, InputDevice, MouseButtons};
pub use command::{
    Arity, ChoiceCommand, Command, CommandBase, DrawCommand, ImageCommand, JumpCommand,
    LabelCommand, MessageCommand, WaitCommand,
};
pub use config::{
    ChoiceGrid, ConfigError, EngineConfig, ImageLabels, MessageGrid, Palette, RuntimeSettings,
    TextSettings,
};
pub use display::{BoundedList, DrawList};
pub use engine::{ScriptEngine, ScriptState};
pub use error::{CommandError, CommandResult, EngineError, EngineResult};
pub use headless::{DrawCall, HeadlessGraphics, ScriptedInput};
pub use input::{InputAction, InputManager};
pub use layout::{text_units, Layout, Rect};
pub use registry::{ImageRegistry, LabelRegistry};
pub use render::OPAQUE;
pub use script::{tokenize, CommandKind, ScriptLine, ScriptLines, ScriptSource, DELIMITER};
pub use trace::{
    run_headless, ChoiceView, DrawView, EngineSnapshot, FrameTrace, HeadlessRun, MessageView,
    TraceFrame,
};
pub use validate::{validate_script, LineDiagnostic, ValidationReport};
