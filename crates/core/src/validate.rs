//! Offline script checks.
//!
//! Reports every line the interpreter would drop, using the same command
//! constructors and registries as a live run.

use serde::{Deserialize, Serialize};

use crate::backend::Graphics;
use crate::command::{ChoiceCommand, DrawCommand, JumpCommand, MessageCommand, WaitCommand};
use crate::config::EngineConfig;
use crate::engine::pre_parse;
use crate::error::{CommandError, CommandResult};
use crate::registry::{ImageRegistry, LabelRegistry};
use crate::script::{CommandKind, ScriptLine, ScriptSource};

/// One problem found in a script. `line` is `None` for script-wide issues.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiagnostic {
    pub line: Option<usize>,
    pub kind: Option<CommandKind>,
    pub reason: String,
}

impl LineDiagnostic {
    fn command(line: usize, kind: CommandKind, err: &CommandError) -> Self {
        Self {
            line: Some(line),
            kind: Some(kind),
            reason: err.to_string(),
        }
    }
}

/// Registries and diagnostics produced by [`validate_script`].
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    pub labels: LabelRegistry,
    pub images: ImageRegistry,
    pub diagnostics: Vec<LineDiagnostic>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Checks `source` the way [`crate::ScriptEngine::initialize`] and the
/// dispatch loop would see it. Images are loaded through `graphics`.
pub fn validate_script<S, G>(source: &S, graphics: &mut G, config: &EngineConfig) -> ValidationReport
where
    S: ScriptSource + ?Sized,
    G: Graphics + ?Sized,
{
    let mut diagnostics = Vec::new();
    let (labels, images) = pre_parse(source, graphics, |line, kind, err| {
        diagnostics.push(LineDiagnostic::command(line, kind, &err));
    });

    if images.handle_of(&config.images.cursor).is_none() {
        diagnostics.push(LineDiagnostic {
            line: None,
            kind: None,
            reason: format!("cursor image '{}' is not registered", config.images.cursor),
        });
    }

    for line_number in 0..source.line_count() {
        let script = source.line_at(line_number);
        if script.is_empty() {
            continue;
        }
        let Some(kind) = script.kind() else {
            let token = script.token(0).unwrap_or_default().to_string();
            diagnostics.push(LineDiagnostic {
                line: Some(line_number),
                kind: None,
                reason: CommandError::UnknownCommand(token).to_string(),
            });
            continue;
        };
        if let Err(err) = check_line(&labels, &images, line_number, kind, script) {
            diagnostics.push(LineDiagnostic::command(line_number, kind, &err));
        }
    }

    diagnostics.sort_by_key(|diagnostic| diagnostic.line);

    ValidationReport {
        labels,
        images,
        diagnostics,
    }
}

fn check_line(
    labels: &LabelRegistry,
    images: &ImageRegistry,
    line_number: usize,
    kind: CommandKind,
    script: ScriptLine,
) -> CommandResult<()> {
    match kind {
        CommandKind::Label | CommandKind::Image | CommandKind::ClickSync | CommandKind::End => {}
        CommandKind::Message => {
            MessageCommand::parse(line_number, script)?;
        }
        CommandKind::Wait => {
            WaitCommand::parse(line_number, script)?;
        }
        CommandKind::Jump => {
            let jump = JumpCommand::parse(line_number, script)?;
            resolve_label(labels, jump.target())?;
        }
        CommandKind::Choice => {
            let choice = ChoiceCommand::parse(line_number, script)?;
            resolve_label(labels, choice.label())?;
        }
        CommandKind::Draw => {
            let draw = DrawCommand::parse(line_number, script)?;
            if images.handle_of(draw.label()).is_none() {
                return Err(CommandError::UnknownImage(draw.label().to_string()));
            }
        }
    }
    Ok(())
}

fn resolve_label(labels: &LabelRegistry, name: &str) -> CommandResult<usize> {
    labels
        .line_of(name)
        .ok_or_else(|| CommandError::UnknownLabel(name.to_string()))
}
