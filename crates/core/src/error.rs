use std::path::PathBuf;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::command::Arity;
use crate::script::CommandKind;

pub type EngineResult<T> = Result<T, EngineError>;
pub type CommandResult<T> = Result<T, CommandError>;

/// Fatal errors raised while bringing the interpreter up.
#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    #[error("failed to read script '{path}': {source}")]
    #[diagnostic(code("engine.script_io"))]
    ScriptIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("script decode error: {message}")]
    #[diagnostic(code("engine.script_decode"))]
    ScriptDecode {
        message: String,
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
    },
    #[error("script contains no lines")]
    #[diagnostic(
        code("engine.empty_script"),
        help("a script needs at least one line, e.g. 'e' to end immediately")
    )]
    EmptyScript,
    #[error("mandatory cursor image '{label}' is not registered")]
    #[diagnostic(
        code("engine.missing_cursor"),
        help("declare it with 'i, {label}, <path>' and make sure the file loads")
    )]
    MissingCursorImage { label: String },
    #[error("graphics backend reported invalid screen metrics")]
    #[diagnostic(code("engine.screen_metrics"))]
    InvalidScreenMetrics,
}

/// Non-fatal reasons a single script line is dropped.
#[derive(Clone, Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum CommandError {
    #[error("'{kind}' expects {expected} tokens, found {found}")]
    #[diagnostic(code("command.arity"))]
    Arity {
        kind: CommandKind,
        expected: Arity,
        found: usize,
    },
    #[error("message text is empty")]
    #[diagnostic(code("command.empty_message"))]
    EmptyMessage,
    #[error("'{token}' is not a valid integer")]
    #[diagnostic(code("command.integer"))]
    InvalidInteger { token: String },
    #[error("label '{0}' is not defined")]
    #[diagnostic(code("command.unknown_label"))]
    UnknownLabel(String),
    #[error("image label '{0}' is not registered")]
    #[diagnostic(code("command.unknown_image"))]
    UnknownImage(String),
    #[error("failed to load image '{0}'")]
    #[diagnostic(code("command.image_load"))]
    ImageLoad(String),
    #[error("unknown command discriminator '{0}'")]
    #[diagnostic(code("command.unknown"))]
    UnknownCommand(String),
}

pub(crate) fn json_decode_error(input: &str, err: &serde_json::Error) -> EngineError {
    let offset = json_error_offset(input, err);
    let span_len = usize::from(offset < input.len());
    EngineError::ScriptDecode {
        message: err.to_string(),
        src: input.to_string(),
        span: (offset, span_len).into(),
    }
}

#[cold]
#[inline(never)]
fn json_error_offset(input: &str, error: &serde_json::Error) -> usize {
    let line = error.line();
    let column = error.column();
    if line == 0 || column == 0 {
        return 0;
    }
    let mut offset = 0usize;
    for (idx, chunk) in input.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let byte_index = chunk
                .char_indices()
                .nth(column.saturating_sub(1))
                .map(|(byte, _)| byte)
                .unwrap_or(chunk.len().saturating_sub(1));
            return offset + byte_index;
        }
        offset += chunk.len();
    }
    input.len().saturating_sub(1)
}
