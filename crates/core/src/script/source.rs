//! Script sources: the ordered line sequence the interpreter walks.

use std::path::Path;

use serde::Deserialize;

use crate::error::{json_decode_error, EngineError, EngineResult};

use super::token::{tokenize, ScriptLine};

/// Ordered, random-access line provider.
pub trait ScriptSource {
    fn line_count(&self) -> usize;

    /// Tokens of line `index`; out of range yields an empty line.
    fn line_at(&self, index: usize) -> ScriptLine;
}

/// Script document as stored on disk: `[{"scripts": ["l, start", ...]}]`.
#[derive(Debug, Deserialize)]
struct ScriptDocument {
    #[serde(default)]
    scripts: Vec<String>,
}

/// In-memory script, tokenized lazily per lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptLines {
    lines: Vec<String>,
}

impl ScriptLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses the JSON script format. Only the first document's `scripts`
    /// array is used.
    pub fn from_json(input: &str) -> EngineResult<Self> {
        let documents: Vec<ScriptDocument> =
            serde_json::from_str(input).map_err(|err| json_decode_error(input, &err))?;
        let lines = documents
            .into_iter()
            .next()
            .map(|document| document.scripts)
            .unwrap_or_default();
        Ok(Self { lines })
    }

    /// One script line per text line. Blank lines are kept so line numbers
    /// match the file.
    pub fn from_text(input: &str) -> Self {
        Self::new(input.lines())
    }

    /// Reads `path`, choosing the JSON decoder for `.json` files and the
    /// plain-text reader otherwise.
    pub fn load(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| EngineError::ScriptIo {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Ok(Self::from_text(&content))
        }
    }

    pub fn raw_line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }
}

impl ScriptSource for ScriptLines {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_at(&self, index: usize) -> ScriptLine {
        self.lines
            .get(index)
            .map(|line| tokenize(line))
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
