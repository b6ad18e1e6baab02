//! Engine configuration: reserved image labels, grid constants and palette.
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! yields the stock 1280x720 layout.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::Color;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub images: ImageLabels,
    pub text: TextSettings,
    pub message: MessageGrid,
    pub choice: ChoiceGrid,
    pub palette: Palette,
    pub runtime: RuntimeSettings,
}

/// Reserved image labels looked up after the pre-parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageLabels {
    /// Mandatory; initialization fails without it.
    pub cursor: String,
    pub click_wait: String,
}

impl Default for ImageLabels {
    fn default() -> Self {
        Self {
            cursor: "cursor".to_string(),
            click_wait: "click_wait".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextSettings {
    /// Glyph size in pixels. Also the reveal step per frame.
    pub font_size: i32,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self { font_size: 24 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MessageGrid {
    pub word_max: i32,
    pub line_max: usize,
    pub line_height: i32,
    pub line_gap: i32,
    pub center_y: i32,
    pub click_wait_offset_y: i32,
    pub window_alpha: u8,
}

impl Default for MessageGrid {
    fn default() -> Self {
        Self {
            word_max: 42,
            line_max: 3,
            line_height: 24,
            line_gap: 16,
            center_y: 600,
            click_wait_offset_y: 28,
            window_alpha: 64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChoiceGrid {
    pub word_max: i32,
    pub line_max: usize,
    pub line_height: i32,
    pub line_gap: i32,
    pub center_y: i32,
}

impl Default for ChoiceGrid {
    fn default() -> Self {
        Self {
            word_max: 24,
            line_max: 3,
            line_height: 24,
            line_gap: 16,
            center_y: 360,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Palette {
    pub message_window: Color,
    pub message_text: Color,
    pub choice_normal: Color,
    pub choice_select: Color,
    pub debug_area: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            message_window: Color::rgb(128, 128, 255),
            message_text: Color::rgb(255, 255, 255),
            choice_normal: Color::rgb(64, 64, 255),
            choice_select: Color::rgb(128, 128, 255),
            debug_area: Color::rgb(255, 0, 0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Upper bound on lines dispatched in a single `update`; parsing resumes
    /// on the next frame once it is hit.
    pub max_lines_per_frame: usize,
    /// Paints each message area with `palette.debug_area`.
    pub debug_areas: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            max_lines_per_frame: 100_000,
            debug_areas: false,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    #[diagnostic(
        code(config::not_found),
        help("pass an existing TOML file or omit the option to use defaults")
    )]
    NotFound(PathBuf),

    #[error("failed to parse config: {0}")]
    #[diagnostic(code(config::parse_error))]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    #[diagnostic(code(config::serialize_error))]
    SerializeError(#[from] toml::ser::Error),

    #[error("io error: {0}")]
    #[diagnostic(code(config::io_error))]
    IoError(#[from] std::io::Error),
}

impl EngineConfig {
    /// Loads a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Horizontal advance of one half-width character.
    pub fn half_width(&self) -> i32 {
        self.text.font_size / 2
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
