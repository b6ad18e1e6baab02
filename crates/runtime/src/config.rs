use std::path::{Path, PathBuf};

use script_engine::{ConfigError, EngineConfig};
use serde::{Deserialize, Serialize};

/// Player configuration: window, font and asset root on top of the
/// interpreter settings, all in one TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    pub window: WindowSettings,
    /// TrueType/OpenType font used for messages and choices.
    pub font_path: Option<PathBuf>,
    /// Directory image paths in the script are resolved against. Defaults
    /// to the script's directory.
    pub asset_root: Option<PathBuf>,
    #[serde(flatten)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Script Engine".to_string(),
        }
    }
}

impl RuntimeConfig {
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

    /// Asset root, falling back to the directory holding `script`.
    pub fn asset_root_for(&self, script: &Path) -> PathBuf {
        self.asset_root.clone().unwrap_or_else(|| {
            script
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_sections_sit_beside_runtime_sections() {
        let config = RuntimeConfig::from_toml_str(
            r#"
font_path = "fonts/gothic.ttf"

[window]
title = "Demo"

[text]
font_size = 32

[message]
line_max = 4
"#,
        )
        .expect("parse");
        assert_eq!(config.window.title, "Demo");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.font_path, Some(PathBuf::from("fonts/gothic.ttf")));
        assert_eq!(config.engine.text.font_size, 32);
        assert_eq!(config.engine.message.line_max, 4);
        assert_eq!(config.engine.choice.line_max, 3);
    }

    #[test]
    fn asset_root_defaults_to_script_directory() {
        let config = RuntimeConfig::default();
        assert_eq!(
            config.asset_root_for(Path::new("story/main.json")),
            PathBuf::from("story")
        );
        let config = RuntimeConfig {
            asset_root: Some(PathBuf::from("assets")),
            ..RuntimeConfig::default()
        };
        assert_eq!(
            config.asset_root_for(Path::new("story/main.json")),
            PathBuf::from("assets")
        );
    }

    #[test]
    fn missing_file_is_reported() {
        let err = RuntimeConfig::load(Path::new("definitely/not/here.toml")).expect_err("missing");
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
