use super::*;

#[test]
fn empty_document_yields_defaults() {
    let config = EngineConfig::from_toml_str("").expect("parse empty config");
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.text.font_size, 24);
    assert_eq!(config.message.line_max, 3);
    assert_eq!(config.choice.center_y, 360);
    assert_eq!(config.images.cursor, "cursor");
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = EngineConfig::from_toml_str(
        r#"
[images]
cursor = "pointer"

[message]
line_max = 5

[palette]
choice_select = [10, 20, 30]
"#,
    )
    .expect("parse config");

    assert_eq!(config.images.cursor, "pointer");
    assert_eq!(config.images.click_wait, "click_wait");
    assert_eq!(config.message.line_max, 5);
    assert_eq!(config.message.line_height, 24);
    assert_eq!(config.palette.choice_select, Color::rgb(10, 20, 30));
    assert_eq!(config.palette.choice_normal, Color::rgb(64, 64, 255));
}

#[test]
fn config_roundtrip_through_toml() {
    let mut config = EngineConfig::default();
    config.runtime.debug_areas = true;
    config.text.font_size = 32;
    let text = config.to_toml_string().expect("serialize");
    let loaded = EngineConfig::from_toml_str(&text).expect("deserialize");
    assert_eq!(config, loaded);
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("engine.toml");
    let err = EngineConfig::load(&missing).expect_err("missing file");
    assert!(matches!(err, ConfigError::NotFound(path) if path == missing));
}

#[test]
fn load_reads_file_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("engine.toml");
    std::fs::write(&path, "[text]\nfont_size = 16\n").expect("write config");
    let config = EngineConfig::load(&path).expect("load config");
    assert_eq!(config.text.font_size, 16);
    assert_eq!(config.half_width(), 8);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = EngineConfig::from_toml_str("[text\nfont_size = 1").expect_err("bad toml");
    assert!(matches!(err, ConfigError::ParseError(_)));
}
