use super::*;
use crate::script::CommandKind;

#[test]
fn json_document_yields_first_scripts_array() {
    let json = r#"[{"scripts": ["l, start", "m, Hello, world", "e"]}, {"scripts": ["x"]}]"#;
    let script = ScriptLines::from_json(json).expect("decode script");
    assert_eq!(script.line_count(), 3);
    assert_eq!(script.line_at(0).kind(), Some(CommandKind::Label));
    assert_eq!(script.line_at(1).tokens(), ["m", "Hello", "world"]);
    assert_eq!(script.raw_line(2), Some("e"));
}

#[test]
fn out_of_range_lines_are_empty() {
    let script = ScriptLines::new(["e"]);
    assert!(script.line_at(1).is_empty());
    assert!(script.line_at(usize::MAX).is_empty());
}

#[test]
fn empty_json_array_decodes_to_no_lines() {
    let script = ScriptLines::from_json("[]").expect("decode");
    assert_eq!(script.line_count(), 0);
}

#[test]
fn malformed_json_carries_a_source_span() {
    let err = ScriptLines::from_json("[{\"scripts\": [\"e\",]}]").expect_err("trailing comma");
    match err {
        EngineError::ScriptDecode { src, span, .. } => {
            assert!(span.offset() < src.len());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn text_format_preserves_blank_lines() {
    let script = ScriptLines::from_text("l, start\n\nm, Hi\n");
    assert_eq!(script.line_count(), 3);
    assert!(script.line_at(1).is_empty());
    assert_eq!(script.line_at(2).token(1), Some("Hi"));
}

#[test]
fn load_dispatches_on_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let json_path = dir.path().join("story.json");
    std::fs::write(&json_path, r#"[{"scripts": ["m, a", "e"]}]"#).expect("write json");
    let text_path = dir.path().join("story.txt");
    std::fs::write(&text_path, "m, a\ne\n").expect("write text");

    let from_json = ScriptLines::load(&json_path).expect("load json");
    let from_text = ScriptLines::load(&text_path).expect("load text");
    assert_eq!(from_json, from_text);
}

#[test]
fn load_reports_io_errors_with_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing.json");
    let err = ScriptLines::load(&missing).expect_err("missing file");
    assert!(matches!(err, EngineError::ScriptIo { path, .. } if path == missing));
}
