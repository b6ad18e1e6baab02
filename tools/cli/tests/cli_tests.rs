use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn sengine(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sengine"))
        .args(args)
        .output()
        .expect("run sengine")
}

fn write_script(dir: &Path, name: &str, lines: &[&str]) -> String {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n")).expect("write script");
    path.display().to_string()
}

#[test]
fn validate_lists_registries_and_passes_clean_scripts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write_script(
        dir.path(),
        "story.txt",
        &["i, cursor, cursor.png", "l, start", "m, Hello", "@", "e"],
    );

    let output = sengine(&["validate", &script, "--strict"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("start -> 1"));
    assert!(stdout.contains("cursor -> cursor.png"));
    assert!(stdout.contains("no problems found"));
}

#[test]
fn strict_validation_fails_on_dropped_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write_script(
        dir.path(),
        "broken.txt",
        &["i, cursor, cursor.png", "j, nowhere", "w, soon"],
    );

    let output = sengine(&["validate", &script, "--strict"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("line 1:"));
    assert!(stdout.contains("line 2:"));

    let lenient = sengine(&["validate", &script]);
    assert!(lenient.status.success());
}

#[test]
fn validate_checks_images_against_an_asset_root() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("cursor.png"), b"png").expect("write asset");
    let script = write_script(
        dir.path(),
        "story.txt",
        &["i, cursor, cursor.png", "i, bg, missing.png"],
    );
    let root = dir.path().display().to_string();

    let output = sengine(&["validate", &script, "--assets", &root, "--json"]);
    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json report");
    let diagnostics = report["diagnostics"].as_array().expect("diagnostics");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["line"], 1);
}

#[test]
fn trace_writes_yaml_ending_in_end_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write_script(
        dir.path(),
        "story.json",
        &[r#"[{"scripts": ["i, cursor, cursor.png", "m, Hi", "@", "e"]}]"#],
    );
    let out = dir.path().join("trace/out.yaml");

    let output = sengine(&["trace", &script, "-o", &out.display().to_string()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let yaml = fs::read_to_string(&out).expect("trace written");
    assert!(yaml.contains("trace_format_version: 1"));
    assert!(yaml.contains("state: end"));
    assert!(yaml.contains("text: Hi"));
}
