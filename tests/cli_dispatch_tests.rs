use std::fs;
use std::process::Command;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_gearsmith")
}

#[test]
fn unknown_command_prints_usage_and_exits_2() {
    let output = Command::new(bin())
        .arg("frobnicate")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: gearsmith"));
}

#[test]
fn import_command_returns_usage_without_path() {
    let output = Command::new(bin())
        .arg("import")
        .output()
        .expect("import should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: gearsmith import"));
}

#[test]
fn import_then_export_round_trips_through_a_session_file() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let session_path = dir.path().join("session.json");
    let import_path = dir.path().join("incoming.json");
    let export_path = dir.path().join("export.json");

    fs::write(
        &import_path,
        r#"[
            {"tier": 2, "acquire": "BOSS_DROP", "material": "Plate", "part": "Helm",
             "passive1": ["AttackVary"]},
            {"tier": 99}
        ]"#,
    )
    .expect("fixture should be written");

    let output = Command::new(bin())
        .env("GEARSMITH_SESSION", &session_path)
        .args(["import", import_path.to_string_lossy().as_ref()])
        .output()
        .expect("import should run");
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("accepted=1"));
    assert!(stdout.contains("dropped=1"));
    assert!(session_path.exists(), "import persists the session snapshot");

    let output = Command::new(bin())
        .env("GEARSMITH_SESSION", &session_path)
        .args(["export", export_path.to_string_lossy().as_ref()])
        .output()
        .expect("export should run");
    assert_eq!(output.status.code(), Some(0));

    let exported: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&export_path).expect("export should exist"))
            .expect("export should be json");
    assert_eq!(exported["version"], serde_json::json!(1));
    assert_eq!(exported["configs"].as_array().map(Vec::len), Some(1));
}

#[test]
fn validate_command_reports_counts_for_mixed_files() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("mixed.json");
    fs::write(
        &path,
        r#"{"configs": [
            {"tier": 1, "acquire": "BASIC_CRAFT", "material": "Cloth", "part": "Shoes",
             "passive1": ["RegenHpVary"]},
            {"tier": 1}
        ]}"#,
    )
    .expect("fixture should be written");

    let output = Command::new(bin())
        .args(["validate", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 of 2 item(s) valid"));
}

#[test]
fn validate_command_returns_non_zero_on_malformed_shape() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("bad.json");
    fs::write(&path, "{\"items\": []}").expect("fixture should be written");

    let output = Command::new(bin())
        .args(["validate", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed"));
}
