//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a temp dir so config
//! and badge state never touch the real user directory.

use std::path::Path;
use std::process::Command;

const ENTRIES: &str = r#"{
  "exported_at": "2024-06-03T12:00:00.000Z",
  "total": 4,
  "entries": [
    {"id": "d", "title": "Today", "body": "", "feeling": "Happy", "created_at": "2024-06-03T09:00:00Z"},
    {"id": "c", "title": "", "body": "", "feeling": null, "created_at": "2024-06-02T21:00:00Z"},
    {"id": "b", "title": "", "body": "", "feeling": "Happy", "created_at": "2024-06-02T08:00:00Z"},
    {"id": "a", "title": "", "body": "", "feeling": "Sad", "created_at": "2024-06-01T08:00:00Z"}
  ]
}"#;

/// Run the CLI and return (code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    run_cli_in(home, home, args)
}

fn run_cli_in(home: &Path, cwd: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_mindmend-cli"))
        .args(args)
        .current_dir(cwd)
        .env("HOME", home)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn setup() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entries.json");
    std::fs::write(&path, ENTRIES).unwrap();
    let path = path.to_string_lossy().to_string();
    (dir, path)
}

#[test]
fn test_streak_for_fixed_day() {
    let (home, entries) = setup();
    let (code, stdout, _) = run_cli(home.path(), &["streak", "-e", &entries, "--today", "2024-06-03"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["streak"], 3);
    assert_eq!(json["tier"], "sparkles");

    let (_, stdout, _) = run_cli(home.path(), &["streak", "-e", &entries, "--today", "2024-06-04"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["streak"], 0);
}

#[test]
fn test_insights_output() {
    let (home, entries) = setup();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["insights", "-e", &entries, "--now", "2024-06-03T18:00:00Z"],
    );
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["entry_count"], 4);
    assert_eq!(json["dominant"], "Happy");
    assert_eq!(json["trend"].as_array().unwrap().len(), 30);
}

#[test]
fn test_badge_persists_between_runs() {
    let (home, entries) = setup();
    let args = ["badge", "-e", entries.as_str(), "--today", "2024-06-03"];

    let (code, stdout, _) = run_cli(home.path(), &args);
    assert_eq!(code, 0);
    let first: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(first["should_show_badge"], true);
    assert_eq!(first["is_new_milestone"], true);

    let (_, stdout, _) = run_cli(home.path(), &args);
    let second: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(second["should_show_badge"], false);
    assert_eq!(second["is_new_milestone"], false);
}

#[test]
fn test_badge_with_missing_entries_file_recovers() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["badge", "--memory", "-e", "/nonexistent/entries.json"],
    );
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["streak"], 0);
    assert_eq!(json["should_show_badge"], false);
}

#[test]
fn test_export_reemits_envelope() {
    let (home, entries) = setup();
    let (code, stdout, _) = run_cli(home.path(), &["export", "-e", &entries]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["total"], 4);
    assert_eq!(json["entries"][0]["id"], "d");
    assert!(json["entries"][1]["feeling"].is_null());
}

#[test]
fn test_export_save_uses_dated_file_name() {
    let (home, entries) = setup();
    let out_dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli_in(home.path(), out_dir.path(), &["export", "-e", &entries, "--save"]);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());

    let names: Vec<String> = std::fs::read_dir(out_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names.len(), 1);
    let name = &names[0];
    assert!(name.starts_with("MindMend-") && name.ends_with(".json"), "{name}");
    // MindMend-YYYY-MM-DD.json
    assert_eq!(name.len(), "MindMend-".len() + 10 + ".json".len());

    let saved = std::fs::read_to_string(out_dir.path().join(name)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(json["total"], 4);
}

#[test]
fn test_streak_counts_entries_with_null_text() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("entries.json");
    std::fs::write(
        &path,
        r#"[
  {"id": "b", "title": null, "body": null, "feeling": "Happy", "created_at": "2024-06-03T09:00:00Z"},
  {"id": "a", "title": "Yesterday", "body": "", "feeling": "Calm", "created_at": "2024-06-02T09:00:00Z"}
]"#,
    )
    .unwrap();
    let entries = path.to_string_lossy().to_string();

    let (code, stdout, _) = run_cli(home.path(), &["streak", "-e", &entries, "--today", "2024-06-03"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["streak"], 2);
}

#[test]
fn test_config_get_and_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "insights.window_days"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "30");

    let (code, _, stderr) = run_cli(home.path(), &["config", "get", "insights.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}
