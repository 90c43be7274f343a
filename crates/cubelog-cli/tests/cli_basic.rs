//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a throwaway data directory.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_cubelog"))
        .args(args)
        .env("CUBELOG_HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_ok(home: &Path, args: &[&str]) -> String {
    let (code, stdout, stderr) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    serde_json::from_str(&run_ok(home, args)).expect("Failed to parse JSON output")
}

fn log_solves(home: &Path, times: &[&str]) {
    for (i, time) in times.iter().enumerate() {
        let date = format!("2024-01-01T10:{i:02}");
        run_ok(home, &["solve", "add", time, "--date", &date]);
    }
}

#[test]
fn test_solve_add_and_list() {
    let home = TempDir::new().unwrap();
    let out = run_ok(home.path(), &["solve", "add", "12.34", "--date", "2024-01-01T10:00"]);
    assert!(out.contains("Solve logged:"));
    assert!(out.contains("12.34"));

    let solves = run_json(home.path(), &["solve", "list"]);
    assert_eq!(solves.as_array().unwrap().len(), 1);
    assert_eq!(solves[0]["time"], 12.34);
}

#[test]
fn test_solve_add_rejects_garbage() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["solve", "add", "fast"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_solve_delete_missing() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["solve", "delete", "99"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("No solve with id 99"));
}

#[test]
fn test_stats_averages() {
    let home = TempDir::new().unwrap();
    log_solves(home.path(), &["15", "10", "12", "11", "13", "9"]);

    let averages = run_json(home.path(), &["stats", "averages"]);
    assert_eq!(averages["ao5"]["average"], "11.00");
    assert_eq!(averages["ao5"]["window_start"], 1);
    // ids are assigned in logging order, which is also chronological here
    assert_eq!(averages["ao5"]["solve_ids"], serde_json::json!([2, 3, 4, 5, 6]));
    assert!(averages["ao12"].is_null());
}

#[test]
fn test_stats_averages_all_dnf() {
    let home = TempDir::new().unwrap();
    log_solves(home.path(), &["DNF", "DNF", "DNF", "DNF", "DNF"]);

    let averages = run_json(home.path(), &["stats", "averages"]);
    assert!(averages["ao5"].is_null());
}

#[test]
fn test_stats_summary_empty_log() {
    let home = TempDir::new().unwrap();
    let summary = run_json(home.path(), &["stats", "summary"]);
    assert_eq!(summary["total_solves"], 0);
    assert_eq!(summary["mean"], "--");
}

#[test]
fn test_blog_lifecycle() {
    let home = TempDir::new().unwrap();
    run_ok(home.path(), &["blog", "add", "Sub-15", "--tags", "pb,3x3"]);
    run_ok(home.path(), &["blog", "add", "Secret", "--private"]);

    let posts = run_json(home.path(), &["blog", "list"]);
    assert_eq!(posts.as_array().unwrap().len(), 1);
    assert_eq!(posts[0]["category"], "general");

    let posts = run_json(home.path(), &["blog", "list", "--private"]);
    assert_eq!(posts.as_array().unwrap().len(), 2);

    let tags = run_json(home.path(), &["blog", "tags"]);
    assert_eq!(tags, serde_json::json!(["pb", "3x3"]));
}

#[test]
fn test_export_import_roundtrip() {
    let home = TempDir::new().unwrap();
    log_solves(home.path(), &["10", "12", "11", "14", "13"]);
    let file = home.path().join("backup.json");
    let file_str = file.to_str().unwrap();
    run_ok(home.path(), &["data", "export", "json", "--out", file_str]);

    let other = TempDir::new().unwrap();
    let summary = run_json(other.path(), &["data", "import", file_str]);
    assert_eq!(summary["solves"], 5);
    let averages = run_json(other.path(), &["stats", "averages"]);
    assert_eq!(averages["ao5"]["average"], "12.00");
}

#[test]
fn test_import_unknown_extension() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("backup.txt");
    std::fs::write(&file, "hello").unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["data", "import", file.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unsupported import format"));
}

#[test]
fn test_config_get_set() {
    let home = TempDir::new().unwrap();
    assert_eq!(run_ok(home.path(), &["config", "get", "display.recent_limit"]).trim(), "10");
    run_ok(home.path(), &["config", "set", "display.recent_limit", "3"]);
    assert_eq!(run_ok(home.path(), &["config", "get", "display.recent_limit"]).trim(), "3");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "display.nope", "1"]);
    assert_ne!(code, 0);
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    let out = run_ok(home.path(), &["completions", "bash"]);
    assert!(out.contains("cubelog"));
}
