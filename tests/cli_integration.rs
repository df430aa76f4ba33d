//! CLI integration tests for Tasklight
//!
//! Each test drives the session binary with a scripted stdin and asserts on
//! the rendered output.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command instance for the tasklight binary
fn tasklight_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("tasklight"))
}

/// Write a seed file into a temp directory
fn seed_file(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("tasks.json");
    fs::write(&path, json).unwrap();
    path
}

const MIXED_SEED: &str = r#"[
    {"id":"t-0000001","message":"fix bug","completed":false},
    {"id":"t-0000002","message":"write docs","completed":true},
    {"id":"t-0000003","message":"review patch","completed":false,"favorite":true}
]"#;

// =============================================================================
// Session Basics
// =============================================================================

#[test]
fn test_empty_session_reports_no_tasks() {
    tasklight_cmd()
        .write_stdin("list\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 0 tasks"))
        .stdout(predicate::str::contains("No tasks"));
}

#[test]
fn test_seeded_session_lists_incomplete_before_completed() {
    let dir = TempDir::new().unwrap();
    let seed = seed_file(&dir, MIXED_SEED);

    let output = tasklight_cmd()
        .arg("--seed")
        .arg(&seed)
        .write_stdin("quit\n")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    let fix = stdout.find("fix bug").unwrap();
    let review = stdout.find("review patch").unwrap();
    let docs = stdout.find("write docs").unwrap();

    assert!(fix < review, "incomplete tasks keep input order");
    assert!(review < docs, "completed tasks render last");
}

#[test]
fn test_unknown_command_is_reported() {
    tasklight_cmd()
        .write_stdin("frobnicate\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown command"));
}

// =============================================================================
// Task Lifecycle
// =============================================================================

#[test]
fn test_add_creates_and_renders_the_task() {
    tasklight_cmd()
        .write_stdin("add buy milk\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added t-"))
        .stdout(predicate::str::contains("buy milk"));
}

#[test]
fn test_done_moves_the_task_behind_open_ones() {
    let dir = TempDir::new().unwrap();
    let seed = seed_file(
        &dir,
        r#"[
            {"id":"t-0000001","message":"first"},
            {"id":"t-0000002","message":"second"}
        ]"#,
    );

    let output = tasklight_cmd()
        .arg("--seed")
        .arg(&seed)
        .write_stdin("done 0000001\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated t-0000001"))
        .stdout(predicate::str::contains("[x]"));

    // In the render after the toggle, "first" comes after "second"
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    let after_update = &stdout[stdout.find("Updated t-0000001").unwrap()..];
    let first = after_update.find("first").unwrap();
    let second = after_update.find("second").unwrap();
    assert!(second < first);
}

#[test]
fn test_edit_commits_the_next_line() {
    let dir = TempDir::new().unwrap();
    let seed = seed_file(&dir, r#"[{"id":"t-0000001","message":"buy milk"}]"#);

    tasklight_cmd()
        .arg("--seed")
        .arg(&seed)
        .write_stdin("edit 0000001\nbuy oat milk\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Editing t-0000001"))
        .stdout(predicate::str::contains("Updated t-0000001"))
        .stdout(predicate::str::contains("buy oat milk"));
}

#[test]
fn test_edit_cancel_keeps_the_message() {
    let dir = TempDir::new().unwrap();
    let seed = seed_file(&dir, r#"[{"id":"t-0000001","message":"buy milk"}]"#);

    tasklight_cmd()
        .arg("--seed")
        .arg(&seed)
        .write_stdin("edit 0000001\n:cancel\nlist\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Edit cancelled"))
        .stdout(predicate::str::contains("buy milk"))
        .stdout(predicate::str::contains("Updated").not());
}

#[test]
fn test_rm_deletes_the_task() {
    let dir = TempDir::new().unwrap();
    let seed = seed_file(&dir, MIXED_SEED);

    tasklight_cmd()
        .arg("--seed")
        .arg(&seed)
        .write_stdin("rm 0000002\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed t-0000002"));
}

#[test]
fn test_all_done_completes_open_tasks() {
    let dir = TempDir::new().unwrap();
    let seed = seed_file(&dir, MIXED_SEED);

    tasklight_cmd()
        .arg("--seed")
        .arg(&seed)
        .write_stdin("all-done\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed 2 tasks"));
}

#[test]
fn test_ambiguous_id_is_rejected() {
    let dir = TempDir::new().unwrap();
    let seed = seed_file(&dir, MIXED_SEED);

    tasklight_cmd()
        .arg("--seed")
        .arg(&seed)
        .write_stdin("done t-\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("ambiguous"));
}

// =============================================================================
// Filtering and Formats
// =============================================================================

#[test]
fn test_filter_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let seed = seed_file(&dir, MIXED_SEED);

    let output = tasklight_cmd()
        .arg("--seed")
        .arg(&seed)
        .arg("--format")
        .arg("json")
        .write_stdin("filter FIX\nquit\n")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    let last_render = stdout
        .lines()
        .filter(|l| l.starts_with('['))
        .last()
        .unwrap();
    let tasks: serde_json::Value = serde_json::from_str(last_render).unwrap();

    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["message"], "fix bug");
}

#[test]
fn test_json_format_renders_records() {
    let dir = TempDir::new().unwrap();
    let seed = seed_file(&dir, r#"[{"id":"t-0000001","message":"buy milk"}]"#);

    tasklight_cmd()
        .arg("--seed")
        .arg(&seed)
        .arg("--format")
        .arg("json")
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""message":"buy milk""#));
}

// =============================================================================
// Seeding and Configuration
// =============================================================================

#[test]
fn test_duplicate_seed_ids_abort_startup() {
    let dir = TempDir::new().unwrap();
    let seed = seed_file(
        &dir,
        r#"[
            {"id":"t-0000001","message":"one"},
            {"id":"t-0000001","message":"two"}
        ]"#,
    );

    tasklight_cmd()
        .arg("--seed")
        .arg(&seed)
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate task ID"));
}

#[test]
fn test_config_message_limit_bounds_new_tasks() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tasklight.toml"), "message_limit = 10\n").unwrap();

    tasklight_cmd()
        .current_dir(dir.path())
        .write_stdin("add this message is far too long\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("this messa"))
        .stdout(predicate::str::contains("far too long").not());
}
