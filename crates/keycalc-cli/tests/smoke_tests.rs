//! Smoke tests for the keycalc binary

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the keycalc binary
fn keycalc() -> Command {
    let mut cmd = Command::cargo_bin("keycalc").expect("keycalc binary should exist");
    cmd.env_remove("RUST_LOG").env_remove("KEYCALC_CONFIG");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_help_flag() {
    keycalc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("press"))
        .stdout(predicate::str::contains("tui"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_flag() {
    keycalc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("keycalc"));
}

#[test]
fn test_no_args_fails() {
    keycalc().assert().failure();
}

// ============================================================================
// press
// ============================================================================

#[test]
fn test_press_text() {
    keycalc()
        .args(["press", "12+30="])
        .assert()
        .success()
        .stdout("12 + 30 =\n42\n");
}

#[test]
fn test_press_split_keys() {
    keycalc()
        .args(["press", "9", "-", "4", "Enter"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("5\n"));
}

#[test]
fn test_press_json() {
    let output = keycalc()
        .args(["press", "1.5+*", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["display"], "1.5");
    assert_eq!(value["history"], "1.5 ×");
    assert_eq!(value["active_operator"], "multiply");
}

#[test]
fn test_press_json_after_split_keys() {
    let output = keycalc()
        .args(["press", "9", "-", "4", "Enter", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown key").not())
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["display"], "5");
    assert_eq!(value["history"], "9 − 4 =");
    assert_eq!(value["error"], false);
}

#[test]
fn test_press_error_still_succeeds() {
    keycalc()
        .args(["press", "5/0="])
        .assert()
        .success()
        .stdout(predicate::str::contains("ERR"));
}

#[test]
fn test_press_requires_keys() {
    keycalc().arg("press").assert().failure();
}

// ============================================================================
// config and logging
// ============================================================================

#[test]
fn test_config_defaults() {
    keycalc()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"error_flash_ms\": 500"))
        .stdout(predicate::str::contains("\"show_help\": true"));
}

#[test]
fn test_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keycalc.json");
    fs::write(&path, r#"{"error_flash_ms": 120}"#).unwrap();

    keycalc()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"error_flash_ms\": 120"));
}

#[test]
fn test_config_bad_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    keycalc()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_log_file_receives_events() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("keycalc.log");

    keycalc()
        .arg("-v")
        .arg("--log-file")
        .arg(&log)
        .args(["press", "1/0="])
        .assert()
        .success();

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("error state"));
}
