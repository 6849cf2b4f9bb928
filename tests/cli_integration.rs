//! CLI integration tests.
//!
//! These tests invoke the alive binary and verify command output and behaviour.
//! Stdout is a pipe here, so every command takes its non-interactive path.

#![allow(deprecated)] // cargo_bin is deprecated but still works

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a Command for the alive binary.
fn alive() -> Command {
    let mut cmd = Command::cargo_bin("alive").unwrap();
    cmd.env_remove("ALIVE_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// Helper to run alive inside an empty directory.
fn alive_in(temp: &TempDir) -> Command {
    let mut cmd = alive();
    cmd.current_dir(temp.path());
    cmd
}

// ============================================================================
// General
// ============================================================================

#[test]
fn test_no_command_prints_quick_start() {
    let temp = TempDir::new().unwrap();
    alive_in(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick start"));
}

#[test]
fn test_version() {
    alive()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_command_fails() {
    alive().arg("nope").assert().failure();
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_spinner_prints_specs_and_frames() {
    alive()
        .args(["check", "dots"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Specs"))
        .stdout(predicate::str::contains("Frame data"))
        .stdout(predicate::str::contains("total_frames:"));
}

#[test]
fn test_check_verbosity_zero_skips_frames() {
    alive()
        .args(["check", "dots", "-v", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Specs"))
        .stdout(predicate::str::contains("Frame data").not());
}

#[test]
fn test_check_with_length() {
    alive()
        .args(["check", "classic", "--length", "4", "-v", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("length: 4"));
}

#[test]
fn test_check_bar() {
    alive()
        .args(["check", "classic", "--bar", "--length", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bar: classic"))
        .stdout(predicate::str::contains("(end)"));
}

#[test]
fn test_check_bar_only_name_falls_back_to_bar() {
    alive()
        .args(["check", "hollow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bar: hollow"));
}

#[test]
fn test_check_unknown_spinner_fails() {
    alive()
        .args(["check", "not_a_spinner"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown spinner: not_a_spinner"));
}

// ============================================================================
// showtime
// ============================================================================

#[test]
fn test_showtime_bars_lists_every_bar() {
    alive()
        .args(["showtime", "bars"])
        .assert()
        .success()
        .stdout(predicate::str::contains("classic2"))
        .stdout(predicate::str::contains("brackets"));
}

#[test]
fn test_showtime_pattern_filters() {
    alive()
        .args(["showtime", "spinners", "-p", "^fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fish_bouncing"))
        .stdout(predicate::str::contains("dots_waves").not());
}

#[test]
fn test_showtime_pattern_without_matches_fails() {
    alive()
        .args(["showtime", "-p", "^zzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing matches"));
}

#[test]
fn test_showtime_invalid_pattern_fails() {
    alive()
        .args(["showtime", "-p", "("])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pattern"));
}

// ============================================================================
// demo
// ============================================================================

#[test]
fn test_demo_prints_receipt() {
    let temp = TempDir::new().unwrap();
    alive_in(&temp)
        .args(["demo", "--total", "50", "--delay-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50/50 [100%]"))
        .stdout(predicate::str::contains("on 12: finished batch 1"))
        .stdout(predicate::str::contains("(!)").not());
}

#[test]
fn test_demo_unknown_total() {
    let temp = TempDir::new().unwrap();
    alive_in(&temp)
        .args(["demo", "--unknown", "--delay-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1000 in"));
}

#[test]
fn test_demo_title_is_shown() {
    let temp = TempDir::new().unwrap();
    alive_in(&temp)
        .args(["demo", "-t", "4", "-d", "0", "--title", "Copying"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Copying"));
}

#[test]
fn test_demo_uses_config_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("alive.toml"),
        "[style]\nbar = \"none\"\nspinner = \"none\"\n\n[widgets]\nelapsed = false\nstats = false\n",
    )
    .unwrap();

    alive_in(&temp)
        .args(["demo", "-t", "4", "-d", "0"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("4/4 [100%]\n"));
}

#[test]
fn test_demo_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("alive.toml"), "[style]\nspinner = \"nope\"\n").unwrap();

    alive_in(&temp)
        .args(["demo", "-t", "4", "-d", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown spinner: nope"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_set_and_get() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.toml");

    alive()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "style.length", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("style.length: 40 → 25"));

    alive()
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "style.length"])
        .assert()
        .success()
        .stdout("25\n");

    assert!(fs::read_to_string(&path).unwrap().contains("length = 25"));
}

#[test]
fn test_config_path_from_env() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("env.toml");

    alive()
        .env("ALIVE_CONFIG", &path)
        .args(["config", "set", "widgets.stats", "false"])
        .assert()
        .success();

    assert!(path.exists());
}

#[test]
fn test_config_default_file_in_current_dir() {
    let temp = TempDir::new().unwrap();
    alive_in(&temp)
        .args(["config", "set", "behaviour.manual", "true"])
        .assert()
        .success();

    assert!(temp.path().join("alive.toml").exists());
}

#[test]
fn test_config_set_invalid_value() {
    let temp = TempDir::new().unwrap();
    alive_in(&temp)
        .args(["config", "set", "style.length", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for style.length"));

    assert!(!temp.path().join("alive.toml").exists());
}

#[test]
fn test_config_get_unknown_key() {
    let temp = TempDir::new().unwrap();
    alive_in(&temp)
        .args(["config", "get", "style.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: style.nope"));
}

#[test]
fn test_config_show() {
    let temp = TempDir::new().unwrap();
    alive_in(&temp)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("style"))
        .stdout(predicate::str::contains("widgets"))
        .stdout(predicate::str::contains("enrich_print"));
}

#[test]
fn test_config_show_unknown_section() {
    let temp = TempDir::new().unwrap();
    alive_in(&temp)
        .args(["config", "show", "-s", "limits"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown section: limits"));
}

#[test]
fn test_config_reset_all_with_yes() {
    let temp = TempDir::new().unwrap();
    alive_in(&temp)
        .args(["config", "set", "style.length", "25"])
        .assert()
        .success();

    alive_in(&temp)
        .args(["config", "reset", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset all config"));

    alive_in(&temp)
        .args(["config", "get", "style.length"])
        .assert()
        .success()
        .stdout("40\n");
}

#[test]
fn test_config_keys() {
    alive()
        .args(["config", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("style.theme"))
        .stdout(predicate::str::contains("behaviour.calibrate"));
}

#[test]
fn test_config_explain_key() {
    let temp = TempDir::new().unwrap();
    alive_in(&temp)
        .args(["config", "explain", "style.length"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default:"))
        .stdout(predicate::str::contains("alive config set style.length"));
}
