//! Integration tests for the `subfollow` binary

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixture_path, isolated_config};

/// Helper to run subfollow with an isolated config and capture output
fn run_subfollow(config: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_subfollow"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("SUBFOLLOW_LOG")
        .output()
        .expect("Failed to execute subfollow");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn fixture(name: &str) -> String {
    fixture_path(name).display().to_string()
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    AssertCommand::cargo_bin("subfollow")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("speed"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    AssertCommand::cargo_bin("subfollow")
        .unwrap()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// Parse Tests
// ============================================================================

#[test]
fn parse_lists_cues() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    let (stdout, stderr, exit_code) = run_subfollow(&config, &["parse", &fixture("two_cues.srt")]);

    assert_eq!(exit_code, 0);
    assert_eq!(
        stdout,
        "#1 00:00:01,000 --> 00:00:02,000 Hello\n#2 00:00:03,000 --> 00:00:04,000 World\n"
    );
    assert!(stderr.contains("2 cue(s), 0 warning(s)"));
}

#[test]
fn parse_json_output_is_valid() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    let (stdout, _stderr, exit_code) =
        run_subfollow(&config, &["parse", "--json", &fixture("song.srt")]);

    assert_eq!(exit_code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let cues = value.as_array().unwrap();
    assert_eq!(cues.len(), 6);
    assert_eq!(cues[1]["text"], "Second line\ncontinues here");
    assert_eq!(cues[5]["start_seconds"], 65.0);
}

#[test]
fn parse_reports_skipped_lines() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    let (stdout, stderr, exit_code) =
        run_subfollow(&config, &["parse", &fixture("malformed.srt")]);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout.lines().count(), 2);
    assert!(stderr.contains("2 cue(s), 3 warning(s)"));
    assert!(stderr.contains("line 8"));
}

#[test]
fn parse_without_cues_fails() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    let (stdout, stderr, exit_code) = run_subfollow(&config, &["parse", &fixture("no_cues.srt")]);

    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("no cues found"));
}

#[test]
fn parse_reads_stdin() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());
    let input = fs::read_to_string(fixture_path("two_cues.srt")).unwrap();

    AssertCommand::cargo_bin("subfollow")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["parse", "-"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("#2 00:00:03,000"));
}

#[test]
fn parse_missing_file_names_it() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    let (_stdout, stderr, exit_code) = run_subfollow(&config, &["parse", "nonexistent.srt"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("nonexistent.srt"));
}

// ============================================================================
// Speed Tests
// ============================================================================

#[test]
fn speed_defaults_then_persists_then_resets() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    let (stdout, _, code) = run_subfollow(&config, &["speed"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1x (default)");

    let (stdout, _, code) = run_subfollow(&config, &["speed", "1.5"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Speed set to 1.5x"));
    assert!(dir.path().join("preferences.toml").exists());

    let (stdout, _, _) = run_subfollow(&config, &["speed"]);
    assert_eq!(stdout.trim(), "1.5x (stored)");

    let (stdout, _, code) = run_subfollow(&config, &["speed", "--reset"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Speed reset to default (1x)"));

    let (stdout, _, _) = run_subfollow(&config, &["speed"]);
    assert_eq!(stdout.trim(), "1x (default)");
}

#[test]
fn speed_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    let (_stdout, stderr, exit_code) = run_subfollow(&config, &["speed", "fast"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Please enter a valid number."));

    let (_stdout, _stderr, exit_code) = run_subfollow(&config, &["speed", "--", "-2"]);
    assert_eq!(exit_code, 1);
    assert!(!dir.path().join("preferences.toml").exists());
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn config_path_prints_explicit_file() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    let (stdout, _stderr, exit_code) = run_subfollow(&config, &["config", "path"]);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), config.display().to_string());
}

#[test]
fn config_show_includes_overrides() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    let (stdout, _stderr, exit_code) = run_subfollow(&config, &["config", "show"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[playback]"));
    assert!(stdout.contains("tick_interval_ms = 50"));
    assert!(stdout.contains("level = \"warn\""));
    assert!(stdout.contains("preferences.toml"));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    let (_stdout, stderr, exit_code) = run_subfollow(&config, &["config", "init"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("--force"));

    let (stdout, _stderr, exit_code) = run_subfollow(&config, &["config", "init", "--force"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Wrote"));
    let written = fs::read_to_string(&config).unwrap();
    assert!(written.contains("default_speed = 1.0"));
    assert!(!written.contains("preferences.toml"));
}

#[test]
fn config_init_creates_missing_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("nested").join("config.toml");

    let (_stdout, _stderr, exit_code) = run_subfollow(&config, &["config", "init"]);

    assert_eq!(exit_code, 0);
    assert!(config.exists());
}

// ============================================================================
// Misc
// ============================================================================

#[test]
fn completions_generate_bash_script() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    let (stdout, _stderr, exit_code) = run_subfollow(&config, &["completions", "bash"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("_subfollow"));
}

#[test]
fn play_requires_a_terminal() {
    let dir = TempDir::new().unwrap();
    let config = isolated_config(dir.path());

    let (_stdout, stderr, exit_code) = run_subfollow(&config, &["play", &fixture("song.srt")]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("interactive terminal"));
}
