// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CLI tests for dart-test-translate flags
//!
//! These tests verify argument parsing, flag interactions and the
//! end-to-end translation of a runner output file.

use std::path::{Path, PathBuf};

use clap::Parser;
use dart_test_events::SyntaxPolicy;
use dart_test_translate::config::{Config, ConfigError};
use dart_test_translate::translate::{open_input, run};
use tracing::Level;

/// Session fixture shared with the dart-test-events crate
fn session_fixture() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    Path::new(&manifest_dir)
        .parent() // crates/
        .expect("crates directory")
        .join("dart-test-events/tests/fixtures/session.jsonl")
}

// ============================================================================
// Argument parsing
// ============================================================================

#[test]
fn test_no_arguments_reads_stdin() {
    let config = Config::try_parse_from(["dart-test-translate"]).expect("parse should succeed");
    assert!(config.input_path().is_none());
    assert_eq!(config.syntax_policy(), SyntaxPolicy::Skip);
}

#[test]
fn test_positional_input() {
    let config = Config::try_parse_from(["dart-test-translate", "out.jsonl"])
        .expect("parse should succeed");
    assert_eq!(config.input_path(), Some(Path::new("out.jsonl")));
}

#[test]
fn test_dash_input_reads_stdin() {
    let config =
        Config::try_parse_from(["dart-test-translate", "-"]).expect("parse should succeed");
    assert!(config.input_path().is_none());
}

#[test]
fn test_strict_flag() {
    let config = Config::try_parse_from(["dart-test-translate", "--strict"])
        .expect("parse should succeed");
    assert!(config.strict);
    assert_eq!(config.syntax_policy(), SyntaxPolicy::Abort);
}

#[test]
fn test_summary_short_flag() {
    let config =
        Config::try_parse_from(["dart-test-translate", "-s"]).expect("parse should succeed");
    assert!(config.summary);
}

#[test]
fn test_verbose_sets_debug_log_level() {
    let config =
        Config::try_parse_from(["dart-test-translate", "-v"]).expect("parse should succeed");
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_quiet_sets_warn_log_level() {
    let config =
        Config::try_parse_from(["dart-test-translate", "--quiet"]).expect("parse should succeed");
    assert_eq!(config.log_level(), Level::WARN);
}

#[test]
fn test_verbose_flag_value_syntax_not_supported() {
    // Boolean flags with default_value="false" are toggled by presence only
    let result = Config::try_parse_from(["dart-test-translate", "--verbose=true"]);
    assert!(result.is_err(), "Boolean flags don't support =value syntax");
}

#[test]
fn test_unknown_flag_rejected() {
    let result = Config::try_parse_from(["dart-test-translate", "--reporter", "json"]);
    assert!(result.is_err());
}

// ============================================================================
// Validation and translation
// ============================================================================

#[test]
fn test_validate_missing_input() {
    let config = Config::try_parse_from(["dart-test-translate", "/nonexistent/run-12345.jsonl"])
        .expect("parse should succeed");
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InputNotFound(_))
    ));
}

#[test]
fn test_translate_fixture_file() {
    let fixture = session_fixture();
    let config = Config {
        input: Some(fixture),
        summary: true,
        ..Default::default()
    };
    config.validate().expect("fixture should exist");

    let input = open_input(&config).expect("open fixture");
    let mut out = Vec::new();
    let translation = run(&config, input, &mut out).expect("Should translate");

    assert_eq!(translation.stats.malformed, 1);
    assert_eq!(translation.summary.started, 3);
    assert!(!translation.summary.all_passed());

    let text = String::from_utf8(out).expect("utf8");
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect();
    // 10 notifications plus the summary line
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0]["event"], "framework_attached");
    assert_eq!(lines[6]["event"], "test_failed");
    assert_eq!(lines[6]["expected"], "'ident'");
    assert_eq!(lines[10]["event"], "summary");
}

#[test]
fn test_translate_fixture_file_strict() {
    let config = Config {
        input: Some(session_fixture()),
        strict: true,
        ..Default::default()
    };
    let input = open_input(&config).expect("open fixture");
    let mut out = Vec::new();
    let result = run(&config, input, &mut out);
    assert!(result.is_err(), "observatory line is not JSON");
}
