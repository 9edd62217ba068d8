// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the dart-test-translate binary
//!
//! Command-line flags, their environment fallbacks, and the logging level
//! they imply.

use std::path::{Path, PathBuf};

use clap::Parser;
use dart_test_events::SyntaxPolicy;

/// Translate Dart test runner JSON output into test lifecycle notifications
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dart-test-translate")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File with runner output, one JSON object per line
    ///
    /// Reads stdin when omitted or `-`.
    ///
    /// Example:
    ///   dart test --reporter json | dart-test-translate
    pub input: Option<PathBuf>,

    /// Stop at the first line that is not JSON
    ///
    /// By default such lines are logged and skipped. Lines with an unknown
    /// event type always stop the translation.
    #[arg(long, env = "DART_TEST_TRANSLATE_STRICT")]
    pub strict: bool,

    /// Print a session summary as the final output line
    #[arg(short, long, default_value = "false")]
    pub summary: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so stdout only carries notifications.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Input file, or `None` for stdin
    #[must_use]
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| *path != Path::new("-"))
    }

    /// How malformed lines are treated
    #[must_use]
    pub fn syntax_policy(&self) -> SyntaxPolicy {
        if self.strict {
            SyntaxPolicy::Abort
        } else {
            SyntaxPolicy::Skip
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the input path is given but does not exist or is
    /// not a regular file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(input) = self.input_path() {
            if !input.exists() {
                return Err(ConfigError::InputNotFound(input.to_path_buf()));
            }
            if !input.is_file() {
                return Err(ConfigError::InputNotFile(input.to_path_buf()));
            }
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input path not found
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path is not a file
    #[error("Input path is not a file: {0}")]
    InputNotFile(PathBuf),
}
