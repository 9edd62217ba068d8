// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for dart-test-events

use thiserror::Error;

/// Errors that can occur while decoding test runner output
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The line is not well-formed JSON
    #[error("JSON syntax error: {0}")]
    Syntax(#[from] serde_json::Error),

    /// The line is a JSON object whose `type` is not a known event kind
    #[error("unexpected type: {0} (check for SDK update)")]
    UnexpectedType(String),

    /// The line is a JSON object without a usable `type` field
    #[error("event object has no `type` field")]
    MissingType,

    /// Error reading runner output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReaderError {
    /// Whether the input was not valid JSON at all
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }

    /// Whether the input was valid JSON but not a recognizable event
    ///
    /// These point at a protocol mismatch between the runner and this crate.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::UnexpectedType(_) | Self::MissingType)
    }
}
