// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Assertion failure text
//!
//! `package:test` renders failed `expect` calls as free text followed by an
//! indented block:
//!
//! ```text
//! Assertion failed
//! Expected: <1, 2>
//!   Actual: <1, 3>
//!    ^
//!  Differ at index 1
//! ```
//!
//! [`FailureDetail::parse`] splits that block off so a reporter can show a
//! proper diff. Messages that only look similar are left untouched.

use std::sync::LazyLock;

use regex::Regex;

const EXPECTED: &str = "Expected: ";

static EXPECTED_ACTUAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\nExpected: ([^\r\n]*)\n  Actual: ([^\r\n]*)\n *\^\n Differ[^\r\n]*\n")
        .expect("expected/actual pattern is valid")
});

/// A failure message split into description and optional comparison values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetail {
    /// Human readable part of the message
    pub description: String,
    /// Expected value text, when the message carried a comparison block
    pub expected: Option<String>,
    /// Actual value text, when the message carried a comparison block
    pub actual: Option<String>,
}

impl FailureDetail {
    /// Split a `fail` message into description and expected/actual values
    ///
    /// When the message has no complete comparison block the whole text is
    /// the description and both values are `None`.
    #[must_use]
    pub fn parse(message: &str) -> Self {
        let Some(first) = message.find(EXPECTED) else {
            return Self::plain(message);
        };

        // The pattern starts at the line break before the first marker.
        let search_from = if message[..first].ends_with('\n') {
            first - 1
        } else {
            first
        };

        match EXPECTED_ACTUAL.captures_at(message, search_from) {
            Some(caps) => {
                let head = &message[..first];
                Self {
                    description: head.strip_suffix('\n').unwrap_or(head).to_string(),
                    expected: caps.get(1).map(|m| m.as_str().to_string()),
                    actual: caps.get(2).map(|m| m.as_str().to_string()),
                }
            }
            None => Self::plain(message),
        }
    }

    fn plain(message: &str) -> Self {
        Self {
            description: message.to_string(),
            expected: None,
            actual: None,
        }
    }

    /// Whether a comparison block was found
    #[must_use]
    pub fn has_comparison(&self) -> bool {
        self.expected.is_some() && self.actual.is_some()
    }
}
