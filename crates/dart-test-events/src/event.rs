// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Decoded runner events
//!
//! Each line the Dart test runner writes in JSON mode is an object with a
//! `type` discriminator plus a handful of optional fields. [`Event`] is the
//! decoded form of one such object. Optional fields never fail decoding:
//! a missing field, `null`, or a nested array/object falls back to a fixed
//! placeholder string so downstream consumers always have something to show.

use serde_json::{Map, Value};

use crate::error::ReaderError;

// ============================================================================
// Wire Constants
// ============================================================================

const JSON_TYPE: &str = "type";
const JSON_NAME: &str = "name";
const JSON_MILLIS: &str = "time";
const JSON_MESSAGE: &str = "message";
const JSON_ERROR_MESSAGE: &str = "errorMessage";
const JSON_FAIL_MESSAGE: &str = "failMessage";
const JSON_STACK_TRACE: &str = "stackTrace";
const JSON_REASON: &str = "reason";

/// Placeholder used when an event carries no test name
pub const NO_NAME: &str = "<no name>";
/// Placeholder used when an `error` event carries no message
pub const NO_ERROR_MESSAGE: &str = "<no error message>";
/// Placeholder used when a `fail` event carries no message
pub const NO_FAIL_MESSAGE: &str = "<no fail message>";
/// Placeholder used when an `error` event carries no stack trace
pub const NO_STACK_TRACE: &str = "<no stack trace>";
/// Placeholder used when a `skip` event carries no reason
pub const NO_SKIP_REASON: &str = "<no skip reason>";
/// Placeholder used when a `print` event carries no text
pub const NO_MESSAGE: &str = "<no message>";

// ============================================================================
// Event Types
// ============================================================================

/// One decoded line of runner output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A test began running
    Start {
        /// Test name
        name: String,
        /// Runner clock in milliseconds
        time_millis: i64,
    },
    /// The running test raised an error outside an assertion
    Error {
        /// Test name
        name: String,
        /// Error text
        error_message: String,
        /// Stack trace text
        stack_trace: String,
        /// Runner clock in milliseconds
        time_millis: i64,
    },
    /// The running test passed
    Pass {
        /// Test name
        name: String,
        /// Runner clock in milliseconds
        time_millis: i64,
    },
    /// The running test failed an assertion
    Fail {
        /// Test name
        name: String,
        /// Failure text, possibly with an Expected/Actual block
        fail_message: String,
        /// Stack trace, only when the runner sent one
        stack_trace: Option<String>,
        /// Runner clock in milliseconds
        time_millis: i64,
    },
    /// A test was skipped
    Skip {
        /// Test name
        name: String,
        /// Why it was skipped
        reason: String,
    },
    /// The running test printed something
    Print {
        /// Test name
        name: String,
        /// Printed text
        message: String,
    },
    /// The runner attached to the session
    Enter,
    /// The runner finished
    Exit,
}

impl Event {
    /// Decode an event from a JSON object
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::MissingType` if `type` is absent or not a
    /// primitive, and `ReaderError::UnexpectedType` if it names an unknown
    /// event kind.
    pub fn from_object(obj: &Map<String, Value>) -> Result<Self, ReaderError> {
        let kind = obj
            .get(JSON_TYPE)
            .and_then(primitive_text)
            .ok_or(ReaderError::MissingType)?;

        let event = match kind.as_str() {
            "start" => Self::Start {
                name: test_name(obj),
                time_millis: millis_field(obj, JSON_MILLIS),
            },
            "error" => Self::Error {
                name: test_name(obj),
                error_message: string_field(obj, JSON_ERROR_MESSAGE, NO_ERROR_MESSAGE),
                stack_trace: string_field(obj, JSON_STACK_TRACE, NO_STACK_TRACE),
                time_millis: millis_field(obj, JSON_MILLIS),
            },
            "pass" => Self::Pass {
                name: test_name(obj),
                time_millis: millis_field(obj, JSON_MILLIS),
            },
            "fail" => Self::Fail {
                name: test_name(obj),
                fail_message: string_field(obj, JSON_FAIL_MESSAGE, NO_FAIL_MESSAGE),
                stack_trace: obj.get(JSON_STACK_TRACE).and_then(primitive_text),
                time_millis: millis_field(obj, JSON_MILLIS),
            },
            "skip" => Self::Skip {
                name: test_name(obj),
                reason: string_field(obj, JSON_REASON, NO_SKIP_REASON),
            },
            "print" => Self::Print {
                name: test_name(obj),
                message: string_field(obj, JSON_MESSAGE, NO_MESSAGE),
            },
            "enter" => Self::Enter,
            "exit" => Self::Exit,
            other => return Err(ReaderError::UnexpectedType(other.to_string())),
        };

        Ok(event)
    }

    /// Wire name of this event kind
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Error { .. } => "error",
            Self::Pass { .. } => "pass",
            Self::Fail { .. } => "fail",
            Self::Skip { .. } => "skip",
            Self::Print { .. } => "print",
            Self::Enter => "enter",
            Self::Exit => "exit",
        }
    }

    /// Test name carried by this event, if the kind has one
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Start { name, .. }
            | Self::Error { name, .. }
            | Self::Pass { name, .. }
            | Self::Fail { name, .. }
            | Self::Skip { name, .. }
            | Self::Print { name, .. } => Some(name),
            Self::Enter | Self::Exit => None,
        }
    }
}

// ============================================================================
// Field Helpers
// ============================================================================

fn test_name(obj: &Map<String, Value>) -> String {
    string_field(obj, JSON_NAME, NO_NAME)
}

/// Read a primitive field as text, or fall back to `default`
#[must_use]
pub fn string_field(obj: &Map<String, Value>, key: &str, default: &str) -> String {
    obj.get(key)
        .and_then(primitive_text)
        .unwrap_or_else(|| default.to_string())
}

/// Read a millisecond timestamp, or `0` when absent or unusable
///
/// Fractional values are truncated and numeric strings are parsed.
#[must_use]
pub fn millis_field(obj: &Map<String, Value>, key: &str) -> i64 {
    match obj.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|v| i64::try_from(v).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().map(|v| v as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Text form of a JSON primitive; `None` for null, arrays and objects
fn primitive_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
