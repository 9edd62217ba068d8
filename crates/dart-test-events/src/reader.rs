// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-line decoder for Dart test runner JSON output
//!
//! # Example
//!
//! ```
//! use dart_test_events::{Notification, Recorder, TestJsonReader};
//!
//! let mut reader = TestJsonReader::new(Recorder::new());
//! reader.process(r#"{"type":"start","name":"t1","time":100}"#).unwrap();
//! reader.process(r#"{"type":"pass","name":"t1","time":350}"#).unwrap();
//!
//! let notifications = reader.into_signaller().into_notifications();
//! assert!(matches!(
//!     notifications[1],
//!     Notification::TestFinished(ref f) if f.id == 1 && f.duration_ms == 250
//! ));
//! ```

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::ReaderError;
use crate::event::Event;
use crate::failure::FailureDetail;
use crate::signal::{
    TestFailure, TestFinished, TestMessage, TestSignaller, TestSkipped, TestStarted,
};

/// Prefix of the line the VM prints once its service is listening
pub const OBSERVATORY_MSG: &str = "Observatory listening on";

/// Decoder state for one test session
///
/// Durations are measured against the most recent `start` only. Events of
/// interleaved tests get durations relative to whichever test started last.
pub struct TestJsonReader<S> {
    signaller: S,
    test_id: u32,
    start_millis: i64,
}

impl<S: TestSignaller> TestJsonReader<S> {
    /// Create a decoder that reports to `signaller`
    pub fn new(signaller: S) -> Self {
        Self {
            signaller,
            test_id: 0,
            start_millis: 0,
        }
    }

    /// Decode one line of runner output and notify the signaller
    ///
    /// Returns `Ok(true)` when the line was an event object and `Ok(false)`
    /// when it was valid JSON of another shape (or blank) and was ignored.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::Syntax` if the line is not JSON. The observatory
    /// line still reports `framework_attached` before the error is returned.
    /// Returns `ReaderError::UnexpectedType` or `ReaderError::MissingType` if
    /// the object is not a recognizable event.
    pub fn process(&mut self, text: &str) -> Result<bool, ReaderError> {
        if text.trim().is_empty() {
            trace!("Ignoring blank line");
            return Ok(false);
        }

        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                if text.starts_with(OBSERVATORY_MSG) && text.ends_with('\n') {
                    debug!("Observatory line seen, framework attached");
                    self.signaller.framework_attached();
                }
                return Err(ReaderError::Syntax(e));
            }
        };

        let Value::Object(obj) = value else {
            trace!("Ignoring non-object JSON line");
            return Ok(false);
        };

        let event = Event::from_object(&obj)?;
        self.process_event(event);
        Ok(true)
    }

    /// Apply an already decoded event
    pub fn process_event(&mut self, event: Event) {
        debug!(kind = event.kind(), test_id = self.test_id, "Decoded event");

        match event {
            Event::Start { name, time_millis } => {
                self.test_id = self.test_id.wrapping_add(1);
                self.signaller
                    .test_started(TestStarted::running(name, self.test_id));
                self.start_millis = time_millis;
            }
            Event::Error {
                name,
                error_message,
                stack_trace,
                time_millis,
            } => {
                let duration_ms = self.elapsed(time_millis);
                self.signaller.test_failed(TestFailure {
                    name,
                    id: self.test_id,
                    message: error_message,
                    stack_trace: Some(stack_trace),
                    is_error: true,
                    actual: None,
                    expected: None,
                    file_path: None,
                    duration_ms,
                });
            }
            Event::Pass { name, time_millis } => {
                let duration_ms = self.elapsed(time_millis);
                self.signaller.test_finished(TestFinished {
                    name,
                    id: self.test_id,
                    duration_ms,
                });
            }
            Event::Fail {
                name,
                fail_message,
                stack_trace,
                time_millis,
            } => {
                let duration_ms = self.elapsed(time_millis);
                let detail = FailureDetail::parse(&fail_message);
                self.signaller.test_failed(TestFailure {
                    name,
                    id: self.test_id,
                    message: detail.description,
                    stack_trace,
                    is_error: false,
                    actual: detail.actual,
                    expected: detail.expected,
                    file_path: None,
                    duration_ms,
                });
            }
            Event::Skip { name, reason } => {
                self.signaller.test_skipped(TestSkipped {
                    name,
                    reason,
                    message: None,
                });
            }
            Event::Print { name, message } => {
                self.signaller.test_message(TestMessage {
                    name,
                    id: self.test_id,
                    text: message,
                });
            }
            Event::Enter => self.signaller.framework_attached(),
            Event::Exit => {}
        }
    }

    fn elapsed(&self, time_millis: i64) -> i64 {
        time_millis.wrapping_sub(self.start_millis)
    }

    /// Id assigned to the most recent `start`, or 0 before any
    #[must_use]
    pub fn current_test_id(&self) -> u32 {
        self.test_id
    }

    /// Timestamp of the most recent `start`
    #[must_use]
    pub fn start_millis(&self) -> i64 {
        self.start_millis
    }

    /// Borrow the signaller
    #[must_use]
    pub fn signaller(&self) -> &S {
        &self.signaller
    }

    /// Mutably borrow the signaller
    pub fn signaller_mut(&mut self) -> &mut S {
        &mut self.signaller
    }

    /// Consume the decoder and return the signaller
    #[must_use]
    pub fn into_signaller(self) -> S {
        self.signaller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{NO_ERROR_MESSAGE, NO_MESSAGE, NO_NAME, NO_SKIP_REASON, NO_STACK_TRACE};
    use crate::signal::{Notification, Recorder};
    use similar_asserts::assert_eq;

    fn reader() -> TestJsonReader<Recorder> {
        TestJsonReader::new(Recorder::new())
    }

    fn feed(reader: &mut TestJsonReader<Recorder>, lines: &[&str]) {
        for line in lines {
            reader.process(line).expect("Should process");
        }
    }

    #[test]
    fn test_start_then_pass() {
        let mut reader = reader();
        feed(
            &mut reader,
            &[
                r#"{"type":"start","name":"t1","time":100}"#,
                r#"{"type":"pass","name":"t1","time":350}"#,
            ],
        );

        assert_eq!(
            reader.signaller().notifications(),
            &[
                Notification::TestStarted(TestStarted::running("t1", 1)),
                Notification::TestFinished(TestFinished {
                    name: "t1".to_string(),
                    id: 1,
                    duration_ms: 250,
                }),
            ]
        );
        assert_eq!(reader.current_test_id(), 1);
        assert_eq!(reader.start_millis(), 100);
    }

    #[test]
    fn test_ids_increment_per_start() {
        let mut reader = reader();
        feed(
            &mut reader,
            &[
                r#"{"type":"start","name":"a"}"#,
                r#"{"type":"start","name":"b"}"#,
                r#"{"type":"start","name":"c"}"#,
            ],
        );
        let ids: Vec<u32> = reader
            .signaller()
            .notifications()
            .iter()
            .filter_map(|n| match n {
                Notification::TestStarted(s) => Some(s.id),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_error_event() {
        let mut reader = reader();
        feed(
            &mut reader,
            &[
                r#"{"type":"start","name":"e","time":10}"#,
                r#"{"type":"error","name":"e","errorMessage":"bad state","stackTrace":"main.dart 3","time":15}"#,
            ],
        );
        assert_eq!(
            reader.signaller().notifications()[1],
            Notification::TestFailed(TestFailure {
                name: "e".to_string(),
                id: 1,
                message: "bad state".to_string(),
                stack_trace: Some("main.dart 3".to_string()),
                is_error: true,
                actual: None,
                expected: None,
                file_path: None,
                duration_ms: 5,
            })
        );
    }

    #[test]
    fn test_error_event_defaults() {
        let mut reader = reader();
        feed(&mut reader, &[r#"{"type":"error"}"#]);
        match &reader.signaller().notifications()[0] {
            Notification::TestFailed(f) => {
                assert_eq!(f.name, NO_NAME);
                assert_eq!(f.message, NO_ERROR_MESSAGE);
                assert_eq!(f.stack_trace.as_deref(), Some(NO_STACK_TRACE));
                assert_eq!(f.id, 0);
                assert_eq!(f.duration_ms, 0);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_fail_with_comparison_block() {
        let mut reader = reader();
        let fail = serde_json::json!({
            "type": "fail",
            "name": "cmp",
            "time": 40,
            "failMessage": "Assertion failed\nExpected: <1, 2>\n  Actual: <1, 3>\n   ^\n Differ at index 1\n"
        })
        .to_string();
        feed(
            &mut reader,
            &[r#"{"type":"start","name":"cmp","time":30}"#, fail.as_str()],
        );

        assert_eq!(
            reader.signaller().notifications()[1],
            Notification::TestFailed(TestFailure {
                name: "cmp".to_string(),
                id: 1,
                message: "Assertion failed".to_string(),
                stack_trace: None,
                is_error: false,
                actual: Some("<1, 3>".to_string()),
                expected: Some("<1, 2>".to_string()),
                file_path: None,
                duration_ms: 10,
            })
        );
    }

    #[test]
    fn test_fail_with_partial_block() {
        let mut reader = reader();
        let message = "oops\nExpected: 1\n  Actual: 2\n";
        let fail = serde_json::json!({"type": "fail", "failMessage": message}).to_string();
        feed(&mut reader, &[fail.as_str()]);

        match &reader.signaller().notifications()[0] {
            Notification::TestFailed(f) => {
                assert_eq!(f.message, message);
                assert!(f.expected.is_none());
                assert!(f.actual.is_none());
                assert!(!f.is_error);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_skip_and_print() {
        let mut reader = reader();
        feed(
            &mut reader,
            &[
                r#"{"type":"start","name":"p"}"#,
                r#"{"type":"print","name":"p","message":"hello"}"#,
                r#"{"type":"print"}"#,
                r#"{"type":"skip","name":"s"}"#,
            ],
        );
        let notifications = reader.signaller().notifications();
        assert_eq!(
            notifications[1],
            Notification::TestMessage(TestMessage {
                name: "p".to_string(),
                id: 1,
                text: "hello".to_string(),
            })
        );
        assert_eq!(
            notifications[2],
            Notification::TestMessage(TestMessage {
                name: NO_NAME.to_string(),
                id: 1,
                text: NO_MESSAGE.to_string(),
            })
        );
        assert_eq!(
            notifications[3],
            Notification::TestSkipped(TestSkipped {
                name: "s".to_string(),
                reason: NO_SKIP_REASON.to_string(),
                message: None,
            })
        );
    }

    #[test]
    fn test_enter_attaches_and_exit_is_silent() {
        let mut reader = reader();
        feed(
            &mut reader,
            &[r#"{"type":"enter"}"#, r#"{"type":"enter"}"#, r#"{"type":"exit"}"#],
        );
        assert_eq!(reader.signaller().attach_count(), 2);
        assert_eq!(reader.signaller().notifications().len(), 2);
    }

    #[test]
    fn test_unknown_type() {
        let mut reader = reader();
        let err = reader.process(r#"{"type":"bogus"}"#).unwrap_err();
        assert!(err.is_decode());
        assert!(err.to_string().contains("bogus"));
        assert!(reader.signaller().notifications().is_empty());
    }

    #[test]
    fn test_observatory_line_attaches_then_fails() {
        let mut reader = reader();
        let err = reader
            .process("Observatory listening on http://127.0.0.1:1234\n")
            .unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(
            reader.signaller().notifications(),
            &[Notification::FrameworkAttached]
        );
    }

    #[test]
    fn test_observatory_line_without_newline_does_not_attach() {
        let mut reader = reader();
        let err = reader
            .process("Observatory listening on http://127.0.0.1:1234")
            .unwrap_err();
        assert!(err.is_syntax());
        assert!(reader.signaller().notifications().is_empty());
    }

    #[test]
    fn test_non_object_json_is_ignored() {
        let mut reader = reader();
        assert!(!reader.process("[1,2,3]").expect("Should parse"));
        assert!(!reader.process("42").expect("Should parse"));
        assert!(!reader.process("null").expect("Should parse"));
        assert!(!reader.process("   \n").expect("Should parse"));
        assert!(reader.signaller().notifications().is_empty());
    }

    #[test]
    fn test_negative_duration_is_reported() {
        let mut reader = reader();
        feed(
            &mut reader,
            &[
                r#"{"type":"start","name":"a","time":500}"#,
                r#"{"type":"pass","name":"a","time":200}"#,
            ],
        );
        match &reader.signaller().notifications()[1] {
            Notification::TestFinished(f) => assert_eq!(f.duration_ms, -300),
            other => panic!("expected finished, got {other:?}"),
        }
    }

    #[test]
    fn test_independent_sessions() {
        let mut first = reader();
        let mut second = reader();
        first
            .process(r#"{"type":"start","name":"a","time":1}"#)
            .unwrap();
        first
            .process(r#"{"type":"start","name":"b","time":2}"#)
            .unwrap();
        second
            .process(r#"{"type":"start","name":"c","time":3}"#)
            .unwrap();
        assert_eq!(first.current_test_id(), 2);
        assert_eq!(second.current_test_id(), 1);
        assert_eq!(second.start_millis(), 3);
    }

    #[test]
    fn test_id_counter_wraps_instead_of_panicking() {
        let mut reader = reader();
        reader.test_id = u32::MAX;
        feed(&mut reader, &[r#"{"type":"start","name":"late"}"#]);
        assert_eq!(reader.current_test_id(), 0);
        assert!(matches!(
            reader.signaller().notifications()[0],
            Notification::TestStarted(ref s) if s.id == 0 && s.name == "late"
        ));
    }

    #[test]
    fn test_borrowed_signaller() {
        let mut recorder = Recorder::new();
        {
            let mut reader = TestJsonReader::new(&mut recorder);
            reader.process(r#"{"type":"enter"}"#).unwrap();
        }
        assert_eq!(recorder.attach_count(), 1);
    }
}
