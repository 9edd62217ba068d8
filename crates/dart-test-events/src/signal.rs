// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test lifecycle notifications
//!
//! [`TestSignaller`] is the seam between the decoder and whatever renders
//! results. The decoder calls exactly one method per decoded event.

use serde::{Deserialize, Serialize};

/// A test began running
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestStarted {
    /// Test name
    pub name: String,
    /// Session-local test id, starting at 1
    pub id: u32,
    /// Duration at start, always 0 from the decoder
    pub duration_ms: i64,
    /// Source location hint for navigation
    pub location_hint: Option<String>,
    /// Free-form metadata
    pub metadata: Option<String>,
    /// Id of the enclosing suite or group
    pub parent_id: Option<u32>,
    /// Whether the test is now running
    pub running: bool,
}

impl TestStarted {
    /// A top-level running test with no location information
    #[must_use]
    pub fn running(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
            duration_ms: 0,
            location_hint: None,
            metadata: None,
            parent_id: None,
            running: true,
        }
    }
}

/// A test failed, either on an assertion or with an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFailure {
    /// Test name
    pub name: String,
    /// Session-local test id
    pub id: u32,
    /// Failure description
    pub message: String,
    /// Stack trace, if any
    pub stack_trace: Option<String>,
    /// `true` for errors, `false` for assertion failures
    pub is_error: bool,
    /// Actual value of a failed comparison
    pub actual: Option<String>,
    /// Expected value of a failed comparison
    pub expected: Option<String>,
    /// File holding the expected value
    pub file_path: Option<String>,
    /// Milliseconds since the last start; may be negative
    pub duration_ms: i64,
}

/// A test passed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFinished {
    /// Test name
    pub name: String,
    /// Session-local test id
    pub id: u32,
    /// Milliseconds since the last start; may be negative
    pub duration_ms: i64,
}

/// A test was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSkipped {
    /// Test name
    pub name: String,
    /// Why it was skipped
    pub reason: String,
    /// Additional text
    pub message: Option<String>,
}

/// Output produced while a test was running
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestMessage {
    /// Test name
    pub name: String,
    /// Session-local test id
    pub id: u32,
    /// Printed text
    pub text: String,
}

/// Consumer of test lifecycle notifications
pub trait TestSignaller {
    /// A test started
    fn test_started(&mut self, started: TestStarted);

    /// A test failed or errored
    fn test_failed(&mut self, failure: TestFailure);

    /// A test passed
    fn test_finished(&mut self, finished: TestFinished);

    /// A test was skipped
    fn test_skipped(&mut self, skipped: TestSkipped);

    /// A test printed output
    fn test_message(&mut self, message: TestMessage);

    /// The test framework attached to the session. May repeat.
    fn framework_attached(&mut self);
}

impl<T: TestSignaller + ?Sized> TestSignaller for &mut T {
    fn test_started(&mut self, started: TestStarted) {
        (**self).test_started(started);
    }

    fn test_failed(&mut self, failure: TestFailure) {
        (**self).test_failed(failure);
    }

    fn test_finished(&mut self, finished: TestFinished) {
        (**self).test_finished(finished);
    }

    fn test_skipped(&mut self, skipped: TestSkipped) {
        (**self).test_skipped(skipped);
    }

    fn test_message(&mut self, message: TestMessage) {
        (**self).test_message(message);
    }

    fn framework_attached(&mut self) {
        (**self).framework_attached();
    }
}

// ============================================================================
// Recorded Notifications
// ============================================================================

/// Any single notification, in serializable form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    /// See [`TestSignaller::test_started`]
    TestStarted(TestStarted),
    /// See [`TestSignaller::test_failed`]
    TestFailed(TestFailure),
    /// See [`TestSignaller::test_finished`]
    TestFinished(TestFinished),
    /// See [`TestSignaller::test_skipped`]
    TestSkipped(TestSkipped),
    /// See [`TestSignaller::test_message`]
    TestMessage(TestMessage),
    /// See [`TestSignaller::framework_attached`]
    FrameworkAttached,
}

impl Notification {
    /// Replay this notification into a signaller
    pub fn deliver<S: TestSignaller + ?Sized>(self, signaller: &mut S) {
        match self {
            Self::TestStarted(started) => signaller.test_started(started),
            Self::TestFailed(failure) => signaller.test_failed(failure),
            Self::TestFinished(finished) => signaller.test_finished(finished),
            Self::TestSkipped(skipped) => signaller.test_skipped(skipped),
            Self::TestMessage(message) => signaller.test_message(message),
            Self::FrameworkAttached => signaller.framework_attached(),
        }
    }
}

/// Signaller that keeps every notification in arrival order
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    notifications: Vec<Notification>,
}

impl Recorder {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Take ownership of the recorded notifications
    #[must_use]
    pub fn into_notifications(self) -> Vec<Notification> {
        self.notifications
    }

    /// Number of `framework_attached` calls seen
    #[must_use]
    pub fn attach_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|n| matches!(n, Notification::FrameworkAttached))
            .count()
    }
}

impl TestSignaller for Recorder {
    fn test_started(&mut self, started: TestStarted) {
        self.notifications.push(Notification::TestStarted(started));
    }

    fn test_failed(&mut self, failure: TestFailure) {
        self.notifications.push(Notification::TestFailed(failure));
    }

    fn test_finished(&mut self, finished: TestFinished) {
        self.notifications.push(Notification::TestFinished(finished));
    }

    fn test_skipped(&mut self, skipped: TestSkipped) {
        self.notifications.push(Notification::TestSkipped(skipped));
    }

    fn test_message(&mut self, message: TestMessage) {
        self.notifications.push(Notification::TestMessage(message));
    }

    fn framework_attached(&mut self) {
        self.notifications.push(Notification::FrameworkAttached);
    }
}
