// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Aggregated results for a test session

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::signal::{
    TestFailure, TestFinished, TestMessage, TestSignaller, TestSkipped, TestStarted,
};

/// Running tally of the notifications in one session
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSummary {
    /// Tests started
    pub started: usize,
    /// Tests passed
    pub passed: usize,
    /// Assertion failures
    pub failed: usize,
    /// Tests that errored
    pub errors: usize,
    /// Tests skipped
    pub skipped: usize,
    /// Printed messages
    pub messages: usize,
    /// Framework attach signals
    pub attached: usize,
    /// Sum of reported durations in milliseconds
    pub total_duration_ms: i64,
    /// Names of failed or errored tests, in order
    pub failing: Vec<String>,
    /// Wall clock time of the first notification
    pub started_at: Option<DateTime<Utc>>,
    /// Wall clock time of the latest notification
    pub finished_at: Option<DateTime<Utc>>,
}

impl SessionSummary {
    /// Create an empty summary
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that nothing failed or errored
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// Names of failed or errored tests
    #[must_use]
    pub fn failing(&self) -> &[String] {
        &self.failing
    }

    fn touch(&mut self) {
        let now = Utc::now();
        self.started_at.get_or_insert(now);
        self.finished_at = Some(now);
    }
}

impl TestSignaller for SessionSummary {
    fn test_started(&mut self, _started: TestStarted) {
        self.touch();
        self.started += 1;
    }

    fn test_failed(&mut self, failure: TestFailure) {
        self.touch();
        if failure.is_error {
            self.errors += 1;
        } else {
            self.failed += 1;
        }
        self.total_duration_ms = self.total_duration_ms.wrapping_add(failure.duration_ms);
        self.failing.push(failure.name);
    }

    fn test_finished(&mut self, finished: TestFinished) {
        self.touch();
        self.passed += 1;
        self.total_duration_ms = self.total_duration_ms.wrapping_add(finished.duration_ms);
    }

    fn test_skipped(&mut self, _skipped: TestSkipped) {
        self.touch();
        self.skipped += 1;
    }

    fn test_message(&mut self, _message: TestMessage) {
        self.touch();
        self.messages += 1;
    }

    fn framework_attached(&mut self) {
        self.touch();
        self.attached += 1;
    }
}

/// Signaller that forwards every notification to two others
#[derive(Debug, Default)]
pub struct Tee<A, B> {
    /// First receiver
    pub first: A,
    /// Second receiver
    pub second: B,
}

impl<A, B> Tee<A, B> {
    /// Pair two signallers
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Split back into the two signallers
    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: TestSignaller, B: TestSignaller> TestSignaller for Tee<A, B> {
    fn test_started(&mut self, started: TestStarted) {
        self.first.test_started(started.clone());
        self.second.test_started(started);
    }

    fn test_failed(&mut self, failure: TestFailure) {
        self.first.test_failed(failure.clone());
        self.second.test_failed(failure);
    }

    fn test_finished(&mut self, finished: TestFinished) {
        self.first.test_finished(finished.clone());
        self.second.test_finished(finished);
    }

    fn test_skipped(&mut self, skipped: TestSkipped) {
        self.first.test_skipped(skipped.clone());
        self.second.test_skipped(skipped);
    }

    fn test_message(&mut self, message: TestMessage) {
        self.first.test_message(message.clone());
        self.second.test_message(message);
    }

    fn framework_attached(&mut self) {
        self.first.framework_attached();
        self.second.framework_attached();
    }
}
