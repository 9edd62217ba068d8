// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! JSON lines output of notifications

use std::io::{self, Write};

use dart_test_events::{
    Notification, TestFailure, TestFinished, TestMessage, TestSignaller, TestSkipped, TestStarted,
};
use serde::Serialize;

/// Signaller that writes each notification as one JSON line
///
/// Write failures cannot be returned through [`TestSignaller`], so the first
/// one is kept and later notifications are dropped. Check it with
/// [`NotificationWriter::finish`].
pub struct NotificationWriter<W: Write> {
    out: W,
    written: usize,
    error: Option<io::Error>,
}

impl<W: Write> NotificationWriter<W> {
    /// Write notifications to `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            written: 0,
            error: None,
        }
    }

    /// Notifications written so far
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Write any serializable value as one line
    ///
    /// # Errors
    ///
    /// Returns an error if an earlier write failed or this one fails.
    pub fn write_line<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        serde_json::to_writer(&mut self.out, value)?;
        self.out.write_all(b"\n")
    }

    fn emit(&mut self, notification: Notification) {
        if self.error.is_some() {
            return;
        }
        match self.write_line(&notification) {
            Ok(()) => self.written += 1,
            Err(e) => self.error = Some(e),
        }
    }

    /// Flush and return the writer
    ///
    /// # Errors
    ///
    /// Returns the first write failure, or a flush failure.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> TestSignaller for NotificationWriter<W> {
    fn test_started(&mut self, started: TestStarted) {
        self.emit(Notification::TestStarted(started));
    }

    fn test_failed(&mut self, failure: TestFailure) {
        self.emit(Notification::TestFailed(failure));
    }

    fn test_finished(&mut self, finished: TestFinished) {
        self.emit(Notification::TestFinished(finished));
    }

    fn test_skipped(&mut self, skipped: TestSkipped) {
        self.emit(Notification::TestSkipped(skipped));
    }

    fn test_message(&mut self, message: TestMessage) {
        self.emit(Notification::TestMessage(message));
    }

    fn framework_attached(&mut self) {
        self.emit(Notification::FrameworkAttached);
    }
}
