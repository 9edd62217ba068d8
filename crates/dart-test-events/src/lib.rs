// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! dart-test-events: Decoder for the Dart test runner JSON protocol
//!
//! The Dart test runner, when asked for machine readable output, writes one
//! JSON object per line (`start`, `pass`, `fail`, `error`, `skip`, `print`,
//! `enter`, `exit`). This crate turns each line into a test lifecycle
//! notification delivered to a [`TestSignaller`].
//!
//! # Example
//!
//! ```no_run
//! use dart_test_events::{Recorder, SyntaxPolicy, TestJsonReader, translate_reader};
//!
//! // Decode one line at a time
//! let mut reader = TestJsonReader::new(Recorder::new());
//! reader.process(r#"{"type":"start","name":"adds","time":0}"#).unwrap();
//!
//! // Or drive a whole stream
//! let stdin = std::io::stdin();
//! translate_reader(stdin.lock(), &mut reader, SyntaxPolicy::Skip).unwrap();
//! ```

pub mod error;
pub mod event;
pub mod failure;
pub mod reader;
pub mod signal;
pub mod stream;
pub mod summary;

pub use error::ReaderError;
pub use event::Event;
pub use failure::FailureDetail;
pub use reader::{OBSERVATORY_MSG, TestJsonReader};
pub use signal::{
    Notification, Recorder, TestFailure, TestFinished, TestMessage, TestSignaller, TestSkipped,
    TestStarted,
};
pub use stream::{StreamStats, SyntaxPolicy, translate_reader};
pub use summary::{SessionSummary, Tee};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::ReaderError;
    pub use crate::reader::TestJsonReader;
    pub use crate::signal::{Notification, Recorder, TestSignaller};
    pub use crate::stream::{SyntaxPolicy, translate_reader};
    pub use crate::summary::SessionSummary;
}
