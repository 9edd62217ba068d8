// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Driving a decoder over a whole output stream

use std::io::BufRead;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ReaderError;
use crate::reader::TestJsonReader;
use crate::signal::TestSignaller;

/// What to do with lines that are not JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyntaxPolicy {
    /// Log the line and keep reading
    #[default]
    Skip,
    /// Stop at the first malformed line
    Abort,
}

/// Line counts from one stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    /// Lines read
    pub lines: usize,
    /// Lines decoded into events
    pub handled: usize,
    /// Blank lines and non-object JSON
    pub ignored: usize,
    /// Lines that were not JSON
    pub malformed: usize,
}

/// Feed every line of `input` to `reader`
///
/// Lines keep their trailing newline so the observatory check sees it.
/// Bytes that are not UTF-8 are replaced, so such a line fails as malformed
/// JSON instead of ending the stream.
///
/// # Errors
///
/// Returns `ReaderError::Io` if reading fails, the first decode error, and
/// under `SyntaxPolicy::Abort` the first syntax error.
pub fn translate_reader<R, S>(
    mut input: R,
    reader: &mut TestJsonReader<S>,
    policy: SyntaxPolicy,
) -> Result<StreamStats, ReaderError>
where
    R: BufRead,
    S: TestSignaller,
{
    let mut stats = StreamStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines += 1;
        let line = String::from_utf8_lossy(&buf);

        match reader.process(&line) {
            Ok(true) => stats.handled += 1,
            Ok(false) => stats.ignored += 1,
            Err(e) if e.is_syntax() && policy == SyntaxPolicy::Skip => {
                stats.malformed += 1;
                warn!(line = stats.lines, error = %e, "Skipping malformed line");
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        lines = stats.lines,
        handled = stats.handled,
        ignored = stats.ignored,
        malformed = stats.malformed,
        "Stream finished"
    );
    Ok(stats)
}
