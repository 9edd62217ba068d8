// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Running one translation from configuration to output

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use dart_test_events::{SessionSummary, StreamStats, Tee, TestJsonReader, translate_reader};
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::output::NotificationWriter;

/// Final line printed with `--summary`
#[derive(Debug, Serialize)]
pub struct SummaryLine<'a> {
    /// Marker so consumers can tell it from notifications
    pub event: &'static str,
    /// Line counts
    pub stream: StreamStats,
    /// Notification tally
    pub session: &'a SessionSummary,
}

/// Outcome of a finished translation
#[derive(Debug)]
pub struct Translation {
    /// Line counts
    pub stats: StreamStats,
    /// Notification tally
    pub summary: SessionSummary,
}

/// Open the configured input
///
/// # Errors
///
/// Returns an error if the input file cannot be opened.
pub fn open_input(config: &Config) -> Result<Box<dyn BufRead>> {
    match config.input_path() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Translate `input` to JSON lines on `out` as configured
///
/// # Errors
///
/// Returns an error on read or write failures, unknown event types, and
/// malformed lines in strict mode.
pub fn run<R: BufRead, W: Write>(config: &Config, input: R, out: W) -> Result<Translation> {
    let signaller = Tee::new(NotificationWriter::new(out), SessionSummary::new());
    let mut reader = TestJsonReader::new(signaller);

    let stats = translate_reader(input, &mut reader, config.syntax_policy())
        .context("failed to translate runner output")?;

    let (writer, summary) = reader.into_signaller().into_inner();
    let notifications = writer.written();
    let mut out = writer.finish().context("failed to write notifications")?;

    if config.summary {
        let line = SummaryLine {
            event: "summary",
            stream: stats,
            session: &summary,
        };
        serde_json::to_writer(&mut out, &line).context("failed to write summary")?;
        writeln!(out).context("failed to write summary")?;
        out.flush().context("failed to write summary")?;
    }

    info!(
        lines = stats.lines,
        notifications,
        passed = summary.passed,
        failed = summary.failed,
        errors = summary.errors,
        skipped = summary.skipped,
        "Translation finished"
    );

    Ok(Translation { stats, summary })
}
