// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! dart-test-translate: Dart test runner JSON to lifecycle notifications
//!
//! Reads the runner's line-delimited JSON from a file or stdin and writes one
//! JSON notification per line to stdout. Logs go to stderr.

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use dart_test_translate::config::Config;
use dart_test_translate::translate::{open_input, run};

fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    config.validate()?;
    debug!(?config, "Starting translation");

    let input = open_input(&config)?;
    let stdout = io::stdout();
    let translation = run(&config, input, stdout.lock())?;

    if !translation.summary.all_passed() {
        debug!(failing = ?translation.summary.failing(), "Session had failures");
    }

    Ok(())
}
