// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the line decoder
//!
//! Feeds arbitrary text to `TestJsonReader::process` line by line.

#![no_main]

use libfuzzer_sys::fuzz_target;

use dart_test_events::{Recorder, TestJsonReader};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut reader = TestJsonReader::new(Recorder::new());

        // Process each line - decoder should never panic
        for line in input.split_inclusive('\n') {
            let _ = reader.process(line);
        }
    }
});
