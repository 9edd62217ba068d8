// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for Expected/Actual extraction

#![no_main]

use libfuzzer_sys::fuzz_target;

use dart_test_events::FailureDetail;

fuzz_target!(|data: &[u8]| {
    if let Ok(message) = std::str::from_utf8(data) {
        let detail = FailureDetail::parse(message);
        assert!(detail.description.len() <= message.len());
    }
});
