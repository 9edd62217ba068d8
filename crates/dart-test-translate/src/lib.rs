// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! dart-test-translate library
//!
//! This module exports the pieces of the dart-test-translate binary for use
//! in integration tests.

pub mod config;
pub mod output;
pub mod translate;
