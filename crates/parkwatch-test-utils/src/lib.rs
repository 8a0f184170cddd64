// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for parkwatch.
//!
//! - [`MockDetector`]: scripted detection results, no network.
//! - [`MockSummarizer`]: scripted summaries with input capture.
//! - [`fixtures`]: canned lots and scan records.

pub mod fixtures;
pub mod mock_detector;
pub mod mock_summarizer;

pub use mock_detector::MockDetector;
pub use mock_summarizer::{DEFAULT_MOCK_SUMMARY, MockSummarizer};
