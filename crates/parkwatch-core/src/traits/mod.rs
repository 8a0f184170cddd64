// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits for the two outbound services.

pub mod detector;
pub mod summarizer;

pub use detector::DetectionAdapter;
pub use summarizer::SummaryAdapter;
