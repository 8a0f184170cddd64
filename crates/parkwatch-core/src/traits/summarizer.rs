// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Natural-language summary adapter trait.

use async_trait::async_trait;

use crate::error::ParkwatchError;
use crate::types::Detection;

/// Text shown whenever the summary service cannot be reached or answers
/// with something unusable.
pub const FALLBACK_SUMMARY: &str = "Could not connect to summary service.";

/// Produces a one-line narrative for a set of detections.
#[async_trait]
pub trait SummaryAdapter: Send + Sync {
    fn name(&self) -> &str;

    async fn summarize(&self, detections: &[Detection]) -> Result<String, ParkwatchError>;

    /// Summarize, degrading any failure to [`FALLBACK_SUMMARY`].
    async fn summarize_or_fallback(&self, detections: &[Detection]) -> String {
        match self.summarize(detections).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(adapter = self.name(), error = %e, "summary unavailable, using fallback");
                FALLBACK_SUMMARY.to_string()
            }
        }
    }
}
