// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for parkwatch.
//!
//! Holds the detection data model, the workspace error type, the shared
//! input validators, and the adapter traits implemented by the HTTP clients
//! and the test mocks.

pub mod error;
pub mod traits;
pub mod types;
pub mod validate;

pub use error::ParkwatchError;
pub use traits::summarizer::FALLBACK_SUMMARY;
pub use traits::{DetectionAdapter, SummaryAdapter};
pub use types::{
    AvailableSlot, DEFAULT_CONFIDENCE, Detection, ImageUpload, LOW_CONFIDENCE_THRESHOLD,
    ScanRecord, SlotClass, Speaker, TranscriptEntry,
};
pub use validate::is_valid_email;

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    #[test]
    fn parkwatch_error_variants_render() {
        let cases = [
            ParkwatchError::Config("bad".into()).to_string(),
            ParkwatchError::detection("refused").to_string(),
            ParkwatchError::summary("refused").to_string(),
            ParkwatchError::Validation("email".into()).to_string(),
            ParkwatchError::Conflict("taken".into()).to_string(),
            ParkwatchError::NotFound("slot".into()).to_string(),
            ParkwatchError::Timeout {
                duration: std::time::Duration::from_secs(3),
            }
            .to_string(),
            ParkwatchError::Internal("oops".into()).to_string(),
        ];
        assert!(cases[0].starts_with("configuration error"));
        assert!(cases[1].starts_with("detection error"));
        assert!(cases[2].starts_with("summary error"));
        assert!(cases[6].contains("3s"));
    }

    #[test]
    fn io_error_converts() {
        let err: ParkwatchError = std::io::Error::other("disk").into();
        assert!(matches!(err, ParkwatchError::Io { .. }));
    }

    struct Broken;

    #[async_trait]
    impl SummaryAdapter for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        async fn summarize(&self, _detections: &[Detection]) -> Result<String, ParkwatchError> {
            Err(ParkwatchError::summary("connection refused"))
        }
    }

    #[tokio::test]
    async fn summarize_or_fallback_degrades() {
        let text = Broken.summarize_or_fallback(&[]).await;
        assert_eq!(text, FALLBACK_SUMMARY);
    }
}
