// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock detection adapter for deterministic testing.
//!
//! `MockDetector` implements `DetectionAdapter` with pre-configured results,
//! so session and service tests run without the hosted model.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use parkwatch_core::{Detection, DetectionAdapter, ImageUpload, ParkwatchError};

use crate::fixtures;

type Scripted = Result<Vec<Detection>, String>;

/// Results are popped from a FIFO queue. When the queue is empty the
/// reference lot from [`fixtures::sample_detections`] is returned.
pub struct MockDetector {
    responses: Arc<Mutex<VecDeque<(Duration, Scripted)>>>,
    calls: AtomicUsize,
}

impl MockDetector {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Pre-load successful results, answered in order.
    pub fn with_results(results: Vec<Vec<Detection>>) -> Self {
        let queue = results.into_iter().map(|r| (Duration::ZERO, Ok(r))).collect();
        Self {
            responses: Arc::new(Mutex::new(queue)),
            calls: AtomicUsize::new(0),
        }
    }

    pub async fn push(&self, detections: Vec<Detection>) {
        self.responses
            .lock()
            .await
            .push_back((Duration::ZERO, Ok(detections)));
    }

    /// Queue a result that is delivered after `delay`.
    pub async fn push_delayed(&self, delay: Duration, detections: Vec<Detection>) {
        self.responses.lock().await.push_back((delay, Ok(detections)));
    }

    /// Queue a failure.
    pub async fn push_error(&self, message: impl Into<String>) {
        self.responses
            .lock()
            .await
            .push_back((Duration::ZERO, Err(message.into())));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DetectionAdapter for MockDetector {
    fn name(&self) -> &str {
        "mock-detector"
    }

    async fn detect(&self, image: &ImageUpload) -> Result<Vec<Detection>, ParkwatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().await.pop_front();
        tracing::debug!(file = %image.file_name, scripted = next.is_some(), "mock detection");
        match next {
            Some((delay, result)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result.map_err(ParkwatchError::detection)
            }
            None => Ok(fixtures::sample_detections()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pops_in_order_then_defaults() {
        let mock = MockDetector::with_results(vec![vec![], fixtures::lot_with_ids()]);
        let image = fixtures::sample_image();
        assert!(mock.detect(&image).await.unwrap().is_empty());
        assert_eq!(mock.detect(&image).await.unwrap().len(), 4);
        assert_eq!(mock.detect(&image).await.unwrap().len(), 3);
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn scripted_error_is_detection_error() {
        let mock = MockDetector::new();
        mock.push_error("model offline").await;
        let err = mock.detect(&fixtures::sample_image()).await.unwrap_err();
        assert!(matches!(err, ParkwatchError::Detection { .. }));
    }
}
