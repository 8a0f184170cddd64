// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock summary adapter.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use parkwatch_core::{Detection, ParkwatchError, SummaryAdapter};

pub const DEFAULT_MOCK_SUMMARY: &str = "mock summary";

/// Answers from a FIFO queue, then [`DEFAULT_MOCK_SUMMARY`]. Every input it
/// was asked to summarize is kept for assertions.
pub struct MockSummarizer {
    responses: Arc<Mutex<VecDeque<Result<String, String>>>>,
    seen: Arc<Mutex<Vec<Vec<Detection>>>>,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::from_queue(VecDeque::new())
    }

    pub fn with_responses(responses: Vec<String>) -> Self {
        Self::from_queue(responses.into_iter().map(Ok).collect())
    }

    /// A summarizer that always fails, for fallback tests.
    pub fn failing() -> Self {
        Self::from_queue((0..64).map(|_| Err("summary service down".to_string())).collect())
    }

    fn from_queue(queue: VecDeque<Result<String, String>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(queue)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Inputs received so far.
    pub async fn seen(&self) -> Vec<Vec<Detection>> {
        self.seen.lock().await.clone()
    }
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SummaryAdapter for MockSummarizer {
    fn name(&self) -> &str {
        "mock-summarizer"
    }

    async fn summarize(&self, detections: &[Detection]) -> Result<String, ParkwatchError> {
        self.seen.lock().await.push(detections.to_vec());
        match self.responses.lock().await.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(ParkwatchError::summary(message)),
            None => Ok(DEFAULT_MOCK_SUMMARY.to_string()),
        }
    }
}
