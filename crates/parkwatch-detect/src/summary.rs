// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the summary service (`/summarize_parking`, `/log_scan`).

use std::time::Duration;

use async_trait::async_trait;
use parkwatch_config::model::SummaryConfig;
use parkwatch_core::{Detection, ParkwatchError, SummaryAdapter};
use tracing::{debug, warn};

use crate::types::{ScanLogRequest, SummaryRequest, SummaryResponse};

#[derive(Debug, Clone)]
pub struct SummaryClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl SummaryClient {
    pub fn new(config: &SummaryConfig) -> Result<Self, ParkwatchError> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ParkwatchError::Summary {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Report a finished scan to the service's scan log.
    pub async fn log_scan(
        &self,
        user: Option<&str>,
        filename: Option<&str>,
        predictions: &[Detection],
    ) -> Result<(), ParkwatchError> {
        let body = ScanLogRequest {
            user: user.map(str::to_string),
            filename: filename.map(str::to_string),
            predictions: predictions.to_vec(),
        };
        let response = self
            .client
            .post(format!("{}/log_scan", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.request_failed(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ParkwatchError::summary(format!("log_scan returned {status}")));
        }
        debug!(detections = predictions.len(), "scan logged");
        Ok(())
    }

    /// [`log_scan`](Self::log_scan), with failures logged and dropped.
    pub async fn log_scan_or_warn(
        &self,
        user: Option<&str>,
        filename: Option<&str>,
        predictions: &[Detection],
    ) {
        if let Err(e) = self.log_scan(user, filename, predictions).await {
            warn!(error = %e, "failed to log scan");
        }
    }

    fn request_failed(&self, e: reqwest::Error) -> ParkwatchError {
        if e.is_timeout() {
            return ParkwatchError::Timeout {
                duration: self.timeout,
            };
        }
        ParkwatchError::Summary {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        }
    }
}

#[async_trait]
impl SummaryAdapter for SummaryClient {
    fn name(&self) -> &str {
        "summary-service"
    }

    async fn summarize(&self, detections: &[Detection]) -> Result<String, ParkwatchError> {
        let body = SummaryRequest {
            detected_spots: detections.to_vec(),
        };
        let response = self
            .client
            .post(format!("{}/summarize_parking", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.request_failed(e))?;

        let status = response.status();
        debug!(status = %status, "summary response received");
        if !status.is_success() {
            return Err(ParkwatchError::summary(format!(
                "summary service returned {status}"
            )));
        }

        let parsed: SummaryResponse = response.json().await.map_err(|e| ParkwatchError::Summary {
            message: format!("failed to parse summary response: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(parsed.summary)
    }
}
