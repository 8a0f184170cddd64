// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the detection endpoint and the summary service.

use parkwatch_core::Detection;
use serde::{Deserialize, Serialize};

/// Detection endpoint response. Only `predictions` is consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectionResponse {
    #[serde(default)]
    pub predictions: Vec<Detection>,
}

/// Body of `POST /summarize_parking`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    #[serde(rename = "detectedSpots", default)]
    pub detected_spots: Vec<Detection>,
}

/// Response of `POST /summarize_parking`. The service may attach more
/// fields (curated images); the client only needs the text.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Body of `POST /log_scan`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanLogRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default)]
    pub predictions: Vec<Detection>,
}
