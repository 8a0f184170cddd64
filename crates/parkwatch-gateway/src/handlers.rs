// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the summary service.
//!
//! Handles POST /summarize_parking, /curation_feedback, /log_scan and
//! GET /agent_dashboard_stats, /health.

use axum::{Json, extract::State};
use parkwatch_core::ScanRecord;
use parkwatch_detect::{ScanLogRequest, SummaryRequest};
use parkwatch_stats::{OccupancyStats, occupancy_summary};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::curation::{CuratedImages, curate};
use crate::scan_log::{DashboardStats, LoggedScan};
use crate::server::GatewayState;

/// Response body for POST /summarize_parking.
#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub curated_images: Vec<CuratedImages>,
}

/// One reviewer decision on a curated image.
#[derive(Debug, Deserialize)]
pub struct FeedbackItem {
    pub image_url: String,
    pub decision: String,
}

/// Request body for POST /curation_feedback.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub feedback: Vec<FeedbackItem>,
}

/// Acknowledgement body shared by the write endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the service started.
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// POST /summarize_parking
///
/// Summarizes the reported spots and attaches reference images for the
/// low-confidence ones.
pub async fn summarize_parking(
    State(state): State<GatewayState>,
    Json(body): Json<SummaryRequest>,
) -> Json<SummarizeResponse> {
    let stats = OccupancyStats::from_detections(&body.detected_spots);
    let summary = occupancy_summary(&stats);
    let curated_images = curate(
        &body.detected_spots,
        state.image_search.as_deref(),
        state.images_per_query,
    )
    .await;
    debug!(
        spots = body.detected_spots.len(),
        curated = curated_images.len(),
        "summary produced"
    );
    Json(SummarizeResponse {
        summary,
        curated_images,
    })
}

/// POST /curation_feedback
pub async fn curation_feedback(Json(body): Json<FeedbackRequest>) -> Json<StatusResponse> {
    for item in &body.feedback {
        info!(image_url = %item.image_url, decision = %item.decision, "curation feedback");
    }
    Json(StatusResponse {
        status: "Feedback received".to_string(),
    })
}

/// POST /log_scan
pub async fn log_scan(
    State(state): State<GatewayState>,
    Json(body): Json<ScanLogRequest>,
) -> Json<StatusResponse> {
    let entry = LoggedScan {
        user: body.user.unwrap_or_else(|| "Guest".to_string()),
        filename: body.filename.unwrap_or_default(),
        record: ScanRecord::capture(body.predictions),
    };
    info!(
        user = %entry.user,
        filename = %entry.filename,
        detections = entry.record.predictions.len(),
        "scan logged"
    );
    state.scan_log.write().await.push(entry);
    Json(StatusResponse {
        status: "logged".to_string(),
    })
}

/// GET /agent_dashboard_stats
///
/// Statistics over scans logged on the current UTC date.
pub async fn agent_dashboard_stats(State(state): State<GatewayState>) -> Json<DashboardStats> {
    let today = chrono::Utc::now().date_naive();
    Json(state.scan_log.read().await.stats_for(today))
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}
