// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading images, detections, and scans from disk.

use std::path::Path;

use chrono::NaiveDateTime;
use parkwatch_core::{Detection, ImageUpload, ParkwatchError, ScanRecord};
use parkwatch_reservation::INSTANT_FORMAT;
use serde::Deserialize;

/// Load an image for upload. The file name is kept for the multipart part.
pub fn read_image(path: &Path) -> Result<ImageUpload, ParkwatchError> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageUpload::new(file_name, bytes))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PredictionsFile {
    Bare(Vec<Detection>),
    Response { predictions: Vec<Detection> },
}

/// Load detections from either a bare JSON array or a saved detection
/// response (`{"predictions": [...]}`).
pub fn read_predictions(path: &Path) -> Result<Vec<Detection>, ParkwatchError> {
    let content = std::fs::read_to_string(path)?;
    let parsed: PredictionsFile = serde_json::from_str(&content)
        .map_err(|e| invalid_json(path, e))?;
    Ok(match parsed {
        PredictionsFile::Bare(predictions) | PredictionsFile::Response { predictions } => {
            predictions
        }
    })
}

/// Load a JSON array of scan records.
pub fn read_scans(path: &Path) -> Result<Vec<ScanRecord>, ParkwatchError> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| invalid_json(path, e))
}

fn invalid_json(path: &Path, e: serde_json::Error) -> ParkwatchError {
    ParkwatchError::Validation(format!("{}: {e}", path.display()))
}

/// clap value parser for `YYYY-MM-DD HH:MM`.
pub fn parse_instant(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s.trim(), INSTANT_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD HH:MM: {e}"))
}
