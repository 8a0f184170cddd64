// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned lots and scans.

use chrono::{TimeZone, Utc};
use parkwatch_core::{Detection, ImageUpload, ScanRecord};

/// One empty slot, one low-confidence occupied, one confident occupied.
/// Aggregates to occupancy 67% and average confidence 73%.
pub fn sample_detections() -> Vec<Detection> {
    vec![
        Detection::classified("empty", None),
        Detection::classified("occupied", Some(0.3)),
        Detection::classified("occupied", Some(0.9)),
    ]
}

/// Two empty slots with detection ids and spot names, two occupied.
pub fn lot_with_ids() -> Vec<Detection> {
    let slot = |id: &str, spot: &str, class: &str, confidence: f64| Detection {
        detection_id: Some(id.to_string()),
        spot: Some(spot.to_string()),
        class: Some(class.to_string()),
        confidence: Some(confidence),
        ..Detection::default()
    };
    vec![
        slot("det-a1", "A1", "empty", 0.92),
        slot("det-a2", "A2", "occupied", 0.88),
        slot("det-b1", "B1", "empty", 0.41),
        slot("det-b2", "B2", "occupied", 0.97),
    ]
}

/// A lot where every slot is taken.
pub fn full_lot() -> Vec<Detection> {
    vec![
        Detection::classified("occupied", Some(0.95)),
        Detection::classified("occupied", Some(0.85)),
    ]
}

pub fn scan_record(time: &str, predictions: Vec<Detection>) -> ScanRecord {
    ScanRecord {
        time: time.to_string(),
        captured_at: Utc
            .with_ymd_and_hms(2026, 4, 1, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now),
        predictions,
    }
}

pub fn sample_image() -> ImageUpload {
    ImageUpload::new("lot.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0])
}

/// The detection endpoint's response shape for [`lot_with_ids`].
pub fn detection_response_json() -> serde_json::Value {
    serde_json::json!({
        "time": 0.08,
        "image": {"width": 1280, "height": 720},
        "predictions": serde_json::to_value(lot_with_ids()).unwrap_or_default()
    })
}
