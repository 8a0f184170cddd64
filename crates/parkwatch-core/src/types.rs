// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the aggregator, dialogue, reservation flows and
//! the HTTP clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// Detections below this confidence are flagged for manual review.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Confidence assumed when the detection endpoint omits the field.
pub const DEFAULT_CONFIDENCE: f64 = 1.0;

/// Classification of a detected region, case-folded from the wire label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SlotClass {
    Empty,
    Occupied,
    Unrecognized,
}

impl SlotClass {
    /// Classify a raw label. Anything other than "empty"/"occupied" (in any
    /// case) is `Unrecognized`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("empty") {
            SlotClass::Empty
        } else if label.eq_ignore_ascii_case("occupied") {
            SlotClass::Occupied
        } else {
            SlotClass::Unrecognized
        }
    }
}

/// One classified region returned by the detection endpoint.
///
/// Only `class` and `confidence` feed the aggregator; geometry is carried for
/// overlay consumers. Unknown wire fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub detection_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Alternative label some producers use instead of `class`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,

    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub spot: Option<String>,

    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Detection {
    /// Build a detection with just a class and optional confidence.
    pub fn classified(class: impl Into<String>, confidence: Option<f64>) -> Self {
        Self {
            class: Some(class.into()),
            confidence,
            ..Self::default()
        }
    }

    /// Case-folded classification of the `class` field.
    pub fn slot_class(&self) -> SlotClass {
        self.class
            .as_deref()
            .map(SlotClass::from_label)
            .unwrap_or(SlotClass::Unrecognized)
    }

    /// Whether the region can be offered for booking: class "empty", or an
    /// alternative `label` of "empty".
    pub fn is_available(&self) -> bool {
        self.slot_class() == SlotClass::Empty
            || self
                .label
                .as_deref()
                .is_some_and(|l| SlotClass::from_label(l) == SlotClass::Empty)
    }

    /// Confidence with the absent default applied, clamped into `[0, 1]`.
    /// Non-finite values are treated as absent.
    pub fn effective_confidence(&self) -> f64 {
        match self.confidence {
            Some(c) if c.is_finite() => c.clamp(0.0, 1.0),
            _ => DEFAULT_CONFIDENCE,
        }
    }

    pub fn is_low_confidence(&self) -> bool {
        self.effective_confidence() < LOW_CONFIDENCE_THRESHOLD
    }

    /// Class label for display, `N/A` when absent.
    pub fn display_class(&self) -> &str {
        match self.class.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => "N/A",
        }
    }

    /// User-facing slot name: explicit `spot`, `id` or `name` field, else
    /// `Spot N` for the given 1-based position.
    pub fn friendly_name(&self, position: usize) -> String {
        [&self.spot, &self.id, &self.name]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Spot {position}"))
    }

    /// Identifier used by the reservation ledger: `detection_id` when the
    /// endpoint supplied one, else the friendly name.
    pub fn slot_key(&self, position: usize) -> String {
        match self.detection_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => self.friendly_name(position),
        }
    }

    /// Bookable slots in detection order. Every booking flow offers exactly
    /// this list, so a detection maps to the same ledger key everywhere.
    /// Positions count among available detections only.
    pub fn available_slots(detections: &[Detection]) -> Vec<AvailableSlot> {
        detections
            .iter()
            .filter(|d| d.is_available())
            .enumerate()
            .map(|(i, d)| AvailableSlot {
                key: d.slot_key(i + 1),
                label: d.friendly_name(i + 1),
            })
            .collect()
    }
}

/// A detection that can be booked, as keyed in the reservation ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailableSlot {
    /// Reservation ledger key.
    pub key: String,
    /// Friendly name shown to the user.
    pub label: String,
}

/// Accept either a JSON string or number for identifier-like fields.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}

/// One completed detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Local wall-clock capture time, `HH:MM:SS`.
    pub time: String,

    /// UTC capture instant.
    #[serde(default = "Utc::now")]
    pub captured_at: DateTime<Utc>,

    #[serde(default)]
    pub predictions: Vec<Detection>,
}

impl ScanRecord {
    /// Record a scan captured now.
    pub fn capture(predictions: Vec<Detection>) -> Self {
        let now = chrono::Local::now();
        Self {
            time: now.format("%H:%M:%S").to_string(),
            captured_at: now.with_timezone(&Utc),
            predictions,
        }
    }
}

/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Bot,
    User,
}

/// One line of a guided conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl TranscriptEntry {
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }
}

/// An image ready for upload to the detection endpoint.
#[derive(Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Wrap raw bytes, guessing the MIME type from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for(&file_name).to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
