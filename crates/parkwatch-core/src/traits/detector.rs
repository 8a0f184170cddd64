// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object-detection adapter trait.

use async_trait::async_trait;

use crate::error::ParkwatchError;
use crate::types::{Detection, ImageUpload};

/// Turns an image into classified regions.
///
/// The endpoint is opaque: image bytes in, detections out. Implementations
/// report transport and decoding problems as `ParkwatchError::Detection`.
#[async_trait]
pub trait DetectionAdapter: Send + Sync {
    /// Human-readable adapter name, used in logs.
    fn name(&self) -> &str;

    /// Run detection on one image.
    async fn detect(&self, image: &ImageUpload) -> Result<Vec<Detection>, ParkwatchError>;
}
