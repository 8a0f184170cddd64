// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared across the parkwatch workspace.

use thiserror::Error;

/// The primary error type used by adapters and core operations.
///
/// Domain crates keep their own narrower errors (reservation, dialogue) and
/// convert into this enum at the edges.
#[derive(Debug, Error)]
pub enum ParkwatchError {
    /// Configuration errors (invalid TOML, missing endpoint, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Object-detection endpoint failures (transport, status, decoding).
    #[error("detection error: {message}")]
    Detection {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Summary endpoint failures. Callers usually degrade to fallback text.
    #[error("summary error: {message}")]
    Summary {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// HTTP service failures (bind, serve).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// User input failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The request conflicts with current state (slot taken, conversation closed).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A referenced slot, conversation, or file does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Local I/O failure (reading images or JSON inputs).
    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ParkwatchError {
    /// Shorthand for a detection error without an underlying source.
    pub fn detection(message: impl Into<String>) -> Self {
        Self::Detection {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a summary error without an underlying source.
    pub fn summary(message: impl Into<String>) -> Self {
        Self::Summary {
            message: message.into(),
            source: None,
        }
    }
}
