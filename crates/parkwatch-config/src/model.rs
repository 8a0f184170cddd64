// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! Every struct uses `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level parkwatch configuration. All sections are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParkwatchConfig {
    #[serde(default)]
    pub agent: AgentConfig,

    /// Object-detection endpoint.
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Summary service the CLI talks to.
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Bind address for `parkwatch serve`.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Scan history retention.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Image search used for low-confidence curation.
    #[serde(default)]
    pub unsplash: UnsplashConfig,
}

/// Operator-facing settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Name shown in the agent report header. `None` renders as "Unknown".
    #[serde(default)]
    pub user_name: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            user_name: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Detection endpoint settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionConfig {
    /// Base URL of the serverless inference host.
    #[serde(default = "default_detection_url")]
    pub api_url: String,

    /// Model path appended to `api_url`, e.g. `project/version`.
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// API key sent as the `api_key` query parameter; omitted when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            api_url: default_detection_url(),
            model_id: default_model_id(),
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_detection_url() -> String {
    "https://serverless.roboflow.com".to_string()
}

fn default_model_id() -> String {
    "smart-parking-management-wzern/1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Summary service client settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryConfig {
    /// Base URL of the summary service (`parkwatch serve` or compatible).
    #[serde(default = "default_summary_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            base_url: default_summary_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_summary_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

/// HTTP service bind settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Conversations kept in memory; finished ones are evicted first, then
    /// the oldest.
    #[serde(default = "default_max_dialogues")]
    pub max_dialogues: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_dialogues: default_max_dialogues(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_dialogues() -> usize {
    1000
}

/// Scan history retention.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Maximum scan records kept per session; the oldest is evicted first.
    #[serde(default = "default_max_scans")]
    pub max_scans: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_scans: default_max_scans(),
        }
    }
}

fn default_max_scans() -> usize {
    500
}

/// Unsplash image search settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UnsplashConfig {
    /// Access key. `None` disables image curation lookups.
    #[serde(default)]
    pub access_key: Option<String>,

    /// Images fetched per low-confidence spot.
    #[serde(default = "default_per_query")]
    pub per_query: u32,
}

impl Default for UnsplashConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            per_query: default_per_query(),
        }
    }
}

fn default_per_query() -> u32 {
    3
}
