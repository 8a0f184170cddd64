// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::ParkwatchConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a loaded configuration, collecting every problem rather than
/// stopping at the first.
pub fn validate_config(config: &ParkwatchConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.agent.log_level.to_ascii_lowercase().as_str()) {
        fail(format!(
            "agent.log_level `{}` must be one of {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    for (key, url) in [
        ("detection.api_url", &config.detection.api_url),
        ("summary.base_url", &config.summary.base_url),
    ] {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            fail(format!("{key} `{url}` must be an http(s) URL"));
        }
    }

    if config.detection.model_id.trim().is_empty() {
        fail("detection.model_id must not be empty".to_string());
    }

    for (key, secs) in [
        ("detection.request_timeout_secs", config.detection.request_timeout_secs),
        ("summary.request_timeout_secs", config.summary.request_timeout_secs),
    ] {
        if secs == 0 {
            fail(format!("{key} must be at least 1"));
        }
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        fail("gateway.host must not be empty".to_string());
    } else if host.parse::<std::net::IpAddr>().is_err()
        && !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        fail(format!("gateway.host `{host}` is not a valid IP address or hostname"));
    }

    if config.gateway.max_dialogues == 0 {
        fail("gateway.max_dialogues must be at least 1".to_string());
    }

    if config.history.max_scans == 0 {
        fail("history.max_scans must be at least 1".to_string());
    }

    if config.unsplash.per_query == 0 || config.unsplash.per_query > 30 {
        fail(format!(
            "unsplash.per_query must be between 1 and 30, got {}",
            config.unsplash.per_query
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &ParkwatchConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&ParkwatchConfig::default()).is_ok());
    }

    #[test]
    fn zero_caps_fail() {
        let mut config = ParkwatchConfig::default();
        config.history.max_scans = 0;
        assert!(messages(&config).iter().any(|m| m.contains("history.max_scans")));
        config.gateway.max_dialogues = 0;
        assert!(messages(&config).iter().any(|m| m.contains("gateway.max_dialogues")));
    }

    #[test]
    fn non_http_summary_url_fails() {
        let mut config = ParkwatchConfig::default();
        config.summary.base_url = "ftp://example.com".to_string();
        assert!(messages(&config).iter().any(|m| m.contains("summary.base_url")));
    }

    #[test]
    fn collects_every_error() {
        let mut config = ParkwatchConfig::default();
        config.agent.log_level = "loud".to_string();
        config.detection.model_id = " ".to_string();
        config.gateway.host = "bad host!".to_string();
        config.detection.request_timeout_secs = 0;
        assert_eq!(messages(&config).len(), 4);
    }

    #[test]
    fn hostname_and_ip_hosts_pass() {
        let mut config = ParkwatchConfig::default();
        config.gateway.host = "0.0.0.0".to_string();
        assert!(validate_config(&config).is_ok());
        config.gateway.host = "parking.local".to_string();
        assert!(validate_config(&config).is_ok());
        config.gateway.host = "::1".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
