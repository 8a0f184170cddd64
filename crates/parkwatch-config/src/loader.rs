// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-based layered loading.
//!
//! Lookup order: `/etc/parkwatch/parkwatch.toml`, then
//! `~/.config/parkwatch/parkwatch.toml`, then `./parkwatch.toml`, then
//! `PARKWATCH_*` environment variables. Later layers win.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ParkwatchConfig;

/// Sections recognised by the env mapper. Order matters only for readability.
const ENV_SECTIONS: &[&str] = &[
    "agent",
    "detection",
    "summary",
    "gateway",
    "history",
    "unsplash",
];

pub const SYSTEM_CONFIG_PATH: &str = "/etc/parkwatch/parkwatch.toml";
pub const LOCAL_CONFIG_PATH: &str = "parkwatch.toml";

/// Path of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("parkwatch").join("parkwatch.toml"))
}

/// Load from the full file hierarchy plus env overrides.
pub fn load_config() -> Result<ParkwatchConfig, figment::Error> {
    build_figment().extract()
}

/// Load defaults plus one inline TOML document (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<ParkwatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ParkwatchConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load defaults plus one explicit file, with env overrides.
pub fn load_config_from_path(path: &Path) -> Result<ParkwatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ParkwatchConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ParkwatchConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// `PARKWATCH_DETECTION_API_KEY` maps to `detection.api_key`, not
/// `detection.api.key`: only the first underscore after a known section
/// name becomes a dot.
fn env_provider() -> Env {
    Env::prefixed("PARKWATCH_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_on_section_only() {
        assert_eq!(map_env_key("detection_api_key"), "detection.api_key");
        assert_eq!(map_env_key("summary_base_url"), "summary.base_url");
        assert_eq!(map_env_key("history_max_scans"), "history.max_scans");
        assert_eq!(map_env_key("unknown_thing"), "unknown_thing");
    }

    #[test]
    fn user_config_path_ends_with_file_name() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("parkwatch/parkwatch.toml"));
        }
    }
}
