// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for parkwatch.
//!
//! TOML files in the usual hierarchy plus `PARKWATCH_*` environment
//! overrides, strict key checking, semantic validation, and miette
//! diagnostics with typo suggestions.
//!
//! ```no_run
//! let config = parkwatch_config::load_and_validate().expect("config errors");
//! println!("summary service: {}", config.summary.base_url);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::ParkwatchConfig;

/// Load from the file hierarchy and env, then validate.
pub fn load_and_validate() -> Result<ParkwatchConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load from one explicit file (plus env), then validate.
pub fn load_and_validate_path(path: &Path) -> Result<ParkwatchConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

/// Load from an inline TOML string, then validate.
pub fn load_and_validate_str(toml_content: &str) -> Result<ParkwatchConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn finish(
    loaded: Result<ParkwatchConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<ParkwatchConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!("configuration loaded and validated");
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Read whichever config files exist so diagnostics can point into them.
fn collect_toml_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(loader::LOCAL_CONFIG_PATH))
        .unwrap_or_else(|_| loader::LOCAL_CONFIG_PATH.into());

    [
        Some(local),
        loader::user_config_path(),
        Some(loader::SYSTEM_CONFIG_PATH.into()),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| {
        std::fs::read_to_string(&path)
            .ok()
            .map(|content| (path.display().to_string(), content))
    })
    .collect()
}
