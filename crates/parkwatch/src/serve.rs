// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parkwatch serve` command implementation.
//!
//! Starts the summary service and runs it until SIGINT or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use parkwatch_config::ParkwatchConfig;
use parkwatch_core::ParkwatchError;
use parkwatch_gateway::{GatewayState, ServerConfig, UnsplashClient, start_server};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Runs the `parkwatch serve` command.
pub async fn run_serve(config: &ParkwatchConfig) -> Result<(), ParkwatchError> {
    info!("starting parkwatch serve");

    let state = gateway_state(config)?;
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    let shutdown = install_signal_handler();
    start_server(&server_config, state, shutdown).await
}

fn gateway_state(config: &ParkwatchConfig) -> Result<GatewayState, ParkwatchError> {
    let state = GatewayState::new(config.history.max_scans)
        .with_max_dialogues(config.gateway.max_dialogues);
    match config.unsplash.access_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => {
            let client = UnsplashClient::new(
                key,
                Duration::from_secs(config.summary.request_timeout_secs),
            )?;
            info!(per_query = config.unsplash.per_query, "image curation enabled");
            Ok(state.with_image_search(Arc::new(client), config.unsplash.per_query))
        }
        None => {
            debug!("no unsplash.access_key configured, curation returns no images");
            Ok(state)
        }
    }
}

/// Installs signal handlers for SIGTERM and SIGINT.
///
/// Returns a [`CancellationToken`] that is cancelled when either signal is received.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => {
                            info!("received SIGINT (Ctrl+C), initiating shutdown");
                        }
                        _ = sigterm.recv() => {
                            info!("received SIGTERM, initiating shutdown");
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to install SIGTERM handler, waiting for Ctrl+C only");
                    let _ = ctrl_c.await;
                    info!("received Ctrl+C, initiating shutdown");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, initiating shutdown");
        }

        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curation_follows_access_key() {
        let config = parkwatch_config::load_and_validate_str("").unwrap();
        let state = gateway_state(&config).unwrap();
        assert!(state.image_search.is_none());
        assert_eq!(state.max_dialogues, 1000);

        let config = parkwatch_config::load_and_validate_str(
            "[unsplash]\naccess_key = \"k\"\nper_query = 2\n",
        )
        .unwrap();
        let state = gateway_state(&config).unwrap();
        assert!(state.image_search.is_some());
        assert_eq!(state.images_per_query, 2);
    }
}
