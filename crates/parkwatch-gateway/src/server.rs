// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Summary service HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use dashmap::DashMap;
use parkwatch_core::ParkwatchError;
use parkwatch_dialogue::Conversation;
use parkwatch_reservation::ReservationLedger;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::curation::ImageSearch;
use crate::scan_log::ScanLog;
use crate::{dialogues, handlers, reservations};

/// Conversations kept when no cap is configured.
pub const DEFAULT_MAX_DIALOGUES: usize = 1000;

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Scans reported through `POST /log_scan`.
    pub scan_log: Arc<RwLock<ScanLog>>,
    /// Conversations by id, at most `max_dialogues` of them.
    pub dialogues: Arc<DashMap<String, Conversation>>,
    pub max_dialogues: usize,
    /// Reserved slots, shared by the form and dialogue endpoints.
    pub ledger: Arc<ReservationLedger>,
    /// Reference image lookup for curation. `None` disables lookups.
    pub image_search: Option<Arc<dyn ImageSearch>>,
    pub images_per_query: u32,
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(max_scans: usize) -> Self {
        Self {
            scan_log: Arc::new(RwLock::new(ScanLog::new(max_scans))),
            dialogues: Arc::new(DashMap::new()),
            max_dialogues: DEFAULT_MAX_DIALOGUES,
            ledger: Arc::new(ReservationLedger::new()),
            image_search: None,
            images_per_query: 3,
            health: HealthState {
                start_time: std::time::Instant::now(),
            },
        }
    }

    pub fn with_max_dialogues(mut self, max_dialogues: usize) -> Self {
        self.max_dialogues = max_dialogues.max(1);
        self
    }

    /// Store a new conversation, making room first: finished conversations
    /// go before open ones, and the oldest open one goes last.
    pub fn insert_dialogue(&self, conversation: Conversation) {
        if self.dialogues.len() >= self.max_dialogues {
            self.dialogues.retain(|_, c| !c.is_complete());
        }
        while self.dialogues.len() >= self.max_dialogues {
            let oldest = self
                .dialogues
                .iter()
                .min_by_key(|entry| entry.value().started_at())
                .map(|entry| entry.key().clone());
            match oldest {
                Some(id) => {
                    tracing::debug!(conversation = %id, "evicting oldest conversation");
                    self.dialogues.remove(&id);
                }
                None => break,
            }
        }
        self.dialogues
            .insert(conversation.id().to_string(), conversation);
    }

    pub fn with_image_search(mut self, search: Arc<dyn ImageSearch>, per_query: u32) -> Self {
        self.image_search = Some(search);
        self.images_per_query = per_query;
        self
    }
}

/// Server bind settings (mirrors `GatewayConfig` from parkwatch-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Build the application router.
///
/// - POST /summarize_parking, /curation_feedback, /log_scan
/// - GET /agent_dashboard_stats, /health
/// - POST /v1/dialogues, /v1/dialogues/{id}/messages; GET /v1/dialogues/{id}
/// - POST, GET /v1/reservations
pub fn build_router(state: GatewayState) -> Router {
    let agent_routes = Router::new()
        .route("/summarize_parking", post(handlers::summarize_parking))
        .route("/curation_feedback", post(handlers::curation_feedback))
        .route("/log_scan", post(handlers::log_scan))
        .route("/agent_dashboard_stats", get(handlers::agent_dashboard_stats))
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/v1/dialogues", post(dialogues::start_dialogue))
        .route("/v1/dialogues/{id}", get(dialogues::get_dialogue))
        .route("/v1/dialogues/{id}/messages", post(dialogues::post_message))
        .route(
            "/v1/reservations",
            post(reservations::create_reservation).get(reservations::list_reservations),
        )
        .route("/v1/reservation_slots", get(reservations::list_slots))
        .with_state(state);

    Router::new()
        .merge(agent_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), ParkwatchError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ParkwatchError::Gateway {
            message: format!("failed to bind summary service to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("summary service listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| ParkwatchError::Gateway {
            message: format!("summary service error: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("summary service stopped");
    Ok(())
}
