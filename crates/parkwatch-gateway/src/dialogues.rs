// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Guided reservation dialogues over HTTP.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use parkwatch_core::TranscriptEntry;
use parkwatch_dialogue::{Conversation, DialogueError};
use parkwatch_reservation::Reservation;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::handlers::ErrorResponse;
use crate::server::GatewayState;

/// Response body for dialogue endpoints.
#[derive(Debug, Serialize)]
pub struct DialogueResponse {
    pub id: String,
    /// Stage 0 (name) through 5 (complete).
    pub stage: u8,
    /// Full transcript on start and lookup; only the new entries after a
    /// message.
    pub transcript: Vec<TranscriptEntry>,
    pub complete: bool,
    /// Valid answers for the current stage, empty when free text.
    pub choices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<Reservation>,
}

impl DialogueResponse {
    fn new(conversation: &Conversation, transcript: Vec<TranscriptEntry>) -> Self {
        Self {
            id: conversation.id().to_string(),
            stage: conversation.stage(),
            transcript,
            complete: conversation.is_complete(),
            choices: conversation.choices(),
            reservation: conversation.reservation().cloned(),
        }
    }
}

/// Request body for POST /v1/dialogues/{id}/messages.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

fn not_found(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("conversation {id} not found"),
        }),
    )
        .into_response()
}

/// POST /v1/dialogues
///
/// Starts a conversation over the latest logged predictions.
pub async fn start_dialogue(State(state): State<GatewayState>) -> Response {
    let predictions = state.scan_log.read().await.latest_predictions();
    let conversation = Conversation::start(&predictions, Arc::clone(&state.ledger));
    let response = DialogueResponse::new(&conversation, conversation.transcript().to_vec());
    state.insert_dialogue(conversation);
    (StatusCode::CREATED, Json(response)).into_response()
}

/// GET /v1/dialogues/{id}
pub async fn get_dialogue(State(state): State<GatewayState>, Path(id): Path<String>) -> Response {
    match state.dialogues.get(&id) {
        Some(conversation) => Json(DialogueResponse::new(
            &conversation,
            conversation.transcript().to_vec(),
        ))
        .into_response(),
        None => not_found(&id),
    }
}

/// POST /v1/dialogues/{id}/messages
pub async fn post_message(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<MessageRequest>,
) -> Response {
    let Some(mut conversation) = state.dialogues.get_mut(&id) else {
        return not_found(&id);
    };

    match conversation.submit(&body.text) {
        Ok(entries) => {
            debug!(conversation = %id, stage = conversation.stage(), "dialogue advanced");
            Json(DialogueResponse::new(&conversation, entries)).into_response()
        }
        Err(err @ DialogueError::ConversationClosed { .. }) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
    }
}
