// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Form reservations over HTTP.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use parkwatch_reservation::{
    FormErrors, FormSlot, Reservation, ReservationError, ReservationForm, form_slots, reserve_slot,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::handlers::ErrorResponse;
use crate::server::GatewayState;

/// Request body for POST /v1/reservations.
#[derive(Debug, Deserialize)]
pub struct ReservationRequest {
    pub slot_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
}

/// Response body for a committed reservation.
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub confirmation: String,
    pub reservation: Reservation,
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub errors: FormErrors,
}

/// POST /v1/reservations
///
/// Books a slot among the empty slots of the latest logged scan.
pub async fn create_reservation(
    State(state): State<GatewayState>,
    Json(body): Json<ReservationRequest>,
) -> Response {
    let predictions = state.scan_log.read().await.latest_predictions();
    let form = ReservationForm {
        name: body.name,
        email: body.email,
        start: body.start,
        end: body.end,
    };

    match reserve_slot(&state.ledger, &predictions, &body.slot_id, &form) {
        Ok(confirmation) => {
            info!(slot = %body.slot_id, "form reservation committed");
            (
                StatusCode::CREATED,
                Json(ReservationResponse {
                    confirmation: confirmation.message,
                    reservation: confirmation.reservation,
                }),
            )
                .into_response()
        }
        Err(ReservationError::Invalid(errors)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationResponse { errors }),
        )
            .into_response(),
        Err(err @ ReservationError::SlotAlreadyReserved { .. }) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
        Err(err @ ReservationError::UnknownSlot { .. }) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /v1/reservations
pub async fn list_reservations(State(state): State<GatewayState>) -> Json<Vec<Reservation>> {
    Json(state.ledger.list())
}

/// GET /v1/reservation_slots
///
/// Empty slots of the latest logged scan, with their reservation status.
pub async fn list_slots(State(state): State<GatewayState>) -> Json<Vec<FormSlot>> {
    let predictions = state.scan_log.read().await.latest_predictions();
    Json(form_slots(&predictions, &state.ledger))
}
