// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router behaviour exercised with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use parkwatch_core::ParkwatchError;
use parkwatch_gateway::{GatewayState, ImageSearch, build_router};
use parkwatch_stats::narrative;
use parkwatch_test_utils::fixtures;
use serde_json::{Value, json};
use tower::ServiceExt;

struct StockPhotos;

#[async_trait]
impl ImageSearch for StockPhotos {
    async fn search(&self, query: &str, count: u32) -> Result<Vec<String>, ParkwatchError> {
        Ok((0..count).map(|i| format!("https://img/{query}/{i}")).collect())
    }
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn app_with_logged_lot() -> Router {
    let app = build_router(GatewayState::new(10));
    let (status, _) = call(
        &app,
        "POST",
        "/log_scan",
        Some(json!({"user": "Dana", "predictions": fixtures::lot_with_ids()})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    app
}

#[tokio::test]
async fn health_reports_ok() {
    let app = build_router(GatewayState::new(10));
    let (status, body) = call(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn summarize_parking_returns_summary_and_curation() {
    let state = GatewayState::new(10).with_image_search(Arc::new(StockPhotos), 2);
    let app = build_router(state);
    let (status, body) = call(
        &app,
        "POST",
        "/summarize_parking",
        Some(json!({"detectedSpots": fixtures::sample_detections()})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], narrative::MODERATE);
    let curated = body["curated_images"].as_array().unwrap();
    assert_eq!(curated.len(), 1);
    assert_eq!(curated[0]["searched_query"], "parking lot occupied");
    assert_eq!(curated[0]["fetched_images"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn summarize_parking_without_spots() {
    let app = build_router(GatewayState::new(10));
    let (status, body) = call(
        &app,
        "POST",
        "/summarize_parking",
        Some(json!({"detectedSpots": []})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["curated_images"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn curation_feedback_is_acknowledged() {
    let app = build_router(GatewayState::new(10));
    let (status, body) = call(
        &app,
        "POST",
        "/curation_feedback",
        Some(json!({"feedback": [{"image_url": "https://img/1", "decision": "approve"}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Feedback received");
}

#[tokio::test]
async fn logged_scans_feed_dashboard_stats() {
    let app = app_with_logged_lot().await;
    let (status, body) = call(&app, "GET", "/agent_dashboard_stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scansToday"], 1);
    assert_eq!(body["lowConf"], 1);
    // (0.92 + 0.88 + 0.41 + 0.97) / 4 = 0.795
    assert_eq!(body["avgConf"], 80);
    assert_eq!(body["topStatuses"], json!(["empty", "occupied"]));
}

#[tokio::test]
async fn dialogue_books_a_spot_over_http() {
    let app = app_with_logged_lot().await;
    let (status, body) = call(&app, "POST", "/v1/dialogues", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["stage"], 0);
    let id = body["id"].as_str().unwrap().to_string();
    let uri = format!("/v1/dialogues/{id}/messages");

    for text in ["Ana", "ana@x.io"] {
        call(&app, "POST", &uri, Some(json!({"text": text}))).await;
    }
    let (_, body) = call(&app, "POST", &uri, Some(json!({"text": "A1"}))).await;
    assert_eq!(body["stage"], 3);
    assert_eq!(body["choices"].as_array().unwrap().len(), 21);

    call(&app, "POST", &uri, Some(json!({"text": "09:30"}))).await;
    let (status, body) = call(&app, "POST", &uri, Some(json!({"text": "60"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["complete"], true);
    assert_eq!(body["reservation"]["slot_id"], "det-a1");

    let (status, _) = call(&app, "POST", &uri, Some(json!({"text": "again"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, listed) = call(&app, "GET", "/v1/reservations", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["source"], "dialogue");
}

#[tokio::test]
async fn unknown_dialogue_is_not_found() {
    let app = build_router(GatewayState::new(10));
    let (status, _) = call(
        &app,
        "POST",
        "/v1/dialogues/missing/messages",
        Some(json!({"text": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "GET", "/v1/dialogues/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reservation_form_statuses() {
    let app = app_with_logged_lot().await;
    let form = json!({
        "slot_id": "det-b1",
        "name": "Ana",
        "email": "ana@x.io",
        "start": "2026-04-01T09:00:00",
        "end": "2026-04-01T10:00:00"
    });

    let (status, body) = call(&app, "POST", "/v1/reservations", Some(form.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(
        body["confirmation"]
            .as_str()
            .unwrap()
            .starts_with("Notification sent to ana@x.io")
    );

    let (status, _) = call(&app, "POST", "/v1/reservations", Some(form)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(
        &app,
        "POST",
        "/v1/reservations",
        Some(json!({"slot_id": "det-a1", "name": "", "email": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["name"].is_string());
    assert!(body["errors"]["email"].is_string());

    let (status, _) = call(
        &app,
        "POST",
        "/v1/reservations",
        Some(json!({
            "slot_id": "det-a2",
            "name": "Ana",
            "email": "ana@x.io",
            "start": "2026-04-01T09:00:00",
            "end": "2026-04-01T10:00:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, slots) = call(&app, "GET", "/v1/reservation_slots", None).await;
    let reserved: Vec<bool> = slots
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["reserved"].as_bool().unwrap())
        .collect();
    assert_eq!(reserved, vec![false, true]);
}
