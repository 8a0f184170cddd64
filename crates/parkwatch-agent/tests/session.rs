// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end session behaviour against mock adapters.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use parkwatch_agent::{ParkingSession, ScanOutcome};
use parkwatch_core::FALLBACK_SUMMARY;
use parkwatch_reservation::{ReservationError, ReservationForm};
use parkwatch_test_utils::{MockDetector, MockSummarizer, fixtures};

fn session(detector: MockDetector, summarizer: MockSummarizer) -> ParkingSession {
    ParkingSession::new(Arc::new(detector), Arc::new(summarizer), 10)
}

fn form() -> ReservationForm {
    let day = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
    ReservationForm {
        name: "Ana".into(),
        email: "ana@x.io".into(),
        start: day.and_hms_opt(9, 0, 0),
        end: day.and_hms_opt(10, 0, 0),
    }
}

#[tokio::test]
async fn scan_records_and_updates_dashboard() {
    let session = session(MockDetector::new(), MockSummarizer::new());
    let outcome = session.scan(&fixtures::sample_image()).await.unwrap();
    assert!(matches!(outcome, ScanOutcome::Recorded(_)));

    let dashboard = session.dashboard().await;
    assert_eq!(dashboard.occupancy_rate, 67);
    assert_eq!(dashboard.average_confidence_percent, 73);
    assert_eq!(session.scan_count().await, 1);
}

#[tokio::test]
async fn detection_failure_propagates_and_records_nothing() {
    let detector = MockDetector::new();
    detector.push_error("offline").await;
    let session = session(detector, MockSummarizer::new());
    assert!(session.scan(&fixtures::sample_image()).await.is_err());
    assert_eq!(session.scan_count().await, 0);
}

#[tokio::test]
async fn overlapping_scans_keep_only_the_latest() {
    let detector = MockDetector::new();
    detector
        .push_delayed(Duration::from_millis(200), fixtures::full_lot())
        .await;
    detector.push(fixtures::lot_with_ids()).await;
    let session = Arc::new(session(detector, MockSummarizer::new()));

    let slow = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.scan(&fixtures::sample_image()).await })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;
    let fast = session.scan(&fixtures::sample_image()).await.unwrap();

    assert!(matches!(fast, ScanOutcome::Recorded(_)));
    assert_eq!(slow.await.unwrap().unwrap(), ScanOutcome::Superseded);
    assert_eq!(session.scan_count().await, 1);
    assert_eq!(session.latest_predictions().await.len(), 4);
}

#[tokio::test]
async fn summary_uses_latest_predictions_and_falls_back() {
    let summarizer = MockSummarizer::with_responses(vec!["quiet today".into()]);
    let session = session(MockDetector::new(), summarizer);
    session.record(fixtures::lot_with_ids()).await;
    assert_eq!(session.summarize_latest().await.as_deref(), Some("quiet today"));

    let failing = ParkingSession::new(
        Arc::new(MockDetector::new()),
        Arc::new(MockSummarizer::failing()),
        10,
    );
    assert_eq!(failing.summarize_latest().await.as_deref(), Some(FALLBACK_SUMMARY));
}

#[tokio::test]
async fn report_covers_every_scan() {
    let session = session(MockDetector::new(), MockSummarizer::new()).with_user("Dana");
    session
        .record_scan(fixtures::scan_record("09:00:00", fixtures::sample_detections()))
        .await;
    session
        .record_scan(fixtures::scan_record("09:30:00", fixtures::full_lot()))
        .await;

    let report = session.report().await;
    assert!(report.contains("User: Dana, Scans: 2"));
    assert!(report.contains("Scan #2 [09:30:00]"));
    assert!(report.ends_with("Pending Review: occupied (0.30)"));
    assert_eq!(session.timeline().await, "09:00:00  3 detections\n09:30:00  2 detections");
}

#[tokio::test]
async fn form_and_dialogue_share_one_ledger() {
    let session = session(MockDetector::new(), MockSummarizer::new());
    session.record(fixtures::lot_with_ids()).await;

    session.reserve("det-a1", &form()).await.unwrap();

    let mut conv = session.start_conversation().await;
    for input in ["Ana", "ana@x.io"] {
        conv.submit(input).unwrap();
    }
    let reply = conv.submit("A1").unwrap();
    assert_eq!(
        reply[1].text,
        "That spot has just been reserved. Please pick another one."
    );

    for input in ["B1", "12:00", "30"] {
        conv.submit(input).unwrap();
    }
    assert!(conv.is_complete());

    let err = session.reserve("det-b1", &form()).await.unwrap_err();
    assert!(matches!(err, ReservationError::SlotAlreadyReserved { .. }));
    assert_eq!(session.ledger().len(), 2);
    assert!(session.form_slots().await.iter().all(|s| s.reserved));
}
