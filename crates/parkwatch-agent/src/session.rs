// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One monitoring session.
//!
//! A [`ParkingSession`] owns the scan history, the latest detections, and a
//! handle on the shared reservation ledger. Detection and summary calls go
//! through their own [`RequestSequencer`], so when requests overlap only the
//! most recent result is applied.

use std::sync::Arc;

use parkwatch_core::{Detection, DetectionAdapter, ImageUpload, ParkwatchError, ScanRecord, SummaryAdapter};
use parkwatch_detect::RequestSequencer;
use parkwatch_dialogue::Conversation;
use parkwatch_reservation::{Confirmation, FormSlot, ReservationError, ReservationForm, ReservationLedger};
use parkwatch_stats::{OccupancyStats, ScanHistory, report};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// What a scan request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// Detection finished and the scan was recorded.
    Recorded(ScanRecord),
    /// A newer scan started before this one finished; nothing was recorded.
    Superseded,
}

impl ScanOutcome {
    pub fn record(&self) -> Option<&ScanRecord> {
        match self {
            Self::Recorded(record) => Some(record),
            Self::Superseded => None,
        }
    }
}

pub struct ParkingSession {
    detector: Arc<dyn DetectionAdapter>,
    summarizer: Arc<dyn SummaryAdapter>,
    ledger: Arc<ReservationLedger>,
    history: RwLock<ScanHistory>,
    detect_seq: RequestSequencer,
    summary_seq: RequestSequencer,
    user_name: Option<String>,
}

impl ParkingSession {
    pub fn new(
        detector: Arc<dyn DetectionAdapter>,
        summarizer: Arc<dyn SummaryAdapter>,
        max_scans: usize,
    ) -> Self {
        Self {
            detector,
            summarizer,
            ledger: Arc::new(ReservationLedger::new()),
            history: RwLock::new(ScanHistory::new(max_scans)),
            detect_seq: RequestSequencer::new(),
            summary_seq: RequestSequencer::new(),
            user_name: None,
        }
    }

    /// Share an existing ledger instead of a private one.
    pub fn with_ledger(mut self, ledger: Arc<ReservationLedger>) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn with_user(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.user_name = (!name.trim().is_empty()).then_some(name);
        self
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn ledger(&self) -> &Arc<ReservationLedger> {
        &self.ledger
    }

    /// Run detection on an image and record the scan.
    pub async fn scan(&self, image: &ImageUpload) -> Result<ScanOutcome, ParkwatchError> {
        debug!(adapter = self.detector.name(), file = %image.file_name, "scan requested");
        let Some(result) = self.detect_seq.run(self.detector.detect(image)).await else {
            info!(file = %image.file_name, "scan superseded by a newer request");
            return Ok(ScanOutcome::Superseded);
        };
        let predictions = result.inspect_err(|e| warn!(error = %e, "detection failed"))?;
        Ok(ScanOutcome::Recorded(self.record(predictions).await))
    }

    /// Record detections obtained elsewhere as a new scan.
    pub async fn record(&self, predictions: Vec<Detection>) -> ScanRecord {
        self.record_scan(ScanRecord::capture(predictions)).await
    }

    /// Append an existing record, e.g. one loaded from a file.
    pub async fn record_scan(&self, record: ScanRecord) -> ScanRecord {
        let mut history = self.history.write().await;
        history.record(record.clone());
        info!(
            time = %record.time,
            detections = record.predictions.len(),
            retained = history.len(),
            "scan recorded"
        );
        record
    }

    /// Detections of the most recent scan, empty before the first.
    pub async fn latest_predictions(&self) -> Vec<Detection> {
        self.history
            .read()
            .await
            .latest()
            .map(|r| r.predictions.clone())
            .unwrap_or_default()
    }

    /// Summary of the latest scan. `None` when a newer summary request
    /// overtook this one; transport failures yield the fallback text.
    pub async fn summarize_latest(&self) -> Option<String> {
        let predictions = self.latest_predictions().await;
        self.summary_seq
            .run(self.summarizer.summarize_or_fallback(&predictions))
            .await
    }

    /// Dashboard numbers for the latest scan.
    pub async fn dashboard(&self) -> OccupancyStats {
        OccupancyStats::from_detections(&self.latest_predictions().await)
    }

    /// Numbers over every retained scan.
    pub async fn session_stats(&self) -> OccupancyStats {
        self.history.read().await.stats()
    }

    pub async fn scan_count(&self) -> u64 {
        self.history.read().await.total_recorded()
    }

    pub async fn report(&self) -> String {
        report::render_agent_report(self.user_name(), &*self.history.read().await)
    }

    pub async fn overview(&self) -> String {
        report::render_overview(&*self.history.read().await)
    }

    pub async fn timeline(&self) -> String {
        report::render_timeline(&*self.history.read().await)
    }

    /// Start a guided dialogue over the latest scan.
    pub async fn start_conversation(&self) -> Conversation {
        Conversation::start(&self.latest_predictions().await, Arc::clone(&self.ledger))
    }

    /// Slots the form can book from the latest scan.
    pub async fn form_slots(&self) -> Vec<FormSlot> {
        parkwatch_reservation::form_slots(&self.latest_predictions().await, &self.ledger)
    }

    /// Book a slot of the latest scan through the form flow.
    pub async fn reserve(
        &self,
        slot_id: &str,
        form: &ReservationForm,
    ) -> Result<Confirmation, ReservationError> {
        let predictions = self.latest_predictions().await;
        parkwatch_reservation::reserve_slot(&self.ledger, &predictions, slot_id, form)
    }
}

impl std::fmt::Debug for ParkingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParkingSession")
            .field("detector", &self.detector.name())
            .field("summarizer", &self.summarizer.name())
            .field("user_name", &self.user_name)
            .field("reservations", &self.ledger.len())
            .finish()
    }
}
