// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot commands: `detect`, `report`, and `reserve`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parkwatch_agent::{ParkingSession, ScanOutcome};
use parkwatch_config::ParkwatchConfig;
use parkwatch_core::ParkwatchError;
use parkwatch_detect::{DetectionClient, SummaryClient};
use parkwatch_reservation::{Confirmation, ReservationForm, ReservationLedger, reserve_slot};
use parkwatch_stats::{ScanHistory, render_agent_report, render_dashboard};
use tracing::info;

use crate::input;

/// Flags of `parkwatch detect`.
#[derive(Debug, Default)]
pub struct DetectOptions {
    pub summary: bool,
    pub report: bool,
    pub log: bool,
    pub user: Option<String>,
}

/// Build a session wired to the configured detection and summary services.
pub fn build_session(
    config: &ParkwatchConfig,
    user: Option<String>,
) -> Result<(ParkingSession, Arc<SummaryClient>), ParkwatchError> {
    let detector = Arc::new(DetectionClient::new(&config.detection)?);
    let summarizer = Arc::new(SummaryClient::new(&config.summary)?);
    let mut session = ParkingSession::new(detector, summarizer.clone(), config.history.max_scans);
    if let Some(user) = user.or_else(|| config.agent.user_name.clone()) {
        session = session.with_user(user);
    }
    Ok((session, summarizer))
}

/// Runs `parkwatch detect`.
pub async fn run_detect(
    config: &ParkwatchConfig,
    images: &[PathBuf],
    options: DetectOptions,
) -> Result<(), ParkwatchError> {
    let (session, summary_client) = build_session(config, options.user)?;

    for path in images {
        let image = input::read_image(path)?;
        let outcome = session.scan(&image).await?;
        if let ScanOutcome::Recorded(record) = &outcome {
            info!(image = %path.display(), detections = record.predictions.len(), "scan recorded");
            if options.log {
                summary_client
                    .log_scan_or_warn(
                        session.user_name(),
                        Some(image.file_name.as_str()),
                        &record.predictions,
                    )
                    .await;
            }
        }
        println!("== {} ==", path.display());
        println!("{}", render_dashboard(&session.dashboard().await));
    }

    if options.summary {
        if let Some(summary) = session.summarize_latest().await {
            println!("\n{summary}");
        }
    }
    if options.report {
        println!("\n{}", session.report().await);
    }
    Ok(())
}

/// Render the agent report for recorded scans.
pub fn report_for(
    scans: Vec<parkwatch_core::ScanRecord>,
    user: Option<&str>,
    max_scans: usize,
) -> String {
    let mut history = ScanHistory::new(max_scans);
    for scan in scans {
        history.record(scan);
    }
    render_agent_report(user, &history)
}

/// Runs `parkwatch report`.
pub fn run_report(path: &Path, user: Option<&str>, max_scans: usize) -> Result<(), ParkwatchError> {
    let scans = input::read_scans(path)?;
    println!("{}", report_for(scans, user, max_scans));
    Ok(())
}

/// Runs `parkwatch reserve` against a fresh ledger.
pub fn run_reserve(
    predictions: &Path,
    slot: &str,
    form: &ReservationForm,
) -> Result<(), ParkwatchError> {
    let detections = input::read_predictions(predictions)?;
    let ledger = ReservationLedger::new();
    let Confirmation { message, .. } = reserve_slot(&ledger, &detections, slot, form)?;
    println!("{message}");
    Ok(())
}
