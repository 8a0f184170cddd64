// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The service's in-memory scan log.

use std::collections::VecDeque;

use chrono::NaiveDate;
use parkwatch_core::{Detection, ScanRecord};
use parkwatch_stats::OccupancyStats;
use serde::Serialize;

/// One `POST /log_scan` entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedScan {
    pub user: String,
    pub filename: String,
    pub record: ScanRecord,
}

/// Logged scans, oldest first, capped like the session history.
#[derive(Debug, Clone)]
pub struct ScanLog {
    entries: VecDeque<LoggedScan>,
    max_entries: usize,
}

/// Body of `GET /agent_dashboard_stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub scans_today: usize,
    pub low_conf: usize,
    pub avg_conf: u8,
    pub top_statuses: Vec<String>,
}

impl ScanLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn push(&mut self, entry: LoggedScan) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest_predictions(&self) -> Vec<Detection> {
        self.entries
            .back()
            .map(|e| e.record.predictions.clone())
            .unwrap_or_default()
    }

    /// Statistics over the scans captured on `day` (UTC).
    pub fn stats_for(&self, day: NaiveDate) -> DashboardStats {
        let today: Vec<&LoggedScan> = self
            .entries
            .iter()
            .filter(|e| e.record.captured_at.date_naive() == day)
            .collect();

        let stats = OccupancyStats::from_records(today.iter().map(|e| &e.record));

        let mut statuses: Vec<String> = today
            .iter()
            .flat_map(|e| e.record.predictions.iter())
            .map(|d| d.display_class().to_string())
            .collect();
        statuses.sort();
        statuses.dedup();

        DashboardStats {
            scans_today: today.len(),
            low_conf: stats.low_confidence_count,
            avg_conf: stats.average_confidence_percent,
            top_statuses: statuses,
        }
    }
}
