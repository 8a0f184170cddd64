// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session scan history with a retention cap.

use std::collections::VecDeque;

use parkwatch_core::{Detection, ScanRecord};
use serde::Serialize;

use crate::aggregate::OccupancyStats;

/// Default number of scans retained.
pub const DEFAULT_MAX_SCANS: usize = 500;

/// One point of the analytics timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub time: String,
    pub detections: usize,
}

/// Statistics for a single retained scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// 1-based scan number since the session started, evictions included.
    pub number: u64,
    pub time: String,
    pub stats: OccupancyStats,
}

/// Ordered scan records, oldest first. Capped: once `max_scans` records are
/// held, recording another evicts the oldest.
#[derive(Debug, Clone)]
pub struct ScanHistory {
    records: VecDeque<ScanRecord>,
    max_scans: usize,
    total_recorded: u64,
}

impl Default for ScanHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SCANS)
    }
}

impl ScanHistory {
    /// A cap of zero is raised to one.
    pub fn new(max_scans: usize) -> Self {
        let max_scans = max_scans.max(1);
        Self {
            records: VecDeque::with_capacity(max_scans.min(64)),
            max_scans,
            total_recorded: 0,
        }
    }

    /// Append a record, returning the evicted one if the cap was hit.
    pub fn record(&mut self, record: ScanRecord) -> Option<ScanRecord> {
        let evicted = if self.records.len() >= self.max_scans {
            self.records.pop_front()
        } else {
            None
        };
        if evicted.is_some() {
            tracing::debug!(max_scans = self.max_scans, "scan history full, evicted oldest record");
        }
        self.records.push_back(record);
        self.total_recorded += 1;
        evicted
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_scans(&self) -> usize {
        self.max_scans
    }

    /// Scans recorded since creation, including evicted ones.
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    pub fn records(&self) -> impl ExactSizeIterator<Item = &ScanRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&ScanRecord> {
        self.records.back()
    }

    /// Session-wide statistics over the retained records.
    pub fn stats(&self) -> OccupancyStats {
        OccupancyStats::from_records(&self.records)
    }

    pub fn timeline(&self) -> Vec<TimelinePoint> {
        self.records
            .iter()
            .map(|r| TimelinePoint {
                time: r.time.clone(),
                detections: r.predictions.len(),
            })
            .collect()
    }

    pub fn per_scan(&self) -> Vec<ScanSummary> {
        let first = self.total_recorded - self.records.len() as u64 + 1;
        self.records
            .iter()
            .zip(first..)
            .map(|(r, number)| ScanSummary {
                number,
                time: r.time.clone(),
                stats: OccupancyStats::from_detections(&r.predictions),
            })
            .collect()
    }

    /// Every low-confidence detection across retained scans, in scan order.
    pub fn pending_review(&self) -> Vec<&Detection> {
        self.records
            .iter()
            .flat_map(|r| r.predictions.iter())
            .filter(|d| d.is_low_confidence())
            .collect()
    }
}
