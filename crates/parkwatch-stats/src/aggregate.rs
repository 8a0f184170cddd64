// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The one occupancy aggregator.
//!
//! Every displayed number (dashboard, per-scan report line, session
//! overview, service statistics) comes from [`OccupancyStats`]. Percentages
//! round half up: `12.5` becomes `13`.

use parkwatch_core::{Detection, ScanRecord, SlotClass};
use serde::Serialize;

/// Summary statistics over a set of detections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OccupancyStats {
    pub empty_count: usize,
    pub occupied_count: usize,
    /// Detections whose class is neither "empty" nor "occupied".
    pub unrecognized_count: usize,
    /// `empty_count + occupied_count`.
    pub total: usize,
    /// Percentage of recognised slots that are occupied, `0..=100`.
    pub occupancy_rate: u8,
    /// Detections with confidence below 0.5.
    pub low_confidence_count: usize,
    /// Mean confidence as a percentage, `0..=100`.
    pub average_confidence_percent: u8,
}

impl OccupancyStats {
    /// Aggregate any sequence of detections. Total over all inputs,
    /// including the empty sequence.
    pub fn from_detections<'a, I>(detections: I) -> Self
    where
        I: IntoIterator<Item = &'a Detection>,
    {
        let mut stats = Self::default();
        let mut seen = 0usize;
        let mut confidence_sum = 0.0f64;

        for d in detections {
            seen += 1;
            confidence_sum += d.effective_confidence();
            if d.is_low_confidence() {
                stats.low_confidence_count += 1;
            }
            match d.slot_class() {
                SlotClass::Empty => stats.empty_count += 1,
                SlotClass::Occupied => stats.occupied_count += 1,
                SlotClass::Unrecognized => stats.unrecognized_count += 1,
            }
        }

        stats.total = stats.empty_count + stats.occupied_count;
        stats.occupancy_rate = ratio_percent(stats.occupied_count, stats.total);
        stats.average_confidence_percent = mean_percent(confidence_sum, seen);
        stats
    }

    /// Aggregate every detection of every record, as one population.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ScanRecord>,
    {
        Self::from_detections(records.into_iter().flat_map(|r| r.predictions.iter()))
    }

    /// Number of detections aggregated, recognised or not.
    pub fn detection_count(&self) -> usize {
        self.total + self.unrecognized_count
    }

    /// True when slots were seen and none is free.
    pub fn is_full(&self) -> bool {
        self.total > 0 && self.empty_count == 0
    }

    /// Unrounded occupancy percentage, for narrative text.
    pub fn occupancy_ratio_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.occupied_count as f64 / self.total as f64
        }
    }
}

/// `round(100 * part / whole)` half up, in exact integer arithmetic.
/// Zero when `whole` is zero.
pub fn ratio_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u128;
    let whole = whole as u128;
    ((200 * part + whole) / (2 * whole)) as u8
}

/// `round(100 * sum / count)` half up. Zero when `count` is zero.
fn mean_percent(sum: f64, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    let percent = 100.0 * sum / count as f64;
    // f64::round is half-away-from-zero, which is half-up for percent >= 0.
    percent.round().clamp(0.0, 100.0) as u8
}
