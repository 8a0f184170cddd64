// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text renderings of aggregator output.

use std::fmt::Write as _;

use parkwatch_core::Detection;

use crate::aggregate::OccupancyStats;
use crate::history::{ScanHistory, ScanSummary};

const RULE: &str = "------------------------------------------------------";

/// Format low-confidence detections as `class (0.42) | ...`, or `None`.
pub fn format_pending<'a, I>(pending: I) -> String
where
    I: IntoIterator<Item = &'a Detection>,
{
    let items: Vec<String> = pending
        .into_iter()
        .map(|d| format!("{} ({:.2})", d.display_class(), d.effective_confidence()))
        .collect();
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(" | ")
    }
}

fn scan_line(summary: &ScanSummary) -> String {
    let s = &summary.stats;
    format!(
        "Scan #{} [{}]\n   Empty: {}, Occupied: {}, Occupancy: {}%, Low Conf: {}, Avg Confidence: {}%",
        summary.number,
        summary.time,
        s.empty_count,
        s.occupied_count,
        s.occupancy_rate,
        s.low_confidence_count,
        s.average_confidence_percent
    )
}

/// The multi-line agent summary report for a session.
pub fn render_agent_report(user: Option<&str>, history: &ScanHistory) -> String {
    let user = user.map(str::trim).filter(|u| !u.is_empty()).unwrap_or("Unknown");
    let scans: Vec<String> = history.per_scan().iter().map(scan_line).collect();

    let mut out = String::new();
    let _ = writeln!(out, "Smart Parking Agent - Summary Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "User: {user}, Scans: {}", history.total_recorded());
    let _ = writeln!(out, "{RULE}");
    if !scans.is_empty() {
        let _ = writeln!(out, "{}", scans.join("\n\n"));
    }
    let _ = write!(out, "Pending Review: {}", format_pending(history.pending_review()));
    out
}

/// The dashboard block for one scan.
pub fn render_dashboard(stats: &OccupancyStats) -> String {
    let mut out = format!(
        "Available Slots: {}\nOccupied Slots: {}\nOccupancy Rate: {}%",
        stats.empty_count, stats.occupied_count, stats.occupancy_rate
    );
    if stats.is_full() {
        out.push_str("\nFull: No slots available!");
    }
    out
}

/// Session overview: scan count, low-confidence count, average confidence.
pub fn render_overview(history: &ScanHistory) -> String {
    let stats = history.stats();
    format!(
        "Scans Today: {}\nLow Confidence: {}\nAvg Confidence: {}%",
        history.total_recorded(),
        stats.low_confidence_count,
        stats.average_confidence_percent
    )
}

/// One `time  count` line per scan.
pub fn render_timeline(history: &ScanHistory) -> String {
    history
        .timeline()
        .iter()
        .map(|p| format!("{}  {} detections", p.time, p.detections))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkwatch_core::ScanRecord;

    fn scan(time: &str, classes: &[(&str, Option<f64>)]) -> ScanRecord {
        ScanRecord {
            time: time.to_string(),
            captured_at: Default::default(),
            predictions: classes
                .iter()
                .map(|(c, conf)| Detection::classified(*c, *conf))
                .collect(),
        }
    }

    #[test]
    fn pending_none_when_empty() {
        assert_eq!(format_pending(&Vec::<Detection>::new()), "None");
    }

    #[test]
    fn pending_lists_class_and_confidence() {
        let mut unlabeled = Detection::classified("", Some(0.1));
        unlabeled.class = None;
        let items = [Detection::classified("occupied", Some(0.3)), unlabeled];
        assert_eq!(format_pending(&items), "occupied (0.30) | N/A (0.10)");
    }

    #[test]
    fn agent_report_layout() {
        let mut history = ScanHistory::default();
        history.record(scan("09:00:00", &[("empty", None), ("occupied", Some(0.3))]));
        history.record(scan("09:05:00", &[("occupied", Some(0.9))]));

        insta::assert_snapshot!(render_agent_report(Some("Dana"), &history), @r"
Smart Parking Agent - Summary Report

User: Dana, Scans: 2
------------------------------------------------------
Scan #1 [09:00:00]
   Empty: 1, Occupied: 1, Occupancy: 50%, Low Conf: 1, Avg Confidence: 65%

Scan #2 [09:05:00]
   Empty: 0, Occupied: 1, Occupancy: 100%, Low Conf: 0, Avg Confidence: 90%
Pending Review: occupied (0.30)
");
    }

    #[test]
    fn agent_report_without_scans() {
        let report = render_agent_report(None, &ScanHistory::default());
        assert!(report.contains("User: Unknown, Scans: 0"));
        assert!(report.ends_with(&format!("{RULE}\nPending Review: None")));
    }

    #[test]
    fn dashboard_flags_full_lot() {
        let full = OccupancyStats::from_detections(&[Detection::classified("occupied", None)]);
        assert!(render_dashboard(&full).ends_with("Full: No slots available!"));

        let open = OccupancyStats::from_detections(&[Detection::classified("empty", None)]);
        assert_eq!(
            render_dashboard(&open),
            "Available Slots: 1\nOccupied Slots: 0\nOccupancy Rate: 0%"
        );
    }

    #[test]
    fn overview_and_timeline() {
        let mut history = ScanHistory::default();
        history.record(scan("10:00:00", &[("empty", Some(0.2)), ("car", None)]));
        assert_eq!(
            render_overview(&history),
            "Scans Today: 1\nLow Confidence: 1\nAvg Confidence: 60%"
        );
        assert_eq!(render_timeline(&history), "10:00:00  2 detections");
    }
}
