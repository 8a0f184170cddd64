// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Occupancy statistics for parkwatch.
//!
//! [`OccupancyStats`] is the single aggregator behind every displayed
//! number. [`ScanHistory`] keeps the session's scans under a retention cap,
//! and [`report`] renders both as text.

pub mod aggregate;
pub mod history;
pub mod narrative;
pub mod report;

pub use aggregate::{OccupancyStats, ratio_percent};
pub use history::{DEFAULT_MAX_SCANS, ScanHistory, ScanSummary, TimelinePoint};
pub use narrative::occupancy_summary;
pub use report::{format_pending, render_agent_report, render_dashboard, render_overview, render_timeline};
