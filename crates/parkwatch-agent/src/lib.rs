// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The monitoring session that ties detection, summaries, reporting, and
//! reservations together for the CLI and shell.

pub mod session;

pub use session::{ParkingSession, ScanOutcome};
