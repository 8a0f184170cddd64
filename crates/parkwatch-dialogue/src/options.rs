// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed choice lists and the spot options computed at dialogue start.

use chrono::NaiveTime;
use parkwatch_core::Detection;
use serde::Serialize;

/// Start times offered, every 30 minutes from 08:00 to 18:00.
pub const TIME_OPTIONS: [&str; 21] = [
    "08:00", "08:30", "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30",
    "13:00", "13:30", "14:00", "14:30", "15:00", "15:30", "16:00", "16:30", "17:00", "17:30",
    "18:00",
];

/// Reservation lengths offered, in minutes.
pub const DURATION_OPTIONS: [u32; 6] = [15, 30, 45, 60, 90, 120];

/// A bookable spot as presented in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpotOption {
    /// Friendly name the user types.
    pub label: String,
    /// Reservation ledger key.
    pub slot_key: String,
}

/// Available spots in detection order, as keyed by [`Detection::available_slots`].
pub fn spot_options(detections: &[Detection]) -> Vec<SpotOption> {
    Detection::available_slots(detections)
        .into_iter()
        .map(|slot| SpotOption {
            label: slot.label,
            slot_key: slot.key,
        })
        .collect()
}

/// First option whose label equals the trimmed input.
pub fn find_spot<'a>(options: &'a [SpotOption], input: &str) -> Option<&'a SpotOption> {
    let input = input.trim();
    options.iter().find(|o| o.label == input)
}

/// Accept one of [`TIME_OPTIONS`] exactly.
pub fn parse_start_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    if !TIME_OPTIONS.contains(&input) {
        return None;
    }
    NaiveTime::parse_from_str(input, "%H:%M").ok()
}

/// Accept one of [`DURATION_OPTIONS`], optionally followed by `min`.
pub fn parse_duration(input: &str) -> Option<u32> {
    let input = input.trim();
    let digits = ["minutes", "mins", "min"]
        .iter()
        .find_map(|suffix| input.strip_suffix(suffix))
        .unwrap_or(input)
        .trim();
    digits
        .parse::<u32>()
        .ok()
        .filter(|m| DURATION_OPTIONS.contains(m))
}
