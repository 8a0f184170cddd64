// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule-based occupancy sentence used by the summary service.

use crate::aggregate::OccupancyStats;

pub const NO_DATA: &str = "No parking data available yet.";
pub const NOT_BUSY: &str = "Today parking is not that busy. Plenty of slots are open!";
pub const MODERATE: &str =
    "Parking is moderately busy. Some slots are still open if you arrive soon.";
pub const FULL: &str = "Parking lot is full. Try again later or choose a different location.";

/// Describe how busy the lot is. Thresholds compare the exact ratio, not
/// the rounded rate.
pub fn occupancy_summary(stats: &OccupancyStats) -> String {
    if stats.total == 0 {
        return NO_DATA.to_string();
    }
    let ratio = stats.occupancy_ratio_percent();
    if ratio < 50.0 {
        NOT_BUSY.to_string()
    } else if ratio < 85.0 {
        MODERATE.to_string()
    } else if stats.empty_count == 0 {
        FULL.to_string()
    } else {
        format!(
            "Parking lot usage: {ratio:.1}%. There are still {} slot(s) open.",
            stats.empty_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkwatch_core::Detection;

    fn stats(empty: usize, occupied: usize) -> OccupancyStats {
        let detections: Vec<Detection> = std::iter::repeat_n("empty", empty)
            .chain(std::iter::repeat_n("occupied", occupied))
            .map(|c| Detection::classified(c, None))
            .collect();
        OccupancyStats::from_detections(&detections)
    }

    #[test]
    fn picks_sentence_by_ratio() {
        assert_eq!(occupancy_summary(&stats(0, 0)), NO_DATA);
        assert_eq!(occupancy_summary(&stats(3, 1)), NOT_BUSY);
        assert_eq!(occupancy_summary(&stats(1, 1)), MODERATE);
        assert_eq!(occupancy_summary(&stats(0, 4)), FULL);
        assert_eq!(
            occupancy_summary(&stats(1, 9)),
            "Parking lot usage: 90.0%. There are still 1 slot(s) open."
        );
    }

    #[test]
    fn threshold_uses_exact_ratio() {
        // 84.6% rounds to 85 but is still "moderate".
        assert_eq!(occupancy_summary(&stats(2, 11)), MODERATE);
    }
}
