// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session's reserved-slot set.
//!
//! Both the form flow and the guided dialogue commit here, so a slot booked
//! through one cannot be booked through the other. At most one reservation
//! exists per slot key. Nothing is persisted.

use chrono::{DateTime, NaiveDateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::info;

use crate::error::ReservationError;

/// Which flow created a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationSource {
    Form,
    Dialogue,
}

/// One booked slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique reservation identifier (UUID v4).
    pub id: String,
    /// Ledger key: the detection id, or the slot's friendly name.
    pub slot_id: String,
    pub name: String,
    pub email: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub source: ReservationSource,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(
        slot_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        source: ReservationSource,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            slot_id: slot_id.into(),
            name: name.into(),
            email: email.into(),
            start,
            end,
            source,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ReservationLedger {
    entries: DashMap<String, Reservation>,
}

impl ReservationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the reservation unless its slot is already taken. The check
    /// and the insert happen under one shard lock.
    pub fn reserve(&self, reservation: Reservation) -> Result<(), ReservationError> {
        match self.entries.entry(reservation.slot_id.clone()) {
            Entry::Occupied(existing) => Err(ReservationError::SlotAlreadyReserved {
                slot: existing.key().clone(),
            }),
            Entry::Vacant(vacant) => {
                info!(
                    slot = %reservation.slot_id,
                    source = %reservation.source,
                    start = %reservation.start,
                    end = %reservation.end,
                    "slot reserved"
                );
                vacant.insert(reservation);
                Ok(())
            }
        }
    }

    pub fn is_reserved(&self, slot_id: &str) -> bool {
        self.entries.contains_key(slot_id)
    }

    pub fn get(&self, slot_id: &str) -> Option<Reservation> {
        self.entries.get(slot_id).map(|r| r.value().clone())
    }

    /// All reservations, ordered by start then slot.
    pub fn list(&self) -> Vec<Reservation> {
        let mut all: Vec<Reservation> = self.entries.iter().map(|r| r.value().clone()).collect();
        all.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.slot_id.cmp(&b.slot_id)));
        all
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn booking(slot: &str, h: u32, source: ReservationSource) -> Reservation {
        Reservation::new(slot, "Ana", "ana@x.io", at(h, 0), at(h + 1, 0), source)
    }

    #[test]
    fn second_reservation_of_same_slot_is_rejected() {
        let ledger = ReservationLedger::new();
        ledger.reserve(booking("A1", 9, ReservationSource::Form)).unwrap();
        let err = ledger
            .reserve(booking("A1", 12, ReservationSource::Dialogue))
            .unwrap_err();
        assert_eq!(err, ReservationError::SlotAlreadyReserved { slot: "A1".into() });
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get("A1").unwrap().source, ReservationSource::Form);
    }

    #[test]
    fn list_is_sorted_by_start() {
        let ledger = ReservationLedger::new();
        ledger.reserve(booking("B", 14, ReservationSource::Form)).unwrap();
        ledger.reserve(booking("A", 9, ReservationSource::Dialogue)).unwrap();
        let slots: Vec<_> = ledger.list().into_iter().map(|r| r.slot_id).collect();
        assert_eq!(slots, vec!["A", "B"]);
        assert!(ledger.is_reserved("A"));
        assert!(!ledger.is_reserved("C"));
    }

    #[test]
    fn concurrent_reservations_admit_exactly_one() {
        let ledger = Arc::new(ReservationLedger::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    let source = if i % 2 == 0 {
                        ReservationSource::Form
                    } else {
                        ReservationSource::Dialogue
                    };
                    ledger.reserve(booking("hot", 10, source)).is_ok()
                })
            })
            .collect();
        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(wins, 1);
    }

    #[test]
    fn reservation_serializes_source_lowercase() {
        let json = serde_json::to_value(booking("A", 9, ReservationSource::Dialogue)).unwrap();
        assert_eq!(json["source"], "dialogue");
        assert_eq!(json["start"], "2026-03-14T09:00:00");
    }
}
