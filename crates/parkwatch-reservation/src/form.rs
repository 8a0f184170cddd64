// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The one-shot reservation form.
//!
//! Every field is checked and all failures are reported together. A valid
//! form commits the chosen slot to the [`ReservationLedger`].

use std::fmt;

use chrono::NaiveDateTime;
use parkwatch_core::{Detection, is_valid_email};
use serde::{Deserialize, Serialize};

use crate::error::ReservationError;
use crate::ledger::{Reservation, ReservationLedger, ReservationSource};

/// Display format for reservation instants.
pub const INSTANT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
}

/// Per-field validation messages. Absent fields passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.messages().next().is_none()
    }

    /// Messages in field order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        [&self.name, &self.email, &self.start, &self.end]
            .into_iter()
            .filter_map(|m| m.as_deref())
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.messages().collect();
        f.write_str(&joined.join(" "))
    }
}

impl ReservationForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if self.name.trim().is_empty() {
            errors.name = Some("Name is required.".into());
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.email = Some("Email is required.".into());
        } else if !is_valid_email(email) {
            errors.email = Some("Invalid email format.".into());
        }

        if self.start.is_none() {
            errors.start = Some("Start time required.".into());
        }

        match (self.start, self.end) {
            (_, None) => errors.end = Some("End time required.".into()),
            (Some(start), Some(end)) if end <= start => {
                errors.end = Some("End must be after start.".into());
            }
            _ => {}
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A slot the form may book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSlot {
    pub slot_id: String,
    pub label: String,
    pub reserved: bool,
}

/// Slots offered by the form, with their reserved state. Same list and keys
/// as the guided dialogue.
pub fn form_slots(detections: &[Detection], ledger: &ReservationLedger) -> Vec<FormSlot> {
    Detection::available_slots(detections)
        .into_iter()
        .map(|slot| FormSlot {
            reserved: ledger.is_reserved(&slot.key),
            label: slot.label,
            slot_id: slot.key,
        })
        .collect()
}

/// A committed form reservation and the notification text for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub reservation: Reservation,
    pub message: String,
}

/// Validate the form and book `slot_id` among the current empty slots.
pub fn reserve_slot(
    ledger: &ReservationLedger,
    detections: &[Detection],
    slot_id: &str,
    form: &ReservationForm,
) -> Result<Confirmation, ReservationError> {
    form.validate().map_err(ReservationError::Invalid)?;

    if !form_slots(detections, ledger).iter().any(|s| s.slot_id == slot_id) {
        return Err(ReservationError::UnknownSlot {
            slot: slot_id.to_string(),
        });
    }

    // validate() guarantees both instants are present.
    let (Some(start), Some(end)) = (form.start, form.end) else {
        return Err(ReservationError::Invalid(FormErrors::default()));
    };

    let email = form.email.trim();
    let reservation = Reservation::new(
        slot_id,
        form.name.trim(),
        email,
        start,
        end,
        ReservationSource::Form,
    );
    ledger.reserve(reservation.clone())?;

    let message = format!(
        "Notification sent to {email}: Your reservation for spot {slot_id} is confirmed from {} to {}.",
        start.format(INSTANT_FORMAT),
        end.format(INSTANT_FORMAT)
    );
    Ok(Confirmation {
        reservation,
        message,
    })
}
