// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slot reservations for parkwatch: the shared ledger and the form flow.

pub mod error;
pub mod form;
pub mod ledger;

pub use error::ReservationError;
pub use form::{
    Confirmation, FormErrors, FormSlot, INSTANT_FORMAT, ReservationForm, form_slots, reserve_slot,
};
pub use ledger::{Reservation, ReservationLedger, ReservationSource};

#[cfg(test)]
mod tests {
    use super::*;
    use parkwatch_core::ParkwatchError;

    #[test]
    fn reservation_errors_map_to_workspace_errors() {
        let conflict: ParkwatchError = ReservationError::SlotAlreadyReserved { slot: "A".into() }.into();
        assert!(matches!(conflict, ParkwatchError::Conflict(_)));

        let missing: ParkwatchError = ReservationError::UnknownSlot { slot: "Z".into() }.into();
        assert!(matches!(missing, ParkwatchError::NotFound(_)));

        let invalid: ParkwatchError = ReservationError::Invalid(FormErrors {
            name: Some("Name is required.".into()),
            ..FormErrors::default()
        })
        .into();
        assert_eq!(invalid.to_string(), "validation failed: Name is required.");
    }
}
