// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use parkwatch_core::ParkwatchError;
use thiserror::Error;

use crate::form::FormErrors;

/// Why a reservation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    #[error("spot {slot} is already reserved")]
    SlotAlreadyReserved { slot: String },

    #[error("spot {slot} is not an available slot")]
    UnknownSlot { slot: String },

    #[error("{0}")]
    Invalid(FormErrors),
}

impl From<ReservationError> for ParkwatchError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::SlotAlreadyReserved { .. } => Self::Conflict(err.to_string()),
            ReservationError::UnknownSlot { .. } => Self::NotFound(err.to_string()),
            ReservationError::Invalid(errors) => Self::Validation(errors.to_string()),
        }
    }
}
