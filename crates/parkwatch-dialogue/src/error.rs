// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use parkwatch_core::ParkwatchError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogueError {
    /// The conversation already confirmed a reservation.
    #[error("conversation {id} is complete and accepts no further input")]
    ConversationClosed { id: String },
}

impl From<DialogueError> for ParkwatchError {
    fn from(err: DialogueError) -> Self {
        Self::Conflict(err.to_string())
    }
}
