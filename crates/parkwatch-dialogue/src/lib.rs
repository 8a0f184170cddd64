// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Guided reservation dialogue.
//!
//! A five-question conversation (name, email, spot, start time, duration)
//! modelled as [`DialogueState`]. [`Conversation`] keeps the transcript and
//! commits the finished booking to the shared reservation ledger.

pub mod conversation;
pub mod error;
pub mod options;
pub mod state;

pub use conversation::Conversation;
pub use error::DialogueError;
pub use options::{DURATION_OPTIONS, SpotOption, TIME_OPTIONS, spot_options};
pub use state::{Booking, DialogueState, Transition};
