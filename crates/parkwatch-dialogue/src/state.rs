// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dialogue state machine.
//!
//! Each variant carries exactly the fields collected so far, so a later
//! stage cannot be reached without the earlier answers. [`DialogueState::submit`]
//! is pure: it consumes the state and one line of input and returns the
//! next state plus the transcript lines to append.

use chrono::NaiveTime;
use parkwatch_core::{TranscriptEntry, is_valid_email};
use serde::Serialize;

use crate::options::{SpotOption, find_spot, parse_duration, parse_start_time};

pub const GREETING: &str = "Welcome to Smart Parking! What is your name?";
pub const ASK_NAME_AGAIN: &str = "Please tell me your name.";
pub const ASK_EMAIL: &str = "What is your email address?";
pub const BAD_EMAIL: &str = "Please enter a valid email address.";
pub const NO_SPOTS: &str = "Sorry! No spots available at the moment.";
pub const BAD_SPOT: &str = "Please select a valid available spot from the list.";
pub const SPOT_TAKEN: &str = "That spot has just been reserved. Please pick another one.";
pub const ASK_TIME: &str = "Select your reservation start time:";
pub const BAD_TIME: &str = "Pick a valid start time from the options.";
pub const ASK_DURATION: &str = "Select duration for reservation (in minutes):";
pub const BAD_DURATION: &str = "Select a valid duration from the options.";

/// Everything the dialogue collected, once finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub name: String,
    pub email: String,
    pub spot: SpotOption,
    pub start: NaiveTime,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogueState {
    #[default]
    AwaitingName,
    AwaitingEmail {
        name: String,
    },
    AwaitingSpot {
        name: String,
        email: String,
    },
    AwaitingTime {
        name: String,
        email: String,
        spot: SpotOption,
    },
    AwaitingDuration {
        name: String,
        email: String,
        spot: SpotOption,
        start: NaiveTime,
    },
    Complete(Booking),
}

/// Result of one `submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: DialogueState,
    pub entries: Vec<TranscriptEntry>,
}

impl Transition {
    fn advance(state: DialogueState, input: &str, reply: impl Into<String>) -> Self {
        Self {
            state,
            entries: vec![TranscriptEntry::user(input), TranscriptEntry::bot(reply)],
        }
    }
}

/// "There are N parking spots available: A, B. Please select one to book."
pub fn spots_message(options: &[SpotOption]) -> String {
    if options.is_empty() {
        return NO_SPOTS.to_string();
    }
    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    format!(
        "There are {} parking spots available: {}. Please select one to book.",
        options.len(),
        labels.join(", ")
    )
}

pub fn confirmation_message(booking: &Booking) -> String {
    format!(
        "Congratulations {}! Your parking spot \"{}\" is reserved from {} for {} minutes.",
        booking.name,
        booking.spot.label,
        booking.start.format("%H:%M"),
        booking.duration_minutes
    )
}

impl DialogueState {
    /// Stage number, 0 (name) to 5 (complete).
    pub fn stage(&self) -> u8 {
        match self {
            Self::AwaitingName => 0,
            Self::AwaitingEmail { .. } => 1,
            Self::AwaitingSpot { .. } => 2,
            Self::AwaitingTime { .. } => 3,
            Self::AwaitingDuration { .. } => 4,
            Self::Complete(_) => 5,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Apply one line of input. Checks run on the trimmed input; the
    /// transcript keeps it as typed. A failed check keeps the state and
    /// appends the input followed by one error line. A complete dialogue ignores
    /// input and appends nothing.
    pub fn submit(self, input: &str, options: &[SpotOption]) -> Transition {
        let text = input.trim();
        match self {
            Self::AwaitingName => {
                if text.is_empty() {
                    Transition::advance(Self::AwaitingName, input, ASK_NAME_AGAIN)
                } else {
                    Transition::advance(
                        Self::AwaitingEmail {
                            name: text.to_string(),
                        },
                        input,
                        ASK_EMAIL,
                    )
                }
            }
            Self::AwaitingEmail { name } => {
                if is_valid_email(text) {
                    Transition::advance(
                        Self::AwaitingSpot {
                            name,
                            email: text.to_string(),
                        },
                        input,
                        spots_message(options),
                    )
                } else {
                    Transition::advance(Self::AwaitingEmail { name }, input, BAD_EMAIL)
                }
            }
            Self::AwaitingSpot { name, email } => match find_spot(options, text) {
                Some(spot) => Transition::advance(
                    Self::AwaitingTime {
                        name,
                        email,
                        spot: spot.clone(),
                    },
                    input,
                    ASK_TIME,
                ),
                None => Transition::advance(Self::AwaitingSpot { name, email }, input, BAD_SPOT),
            },
            Self::AwaitingTime { name, email, spot } => match parse_start_time(text) {
                Some(start) => Transition::advance(
                    Self::AwaitingDuration {
                        name,
                        email,
                        spot,
                        start,
                    },
                    input,
                    ASK_DURATION,
                ),
                None => Transition::advance(Self::AwaitingTime { name, email, spot }, input, BAD_TIME),
            },
            Self::AwaitingDuration {
                name,
                email,
                spot,
                start,
            } => match parse_duration(text) {
                Some(duration_minutes) => {
                    let booking = Booking {
                        name,
                        email,
                        spot,
                        start,
                        duration_minutes,
                    };
                    let reply = confirmation_message(&booking);
                    Transition::advance(Self::Complete(booking), input, reply)
                }
                None => Transition::advance(
                    Self::AwaitingDuration {
                        name,
                        email,
                        spot,
                        start,
                    },
                    input,
                    BAD_DURATION,
                ),
            },
            complete @ Self::Complete(_) => Transition {
                state: complete,
                entries: Vec::new(),
            },
        }
    }
}

impl std::fmt::Display for DialogueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::AwaitingName => "awaiting_name",
            Self::AwaitingEmail { .. } => "awaiting_email",
            Self::AwaitingSpot { .. } => "awaiting_spot",
            Self::AwaitingTime { .. } => "awaiting_time",
            Self::AwaitingDuration { .. } => "awaiting_duration",
            Self::Complete(_) => "complete",
        };
        f.write_str(label)
    }
}
