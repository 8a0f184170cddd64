// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A dialogue bound to a transcript and the shared reservation ledger.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use parkwatch_core::{Detection, TranscriptEntry};
use parkwatch_reservation::{Reservation, ReservationError, ReservationLedger, ReservationSource};
use tracing::{debug, info};

use crate::error::DialogueError;
use crate::options::{DURATION_OPTIONS, SpotOption, TIME_OPTIONS, find_spot, spot_options};
use crate::state::{Booking, DialogueState, GREETING, SPOT_TAKEN};

pub struct Conversation {
    id: String,
    state: DialogueState,
    options: Vec<SpotOption>,
    transcript: Vec<TranscriptEntry>,
    ledger: Arc<ReservationLedger>,
    booking_date: NaiveDate,
    started_at: DateTime<Utc>,
    reservation: Option<Reservation>,
}

impl Conversation {
    /// Start a conversation over the given detections. Spot options are
    /// fixed here and never re-derived.
    pub fn start(detections: &[Detection], ledger: Arc<ReservationLedger>) -> Self {
        let options = spot_options(detections);
        let id = uuid::Uuid::new_v4().to_string();
        debug!(conversation = %id, spots = options.len(), "conversation started");
        Self {
            id,
            state: DialogueState::AwaitingName,
            options,
            transcript: vec![TranscriptEntry::bot(GREETING)],
            ledger,
            booking_date: chrono::Local::now().date_naive(),
            started_at: Utc::now(),
            reservation: None,
        }
    }

    /// Date the chosen start time applies to. Defaults to today.
    pub fn with_booking_date(mut self, date: NaiveDate) -> Self {
        self.booking_date = date;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &DialogueState {
        &self.state
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn stage(&self) -> u8 {
        self.state.stage()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn options(&self) -> &[SpotOption] {
        &self.options
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// The ledger entry this conversation created, once complete.
    pub fn reservation(&self) -> Option<&Reservation> {
        self.reservation.as_ref()
    }

    /// Choices valid at the current stage, for surfaces that render pickers.
    pub fn choices(&self) -> Vec<String> {
        match self.state {
            DialogueState::AwaitingSpot { .. } => {
                self.options.iter().map(|o| o.label.clone()).collect()
            }
            DialogueState::AwaitingTime { .. } => {
                TIME_OPTIONS.iter().map(|t| t.to_string()).collect()
            }
            DialogueState::AwaitingDuration { .. } => {
                DURATION_OPTIONS.iter().map(|m| format!("{m} min")).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Submit one line of input, returning the transcript lines it added.
    pub fn submit(&mut self, input: &str) -> Result<Vec<TranscriptEntry>, DialogueError> {
        if self.is_complete() {
            return Err(DialogueError::ConversationClosed {
                id: self.id.clone(),
            });
        }

        if let DialogueState::AwaitingSpot { .. } = self.state {
            let taken = find_spot(&self.options, input)
                .is_some_and(|spot| self.ledger.is_reserved(&spot.slot_key));
            if taken {
                let entries = vec![
                    TranscriptEntry::user(input),
                    TranscriptEntry::bot(SPOT_TAKEN),
                ];
                self.transcript.extend(entries.iter().cloned());
                return Ok(entries);
            }
        }

        let transition = std::mem::take(&mut self.state).submit(input, &self.options);
        let mut entries = transition.entries;
        self.state = transition.state;

        if let DialogueState::Complete(booking) = &self.state {
            match self.commit(booking) {
                Ok(reservation) => {
                    info!(
                        conversation = %self.id,
                        slot = %reservation.slot_id,
                        "dialogue reservation committed"
                    );
                    self.reservation = Some(reservation);
                }
                Err(err) => {
                    info!(conversation = %self.id, error = %err, "spot taken before confirmation");
                    if let Some(last) = entries.last_mut() {
                        *last = TranscriptEntry::bot(SPOT_TAKEN);
                    }
                    let Booking { name, email, .. } = booking.clone();
                    self.state = DialogueState::AwaitingSpot { name, email };
                }
            }
        }

        self.transcript.extend(entries.iter().cloned());
        Ok(entries)
    }

    fn commit(&self, booking: &Booking) -> Result<Reservation, ReservationError> {
        let start = self.booking_date.and_time(booking.start);
        let end = start + Duration::minutes(i64::from(booking.duration_minutes));
        let reservation = Reservation::new(
            booking.spot.slot_key.clone(),
            booking.name.clone(),
            booking.email.clone(),
            start,
            end,
            ReservationSource::Dialogue,
        );
        self.ledger.reserve(reservation.clone())?;
        Ok(reservation)
    }
}

impl std::fmt::Debug for Conversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conversation")
            .field("id", &self.id)
            .field("state", &self.state.to_string())
            .field("options", &self.options.len())
            .field("transcript", &self.transcript.len())
            .finish()
    }
}
