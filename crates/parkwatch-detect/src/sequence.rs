// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Last-request-wins sequencing for outbound calls.
//!
//! Each request takes a [`Ticket`]. Issuing a new ticket cancels the
//! previous one, and a result is only accepted while its ticket is still
//! the latest.

use std::future::Future;
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Ticket {
    seq: u64,
    token: CancellationToken,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Debug, Default)]
struct Latest {
    seq: u64,
    token: Option<CancellationToken>,
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: Mutex<Latest>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Latest> {
        self.latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Issue a new ticket and cancel the previous one.
    pub fn begin(&self) -> Ticket {
        let mut latest = self.lock();
        latest.seq += 1;
        let token = CancellationToken::new();
        if let Some(previous) = latest.token.replace(token.clone()) {
            previous.cancel();
        }
        debug!(seq = latest.seq, "request ticket issued");
        Ticket {
            seq: latest.seq,
            token,
        }
    }

    /// True while no newer ticket has been issued.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        !ticket.is_cancelled() && self.lock().seq == ticket.seq
    }

    /// Sequence number of the most recent ticket, 0 before the first.
    pub fn latest_seq(&self) -> u64 {
        self.lock().seq
    }

    /// Return `value` only if `ticket` is still current.
    pub fn accept<T>(&self, ticket: &Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            debug!(seq = ticket.seq, "dropping stale result");
            None
        }
    }

    /// Run `fut` under a fresh ticket. Yields `None` when a newer request
    /// started first, either cancelling this one mid-flight or finishing
    /// ahead of it.
    pub async fn run<F, T>(&self, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let ticket = self.begin();
        tokio::select! {
            _ = ticket.token.cancelled() => {
                debug!(seq = ticket.seq, "request superseded");
                None
            }
            value = fut => self.accept(&ticket, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn newer_ticket_cancels_older() {
        let seq = RequestSequencer::new();
        let first = seq.begin();
        let second = seq.begin();
        assert!(first.is_cancelled());
        assert!(!seq.is_current(&first));
        assert!(seq.is_current(&second));
        assert!(second.seq() > first.seq());
        assert_eq!(seq.accept(&first, 1), None);
        assert_eq!(seq.accept(&second, 2), Some(2));
    }

    #[tokio::test]
    async fn run_returns_value_when_uncontested() {
        let seq = RequestSequencer::new();
        assert_eq!(seq.run(async { 7 }).await, Some(7));
        assert_eq!(seq.latest_seq(), 1);
    }

    #[tokio::test]
    async fn slow_request_loses_to_newer_one() {
        let seq = Arc::new(RequestSequencer::new());

        let slow = {
            let seq = Arc::clone(&seq);
            tokio::spawn(async move {
                seq.run(async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    "slow"
                })
                .await
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        let fast = seq.run(async { "fast" }).await;

        assert_eq!(fast, Some("fast"));
        assert_eq!(slow.await.unwrap(), None);
    }
}
