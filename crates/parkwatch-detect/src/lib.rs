// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound HTTP for parkwatch: the detection model client, the summary
//! service client, and last-request-wins sequencing for both.

pub mod detection;
pub mod sequence;
pub mod summary;
pub mod types;

pub use detection::DetectionClient;
pub use sequence::{RequestSequencer, Ticket};
pub use summary::SummaryClient;
pub use types::{DetectionResponse, ScanLogRequest, SummaryRequest, SummaryResponse};
