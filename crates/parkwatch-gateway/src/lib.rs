// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The parkwatch summary service.
//!
//! An axum server that summarizes detections, curates reference images for
//! uncertain spots, keeps a log of reported scans with daily statistics,
//! and exposes the reservation form and guided dialogue over HTTP.

pub mod curation;
pub mod dialogues;
pub mod handlers;
pub mod reservations;
pub mod scan_log;
pub mod server;

pub use curation::{CuratedImages, ImageSearch, UnsplashClient, curate, query_for};
pub use scan_log::{DashboardStats, LoggedScan, ScanLog};
pub use server::{GatewayState, HealthState, ServerConfig, build_router, start_server};
