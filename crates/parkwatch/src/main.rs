// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parkwatch - parking lot occupancy monitoring.
//!
//! This is the binary entry point for the parkwatch CLI.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod chat;
mod commands;
mod input;
mod serve;
mod shell;

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use colored::Colorize;

/// Parkwatch - parking lot occupancy monitoring.
#[derive(Parser, Debug)]
#[command(name = "parkwatch", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run detection on lot images and print the dashboard.
    Detect {
        /// Images to scan, in order.
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Also print the service summary of the last scan.
        #[arg(long)]
        summary: bool,
        /// Also print the agent report.
        #[arg(long)]
        report: bool,
        /// Report each scan to the summary service's scan log.
        #[arg(long)]
        log: bool,
        /// Name shown in the report header.
        #[arg(long)]
        user: Option<String>,
    },
    /// Render the agent report from a JSON file of scans.
    Report {
        /// JSON array of `{time, predictions}` records.
        scans: PathBuf,
        #[arg(long)]
        user: Option<String>,
    },
    /// Book a slot through the guided conversation.
    Chat {
        /// JSON file of detections to offer spots from.
        #[arg(long)]
        predictions: PathBuf,
    },
    /// Book a slot through the one-shot form.
    Reserve {
        #[arg(long)]
        predictions: PathBuf,
        /// Slot id (detection id or spot name).
        #[arg(long)]
        slot: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Start, `YYYY-MM-DD HH:MM`.
        #[arg(long, value_parser = input::parse_instant)]
        start: NaiveDateTime,
        /// End, `YYYY-MM-DD HH:MM`.
        #[arg(long, value_parser = input::parse_instant)]
        end: NaiveDateTime,
    },
    /// Launch an interactive monitoring shell.
    Shell,
    /// Start the summary service.
    Serve,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => parkwatch_config::load_and_validate_path(path),
        None => parkwatch_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            parkwatch_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Detect {
            images,
            summary,
            report,
            log,
            user,
        }) => {
            let options = commands::DetectOptions {
                summary,
                report,
                log,
                user,
            };
            commands::run_detect(&config, &images, options).await
        }
        Some(Commands::Report { scans, user }) => {
            let user = user.or_else(|| config.agent.user_name.clone());
            commands::run_report(&scans, user.as_deref(), config.history.max_scans)
        }
        Some(Commands::Chat { predictions }) => chat::run_chat(&predictions),
        Some(Commands::Reserve {
            predictions,
            slot,
            name,
            email,
            start,
            end,
        }) => {
            let form = parkwatch_reservation::ReservationForm {
                name,
                email,
                start: Some(start),
                end: Some(end),
            };
            commands::run_reserve(&predictions, &slot, &form)
        }
        Some(Commands::Shell) => shell::run_shell(&config).await,
        Some(Commands::Serve) => serve::run_serve(&config).await,
        None => {
            println!("parkwatch: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("parkwatch={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
