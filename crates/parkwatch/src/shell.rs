// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parkwatch shell` command implementation.
//!
//! Launches an interactive REPL over one monitoring session: scan images,
//! inspect the dashboard and history, and book slots through either the
//! form or the guided dialogue. Both share the session's ledger.

use std::path::PathBuf;

use chrono::NaiveDateTime;

use colored::Colorize;
use parkwatch_agent::{ParkingSession, ScanOutcome};
use parkwatch_config::ParkwatchConfig;
use parkwatch_core::ParkwatchError;
use parkwatch_detect::SummaryClient;
use parkwatch_reservation::{INSTANT_FORMAT, ReservationError, ReservationForm};
use parkwatch_stats::render_dashboard;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::{chat, commands, input};

const HELP: &str = "\
/detect <image>   scan a lot image
/dashboard        occupancy of the latest scan
/overview         session totals
/report           agent report over every scan
/summary          service summary of the latest scan
/timeline         detections per scan
/chat             book a slot through the guided dialogue
/reserve          book a slot through the form
/reservations     list bookings
/quit             leave the shell";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Detect(PathBuf),
    Dashboard,
    Overview,
    Report,
    Summary,
    Timeline,
    Chat,
    Reserve,
    Reservations,
    Help,
    Quit,
    Unknown(String),
}

impl ShellCommand {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match head {
            "/detect" if !rest.is_empty() => Self::Detect(PathBuf::from(rest)),
            "/dashboard" => Self::Dashboard,
            "/overview" => Self::Overview,
            "/report" => Self::Report,
            "/summary" => Self::Summary,
            "/timeline" => Self::Timeline,
            "/chat" => Self::Chat,
            "/reserve" => Self::Reserve,
            "/reservations" => Self::Reservations,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Runs the `parkwatch shell` interactive REPL.
pub async fn run_shell(config: &ParkwatchConfig) -> Result<(), ParkwatchError> {
    let (session, summary_client) = commands::build_session(config, None)?;
    let mut rl = chat::new_editor()?;

    println!("{}", "parkwatch shell".bold().green());
    println!("Type {} for commands, {} to exit.\n", "/help".yellow(), "/quit".yellow());

    let prompt = format!("{}> ", "parkwatch".green());
    loop {
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            // Ctrl+C / Ctrl+D
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(&line);

        let command = ShellCommand::parse(&line);
        if command == ShellCommand::Quit {
            break;
        }
        if let Err(e) = handle_command(command, &session, &summary_client, &mut rl).await {
            eprintln!("{}: {e}", "error".red());
        }
    }
    Ok(())
}

async fn handle_command(
    command: ShellCommand,
    session: &ParkingSession,
    summary_client: &SummaryClient,
    rl: &mut DefaultEditor,
) -> Result<(), ParkwatchError> {
    match command {
        ShellCommand::Detect(path) => {
            let image = input::read_image(&path)?;
            match session.scan(&image).await? {
                ScanOutcome::Recorded(record) => {
                    summary_client
                        .log_scan_or_warn(
                            session.user_name(),
                            Some(image.file_name.as_str()),
                            &record.predictions,
                        )
                        .await;
                    println!("{}", render_dashboard(&session.dashboard().await));
                }
                ScanOutcome::Superseded => println!("{}", "scan superseded".dimmed()),
            }
        }
        ShellCommand::Dashboard => println!("{}", render_dashboard(&session.dashboard().await)),
        ShellCommand::Overview => println!("{}", session.overview().await),
        ShellCommand::Report => println!("{}", session.report().await),
        ShellCommand::Summary => match session.summarize_latest().await {
            Some(summary) => println!("{summary}"),
            None => println!("{}", "summary superseded".dimmed()),
        },
        ShellCommand::Timeline => {
            let timeline = session.timeline().await;
            if timeline.is_empty() {
                println!("No scans yet.");
            } else {
                println!("{timeline}");
            }
        }
        ShellCommand::Chat => {
            let mut conversation = session.start_conversation().await;
            chat::converse(&mut conversation, rl)?;
        }
        ShellCommand::Reserve => reserve_interactively(session, rl).await?,
        ShellCommand::Reservations => {
            let reservations = session.ledger().list();
            if reservations.is_empty() {
                println!("No reservations.");
            }
            for r in reservations {
                println!(
                    "{}  {} - {}  {} <{}> ({})",
                    r.slot_id,
                    r.start.format(INSTANT_FORMAT),
                    r.end.format(INSTANT_FORMAT),
                    r.name,
                    r.email,
                    r.source
                );
            }
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => {}
        ShellCommand::Unknown(line) => {
            println!("Unknown command `{line}`. Type /help for commands.");
        }
    }
    Ok(())
}

fn ask(rl: &mut DefaultEditor, label: &str) -> Result<String, ParkwatchError> {
    rl.readline(&format!("{label}: "))
        .map(|s| s.trim().to_string())
        .map_err(|e| ParkwatchError::Internal(format!("readline failed: {e}")))
}

/// Blank input is left for form validation to report as missing.
fn optional_instant(field: &str, raw: &str) -> Result<Option<NaiveDateTime>, String> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    input::parse_instant(raw)
        .map(Some)
        .map_err(|_| format!("{field} time `{}` is not in YYYY-MM-DD HH:MM format.", raw.trim()))
}

async fn reserve_interactively(
    session: &ParkingSession,
    rl: &mut DefaultEditor,
) -> Result<(), ParkwatchError> {
    let slots = session.form_slots().await;
    if slots.is_empty() {
        println!("No empty slots in the latest scan.");
        return Ok(());
    }
    for slot in &slots {
        let status = if slot.reserved {
            "reserved".red()
        } else {
            "free".green()
        };
        println!("  {} ({}) {status}", slot.label, slot.slot_id);
    }

    let slot_id = ask(rl, "Slot id")?;
    let name = ask(rl, "Name")?;
    let email = ask(rl, "Email")?;
    let start = optional_instant("Start", &ask(rl, "Start (YYYY-MM-DD HH:MM)")?);
    let end = optional_instant("End", &ask(rl, "End (YYYY-MM-DD HH:MM)")?);
    let (start, end) = match (start, end) {
        (Ok(start), Ok(end)) => (start, end),
        (start, end) => {
            for message in [start.err(), end.err()].into_iter().flatten() {
                println!("{}", message.yellow());
            }
            return Ok(());
        }
    };
    let form = ReservationForm {
        name,
        email,
        start,
        end,
    };

    match session.reserve(&slot_id, &form).await {
        Ok(confirmation) => println!("{}", confirmation.message.green()),
        Err(ReservationError::Invalid(errors)) => {
            for message in errors.messages() {
                println!("{}", message.yellow());
            }
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            ShellCommand::parse("/detect  lots/a.jpg "),
            ShellCommand::Detect(PathBuf::from("lots/a.jpg"))
        );
        assert_eq!(ShellCommand::parse("/dashboard"), ShellCommand::Dashboard);
        assert_eq!(ShellCommand::parse(" /reservations"), ShellCommand::Reservations);
        assert_eq!(ShellCommand::parse("/exit"), ShellCommand::Quit);
    }

    #[test]
    fn malformed_instant_is_a_format_error() {
        assert_eq!(optional_instant("Start", "  "), Ok(None));
        assert_eq!(
            optional_instant("Start", "2026-04-01 09:00")
                .unwrap()
                .map(|t| t.to_string()),
            Some("2026-04-01 09:00:00".to_string())
        );
        assert_eq!(
            optional_instant("End", "tomorrow 9am"),
            Err("End time `tomorrow 9am` is not in YYYY-MM-DD HH:MM format.".to_string())
        );
    }

    #[test]
    fn detect_without_path_is_unknown() {
        assert_eq!(
            ShellCommand::parse("/detect"),
            ShellCommand::Unknown("/detect".into())
        );
        assert!(matches!(ShellCommand::parse("hello"), ShellCommand::Unknown(_)));
    }
}
