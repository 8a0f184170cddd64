// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parkwatch chat` and the shell's `/chat`: the guided booking dialogue on
//! a terminal.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use parkwatch_core::{ParkwatchError, Speaker, TranscriptEntry};
use parkwatch_dialogue::Conversation;
use parkwatch_reservation::ReservationLedger;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::input;

/// Typed at any prompt to abandon the conversation.
pub const CANCEL: &str = "/cancel";

/// Runs `parkwatch chat` against a fresh ledger.
pub fn run_chat(predictions: &Path) -> Result<(), ParkwatchError> {
    let detections = input::read_predictions(predictions)?;
    let mut conversation = Conversation::start(&detections, Arc::new(ReservationLedger::new()));
    let mut rl = new_editor()?;
    converse(&mut conversation, &mut rl)
}

pub fn new_editor() -> Result<DefaultEditor, ParkwatchError> {
    DefaultEditor::new()
        .map_err(|e| ParkwatchError::Internal(format!("failed to initialize readline: {e}")))
}

/// Drive a conversation until it completes or the user cancels.
pub fn converse(
    conversation: &mut Conversation,
    rl: &mut DefaultEditor,
) -> Result<(), ParkwatchError> {
    print_bot_lines(conversation.transcript());
    println!("Type {} to stop.", CANCEL.yellow());

    while !conversation.is_complete() {
        if let Some(hint) = choices_hint(&conversation.choices()) {
            println!("{}", hint.dimmed());
        }
        let line = match rl.readline(&format!("{}> ", "you".cyan())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("Conversation cancelled.");
                return Ok(());
            }
            Err(e) => return Err(ParkwatchError::Internal(format!("readline failed: {e}"))),
        };
        if line.trim() == CANCEL {
            println!("Conversation cancelled.");
            return Ok(());
        }
        let _ = rl.add_history_entry(&line);
        let entries = conversation.submit(&line)?;
        print_bot_lines(&entries);
    }
    Ok(())
}

fn print_bot_lines(entries: &[TranscriptEntry]) {
    for text in bot_lines(entries) {
        println!("{} {text}", "bot:".green().bold());
    }
}

fn bot_lines(entries: &[TranscriptEntry]) -> impl Iterator<Item = &str> {
    entries
        .iter()
        .filter(|e| e.speaker == Speaker::Bot)
        .map(|e| e.text.as_str())
}

/// One-line list of valid answers, or `None` for free-text stages.
fn choices_hint(choices: &[String]) -> Option<String> {
    if choices.is_empty() {
        None
    } else {
        Some(format!("[{}]", choices.join(" | ")))
    }
}
