//! Terminal rendering for command results.
//!
//! Functions here build strings and never touch the store; `commands.rs`
//! prints what they return. Styling goes through `console`, which drops
//! colors automatically when stdout is not a terminal.

use super::styles;
use chrono::{Local, TimeZone, Utc};
use sitenotesapp::commands::{CmdMessage, DisplayNote, MessageLevel};
use sitenotesapp::model::{truncate_preview, DEFAULT_PREVIEW_LENGTH};
use std::time::Duration;
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const TIME_WIDTH: usize = 16;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        let styled = match message.level {
            MessageLevel::Info => styles::INFO.apply_to(&message.content),
            MessageLevel::Success => styles::SUCCESS.apply_to(&message.content),
            MessageLevel::Warning => styles::WARNING.apply_to(&message.content),
        };
        println!("{}", styled);
    }
}

/// One line per note: relative time, preview, id.
pub(super) fn render_note_list(notes: &[DisplayNote], now_millis: i64) -> String {
    let mut out = String::new();
    for note in notes {
        let time = pad_left(&format_time_ago(note.timestamp, now_millis), TIME_WIDTH);
        let preview = truncate_preview(&single_line(&note.text), DEFAULT_PREVIEW_LENGTH);
        out.push_str(&format!(
            "{}  {}  {}\n",
            styles::TIME.apply_to(time),
            preview,
            styles::NOTE_ID.apply_to(&note.id)
        ));
    }
    out
}

/// Each note in full, headed by its id and the configured timestamp.
pub(super) fn render_full_notes(notes: &[DisplayNote]) -> String {
    let blocks: Vec<String> = notes
        .iter()
        .map(|note| {
            format!(
                "{}  {}\n{}\n",
                styles::NOTE_ID.apply_to(&note.id),
                styles::TIME.apply_to(&note.formatted_time),
                note.text
            )
        })
        .collect();
    blocks.join("\n")
}

pub(super) fn render_domains(domains: &[String]) -> String {
    domains
        .iter()
        .map(|d| format!("{}\n", styles::DOMAIN.apply_to(d)))
        .collect()
}

pub(super) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn format_time_ago(timestamp: i64, now_millis: i64) -> String {
    let elapsed = now_millis.saturating_sub(timestamp).max(0) as u64;
    let text = Formatter::new().convert(Duration::from_millis(elapsed));
    if elapsed >= 30 * 24 * 60 * 60 * 1000 {
        // Past a month the absolute date reads better.
        if let Some(dt) = Local.timestamp_millis_opt(timestamp).single() {
            return dt.format("%Y-%m-%d").to_string();
        }
    }
    text
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn pad_left(text: &str, width: usize) -> String {
    let w = text.width();
    if w >= width {
        text.to_string()
    } else {
        format!("{}{}", " ".repeat(width - w), text)
    }
}
