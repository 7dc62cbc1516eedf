//! # Command Layer
//!
//! Each command lives in its own submodule and turns a [`NoteStore`] call into
//! a structured [`CmdResult`].
//!
//! ## Role and Responsibilities
//!
//! - Call the repository operation
//! - Decode notes into [`DisplayNote`]s (plain text + formatted timestamp)
//! - Attach user-facing messages with levels (info, success, warning)
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal or file I/O**: exports come back as a file name plus JSON
//!   text, and the UI decides where to write them
//! - **Argument parsing** or **exit codes**
//! - **Domain name checks**: that happens once, in the API facade
//!
//! ## Command Modules
//!
//! - [`add`]: Create a note
//! - [`update`]: Replace a note's text
//! - [`delete`]: Remove one note, or all notes for a domain
//! - [`list`]: List, search, and enumerate domains
//! - [`export`]: Build the export document

use crate::codec::CORRUPTED_NOTE;
use crate::model::Note;
use crate::store::{NoteStore, StorageBackend};
use serde::Serialize;

pub mod add;
pub mod delete;
pub mod export;
pub mod list;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// A note as the UI shows it: decoded text and a formatted time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayNote {
    pub id: String,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub formatted_time: String,
}

impl DisplayNote {
    pub fn from_note(note: &Note, timestamp_format: &str) -> Self {
        Self {
            id: note.id.clone(),
            text: note.text(),
            timestamp: note.timestamp,
            formatted_time: note.formatted_timestamp(timestamp_format),
        }
    }
}

/// An export ready to be written somewhere.
#[derive(Debug, Clone)]
pub struct ExportOutput {
    pub filename: String,
    pub json: String,
    pub note_count: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<DisplayNote>,
    pub listed_notes: Vec<DisplayNote>,
    pub domains: Vec<String>,
    pub export: Option<ExportOutput>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notes(mut self, notes: Vec<DisplayNote>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<DisplayNote>) -> Self {
        self.listed_notes = notes;
        self
    }
}

pub(crate) fn display_notes<B: StorageBackend>(
    store: &NoteStore<B>,
    notes: &[Note],
) -> Vec<DisplayNote> {
    notes
        .iter()
        .map(|n| DisplayNote::from_note(n, store.timestamp_format()))
        .collect()
}

/// A warning naming how many of `notes` could not be decoded, if any.
pub(crate) fn corruption_warning(domain: &str, notes: &[Note]) -> Option<CmdMessage> {
    let corrupted = notes.iter().filter(|n| n.is_corrupted()).count();
    if corrupted == 0 {
        return None;
    }
    Some(CmdMessage::warning(format!(
        "{} note{} for {} could not be decoded and {} shown as {}",
        corrupted,
        if corrupted == 1 { "" } else { "s" },
        domain,
        if corrupted == 1 { "is" } else { "are" },
        CORRUPTED_NOTE
    )))
}
