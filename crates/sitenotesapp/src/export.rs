//! # Export
//!
//! Turns a snapshot of a domain's notes into a portable JSON document:
//!
//! ```text
//! {
//!   "domain": "example.com",
//!   "exportDate": "2026-10-16T09:30:00.000Z",
//!   "notes": [
//!     { "content": "plain text", "timestamp": "10/16/2026, 9:29:41 AM", "id": "..." }
//!   ]
//! }
//! ```
//!
//! Notes keep the order they were given in, which for a [`NoteStore`](crate::store::NoteStore)
//! listing is newest first. Content is decoded; a corrupted note exports as
//! [`CORRUPTED_NOTE`](crate::codec::CORRUPTED_NOTE) rather than failing the export.
//!
//! Formatting is pure: nothing here reads or writes the store.

use crate::error::{NotesError, Result};
use crate::model::Note;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub domain: String,
    /// ISO-8601 UTC, millisecond precision.
    pub export_date: String,
    pub notes: Vec<ExportedNote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedNote {
    pub content: String,
    pub timestamp: String,
    pub id: String,
}

/// Build the export document for `domain`, stamped with the current time.
pub fn to_document(domain: &str, notes: &[Note], timestamp_format: &str) -> Result<ExportDocument> {
    to_document_at(domain, notes, timestamp_format, Utc::now())
}

/// Like [`to_document`] with an explicit export time.
pub fn to_document_at(
    domain: &str,
    notes: &[Note],
    timestamp_format: &str,
    exported_at: DateTime<Utc>,
) -> Result<ExportDocument> {
    if notes.is_empty() {
        return Err(NotesError::NothingToExport {
            domain: domain.to_string(),
        });
    }

    Ok(ExportDocument {
        domain: domain.to_string(),
        export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        notes: notes
            .iter()
            .map(|note| ExportedNote {
                content: note.text(),
                timestamp: note.formatted_timestamp(timestamp_format),
                id: note.id.clone(),
            })
            .collect(),
    })
}

/// Pretty JSON with two-space indentation.
pub fn to_json(document: &ExportDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Suggested file name: `secure-notes-<domain>-<YYYY-MM-DD>.json`.
pub fn export_filename(domain: &str, exported_at: DateTime<Utc>) -> String {
    format!(
        "secure-notes-{}-{}.json",
        sanitize_filename(domain),
        exported_at.format("%Y-%m-%d")
    )
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
