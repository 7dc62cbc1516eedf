//! # Domain Model
//!
//! Two types make up everything that is persisted:
//!
//! - [`Note`]: one short text note. Its `content` is always the encoded form
//!   produced by [`codec::encode`](crate::codec::encode).
//! - [`DomainNoteMap`]: hostname → notes, newest first. The whole map lives
//!   under a single backend key ([`NOTES_KEY`]).
//!
//! ## Storage Shape
//!
//! ```text
//! {
//!   "example.com": [
//!     { "id": "lp3x9k2a-9f1c0d2e3b4a5968", "content": "aGVsbG8=", "ts": 1700000000000 },
//!     ...
//!   ],
//!   "docs.rs": [ ... ]
//! }
//! ```
//!
//! The field is called `ts` on disk and `timestamp` in Rust.
//!
//! ## Lenient Reads
//!
//! The map is kept as raw JSON and only the domain being touched is parsed.
//! A domain entry that is not a list reads as empty and list elements that are
//! not notes are skipped when reading. Mutations edit the raw list in place:
//! an add inserts one element at the front, an update rewrites `content` and
//! `ts` of one element, a delete drops the elements carrying that id. Every
//! other element, including unparseable ones and fields this crate does not
//! know, is written back exactly as it was read.

use crate::codec;
use crate::error::Result;
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Write as _;

/// The single backend key holding the [`DomainNoteMap`].
pub const NOTES_KEY: &str = "notesByDomain";

/// Default human timestamp layout, e.g. `10/16/2026, 3:04:05 PM`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Default preview length for list rendering.
pub const DEFAULT_PREVIEW_LENGTH: usize = 100;

const MAX_DOMAIN_LENGTH: usize = 253;

static DOMAIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9\-._]*[a-zA-Z0-9]$").expect("valid domain regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    /// Encoded body; see [`Note::text`].
    pub content: String,
    /// Milliseconds since the Unix epoch of creation or last edit.
    #[serde(rename = "ts")]
    pub timestamp: i64,
}

impl Note {
    /// Build a note from already-validated plain text.
    pub fn new(plain_text: &str) -> Self {
        Self {
            id: crate::id::generate(),
            content: codec::encode(plain_text),
            timestamp: now_millis(),
        }
    }

    /// The decoded body, or [`codec::CORRUPTED_NOTE`] if it cannot be decoded.
    pub fn text(&self) -> String {
        codec::decode(&self.content)
    }

    /// Whether the stored content fails to decode.
    pub fn is_corrupted(&self) -> bool {
        codec::try_decode(&self.content).is_err()
    }

    pub fn formatted_timestamp(&self, format: &str) -> String {
        format_timestamp(self.timestamp, format)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainNoteMap {
    entries: Map<String, Value>,
}

impl DomainNoteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap whatever the backend returned. Anything but a JSON object reads as empty.
    pub fn from_value(value: Option<Value>) -> Self {
        match value {
            Some(Value::Object(entries)) => Self { entries },
            None | Some(Value::Null) => Self::default(),
            Some(other) => {
                tracing::warn!(
                    kind = value_kind(&other),
                    "stored note map is not an object, treating as empty"
                );
                Self::default()
            }
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }

    /// The notes stored for `domain`, newest first.
    pub fn notes(&self, domain: &str) -> Vec<Note> {
        let Some(entry) = self.entries.get(domain) else {
            return Vec::new();
        };
        let Value::Array(items) = entry else {
            tracing::warn!(domain, "note list is not an array, treating as empty");
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match Note::deserialize(item) {
                Ok(note) => Some(note),
                Err(e) => {
                    tracing::warn!(domain, error = %e, "skipping malformed note entry");
                    None
                }
            })
            .collect()
    }

    /// Insert `note` at the front of `domain`'s list, creating the list if
    /// needed. A domain entry that is not a list is replaced.
    pub fn prepend_note(&mut self, domain: &str, note: &Note) -> Result<()> {
        let value = serde_json::to_value(note)?;
        let entry = self
            .entries
            .entry(domain.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        match entry {
            Value::Array(items) => items.insert(0, value),
            other => {
                tracing::warn!(domain, "replacing note list that is not an array");
                *other = Value::Array(vec![value]);
            }
        }
        Ok(())
    }

    /// Apply `edit` to the note with `id` and store its new `content` and
    /// `ts`. Returns the edited note, or `None` if no parseable note has that id.
    pub fn update_note<F>(&mut self, domain: &str, id: &str, edit: F) -> Option<Note>
    where
        F: FnOnce(&mut Note),
    {
        let Some(Value::Array(items)) = self.entries.get_mut(domain) else {
            return None;
        };
        let (fields, mut note) = items.iter_mut().find_map(|item| {
            let note = Note::deserialize(&*item).ok().filter(|n| n.id == id)?;
            match item {
                Value::Object(fields) => Some((fields, note)),
                _ => None,
            }
        })?;

        edit(&mut note);
        fields.insert("content".to_string(), Value::String(note.content.clone()));
        fields.insert("ts".to_string(), Value::from(note.timestamp));
        Some(note)
    }

    /// Drop every element of `domain`'s list whose `id` is `id`. Returns
    /// whether anything was removed.
    pub fn remove_note(&mut self, domain: &str, id: &str) -> bool {
        let Some(Value::Array(items)) = self.entries.get_mut(domain) else {
            return false;
        };
        let before = items.len();
        items.retain(|item| item.get("id").and_then(Value::as_str) != Some(id));
        items.len() != before
    }

    /// Remove the entry for `domain`. Returns whether it existed.
    pub fn remove_domain(&mut self, domain: &str) -> bool {
        self.entries.remove(domain).is_some()
    }

    /// Domains holding at least one note, sorted.
    pub fn domains(&self) -> Vec<String> {
        let mut domains: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, v)| matches!(v, Value::Array(items) if !items.is_empty()))
            .map(|(k, _)| k.clone())
            .collect();
        domains.sort();
        domains
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render epoch milliseconds in local time using a `strftime` layout.
///
/// Falls back to the raw number for timestamps chrono cannot represent, and
/// to [`DEFAULT_TIMESTAMP_FORMAT`] when `format` is not a valid layout.
pub fn format_timestamp(millis: i64, format: &str) -> String {
    let Some(dt) = Local.timestamp_millis_opt(millis).single() else {
        return millis.to_string();
    };
    let mut out = String::new();
    if write!(out, "{}", dt.format(format)).is_ok() {
        return out;
    }
    tracing::warn!(format, "invalid timestamp layout, using the default");
    dt.format(DEFAULT_TIMESTAMP_FORMAT).to_string()
}

/// Whether `format` parses as a `strftime` layout chrono can render.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Whether `name` looks like a hostname notes can be filed under.
pub fn is_valid_domain(name: &str) -> bool {
    name.len() <= MAX_DOMAIN_LENGTH && DOMAIN_PATTERN.is_match(name)
}

/// Shorten `text` to at most `max_chars` characters for one-line display.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head.trim())
}
