use super::backend::StorageBackend;
use crate::codec;
use crate::error::{NotesError, Result};
use crate::model::{now_millis, DomainNoteMap, Note, DEFAULT_TIMESTAMP_FORMAT, NOTES_KEY};
use crate::rate_limit::{RateLimiter, DEFAULT_MAX_PER_MINUTE};

/// The note repository: domain-scoped CRUD over a [`StorageBackend`].
///
/// Holds no notes between calls. Each operation reads the full
/// [`DomainNoteMap`] from the backend, changes one domain's entry, and writes
/// the full map back. Validation and rate-limit checks run before the first
/// backend call, so a refused operation never touches storage.
pub struct NoteStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    limiter: RateLimiter,
    max_per_minute: usize,
    timestamp_format: String,
}

impl<B: StorageBackend> NoteStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            limiter: RateLimiter::new(),
            max_per_minute: DEFAULT_MAX_PER_MINUTE,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    /// Per-key budget for mutating calls.
    pub fn with_rate_limit(mut self, max_per_minute: usize) -> Self {
        self.max_per_minute = max_per_minute;
        self
    }

    /// Layout used when searching formatted timestamps.
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn load(&self) -> Result<DomainNoteMap> {
        let value = self.backend.get(NOTES_KEY)?;
        Ok(DomainNoteMap::from_value(value))
    }

    fn save(&self, map: DomainNoteMap) -> Result<()> {
        self.backend.set(NOTES_KEY, &map.into_value())
    }

    fn check_rate(&self, operation: &str, domain: &str) -> Result<()> {
        let key = format!("{}:{}", operation, domain);
        if self.limiter.can_perform(&key, self.max_per_minute) {
            Ok(())
        } else {
            tracing::warn!(key = %key, limit = self.max_per_minute, "rate limit exceeded");
            Err(NotesError::RateLimited { key })
        }
    }

    /// Notes for `domain`, newest first. Empty if the domain has none.
    pub fn list(&self, domain: &str) -> Result<Vec<Note>> {
        let notes = self.load()?.notes(domain);
        tracing::debug!(domain, count = notes.len(), "listed notes");
        Ok(notes)
    }

    /// Look up a single note by id.
    pub fn get(&self, domain: &str, id: &str) -> Result<Note> {
        self.list(domain)?
            .into_iter()
            .find(|n| n.id == id)
            .ok_or_else(|| NotesError::NotFound {
                domain: domain.to_string(),
                id: id.to_string(),
            })
    }

    /// Validate, encode, and prepend a new note.
    pub fn add(&self, domain: &str, plain_text: &str) -> Result<Note> {
        let text = codec::validate(plain_text)?;
        self.check_rate("add", domain)?;

        let note = Note::new(&text);

        let mut map = self.load()?;
        map.prepend_note(domain, &note)?;
        self.save(map)?;

        tracing::debug!(domain, id = %note.id, "note added");
        Ok(note)
    }

    /// Replace a note's content in place. The id and list position are kept.
    pub fn update(&self, domain: &str, id: &str, new_plain_text: &str) -> Result<Note> {
        let text = codec::validate(new_plain_text)?;
        self.check_rate("update", domain)?;

        let mut map = self.load()?;
        let updated = map
            .update_note(domain, id, |note| {
                note.content = codec::encode(&text);
                // Strictly later than the previous edit even within one millisecond.
                note.timestamp = now_millis().max(note.timestamp.saturating_add(1));
            })
            .ok_or_else(|| NotesError::NotFound {
                domain: domain.to_string(),
                id: id.to_string(),
            })?;
        self.save(map)?;

        tracing::debug!(domain, id, "note updated");
        Ok(updated)
    }

    /// Remove a note. Deleting an id that does not exist is a no-op, not an
    /// error; the return value says whether anything was removed.
    pub fn delete(&self, domain: &str, id: &str) -> Result<bool> {
        self.check_rate("delete", domain)?;

        let mut map = self.load()?;
        if !map.remove_note(domain, id) {
            tracing::debug!(domain, id, "delete of unknown note ignored");
            return Ok(false);
        }
        self.save(map)?;

        tracing::debug!(domain, id, "note deleted");
        Ok(true)
    }

    /// Remove every note for `domain`. Returns how many were removed.
    pub fn clear(&self, domain: &str) -> Result<usize> {
        self.check_rate("delete", domain)?;

        let mut map = self.load()?;
        let removed = map.notes(domain).len();
        if !map.remove_domain(domain) {
            return Ok(0);
        }
        self.save(map)?;

        tracing::debug!(domain, removed, "domain cleared");
        Ok(removed)
    }

    /// Case-insensitive match on decoded content or formatted timestamp.
    /// A blank term returns the whole list.
    pub fn search(&self, domain: &str, term: &str) -> Result<Vec<Note>> {
        let notes = self.list(domain)?;
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Ok(notes);
        }

        Ok(notes
            .into_iter()
            .filter(|note| {
                note.text().to_lowercase().contains(&term)
                    || note
                        .formatted_timestamp(&self.timestamp_format)
                        .to_lowercase()
                        .contains(&term)
            })
            .collect())
    }

    /// Domains that currently hold notes, sorted.
    pub fn domains(&self) -> Result<Vec<String>> {
        Ok(self.load()?.domains())
    }
}
