//! # API Facade
//!
//! The single entry point for every UI client (the CLI today, anything else
//! later). It is deliberately thin:
//!
//! - **Checks the domain** once per call ([`is_valid_domain`]), so commands
//!   and the store can assume a sane partition key
//! - **Dispatches** to the matching `commands::*` function
//! - **Returns structured types** (`Result<CmdResult>`), never strings for a terminal
//!
//! ## Generic Over StorageBackend
//!
//! `SiteNotesApi<B: StorageBackend>`:
//! - Production: `SiteNotesApi<FsBackend>` via [`SiteNotesApi::from_config`]
//! - Testing: `SiteNotesApi<MemBackend>`

use crate::commands::{self, CmdResult};
use crate::config::NotesConfig;
use crate::error::{NotesError, Result};
use crate::model::is_valid_domain;
use crate::store::fs_backend::FsBackend;
use crate::store::{NoteStore, StorageBackend};
use chrono::Utc;

pub struct SiteNotesApi<B: StorageBackend> {
    store: NoteStore<B>,
}

impl SiteNotesApi<FsBackend> {
    /// File-backed API wired from configuration.
    pub fn from_config(config: &NotesConfig) -> Result<Self> {
        let path = config.store_path()?;
        tracing::debug!(store = %path.display(), "opening note store");
        let store = NoteStore::with_backend(FsBackend::new(path))
            .with_rate_limit(config.rate_limit_per_minute)
            .with_timestamp_format(config.timestamp_format.clone());
        Ok(Self::new(store))
    }
}

impl<B: StorageBackend> SiteNotesApi<B> {
    pub fn new(store: NoteStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &NoteStore<B> {
        &self.store
    }

    pub fn list_notes(&self, domain: &str) -> Result<CmdResult> {
        check_domain(domain)?;
        commands::list::run(&self.store, domain)
    }

    pub fn search_notes(&self, domain: &str, term: &str) -> Result<CmdResult> {
        check_domain(domain)?;
        commands::list::search(&self.store, domain, term)
    }

    pub fn add_note(&self, domain: &str, text: &str) -> Result<CmdResult> {
        check_domain(domain)?;
        commands::add::run(&self.store, domain, text)
    }

    pub fn update_note(&self, domain: &str, id: &str, text: &str) -> Result<CmdResult> {
        check_domain(domain)?;
        commands::update::run(&self.store, domain, id, text)
    }

    pub fn delete_note(&self, domain: &str, id: &str) -> Result<CmdResult> {
        check_domain(domain)?;
        commands::delete::run(&self.store, domain, id)
    }

    pub fn clear_domain(&self, domain: &str) -> Result<CmdResult> {
        check_domain(domain)?;
        commands::delete::clear(&self.store, domain)
    }

    pub fn export_notes(&self, domain: &str) -> Result<CmdResult> {
        check_domain(domain)?;
        commands::export::run(&self.store, domain, Utc::now())
    }

    pub fn domains(&self) -> Result<CmdResult> {
        commands::list::domains(&self.store)
    }
}

fn check_domain(domain: &str) -> Result<()> {
    if is_valid_domain(domain) {
        Ok(())
    } else {
        Err(NotesError::InvalidDomain(domain.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn make_api() -> SiteNotesApi<MemBackend> {
        SiteNotesApi::new(NoteStore::with_backend(MemBackend::new()))
    }

    #[test]
    fn rejects_invalid_domain_before_store_access() {
        let api = make_api();
        for bad in ["", "-bad.com", "has space.com", "trailing."] {
            assert!(
                matches!(api.add_note(bad, "x"), Err(NotesError::InvalidDomain(_))),
                "domain {bad:?} should be rejected"
            );
        }
        assert_eq!(api.store().backend().write_count(), 0);
    }

    #[test]
    fn full_lifecycle() {
        let api = make_api();
        let id = api.add_note("example.com", "draft").unwrap().affected_notes[0]
            .id
            .clone();

        api.update_note("example.com", &id, "final").unwrap();
        let listed = api.list_notes("example.com").unwrap().listed_notes;
        assert_eq!(listed[0].text, "final");

        let hits = api.search_notes("example.com", "FIN").unwrap().listed_notes;
        assert_eq!(hits.len(), 1);

        let export = api.export_notes("example.com").unwrap().export.unwrap();
        assert!(export.json.contains("\"final\""));

        api.delete_note("example.com", &id).unwrap();
        assert!(api.list_notes("example.com").unwrap().listed_notes.is_empty());
        assert!(api.domains().unwrap().domains.is_empty());
    }

    #[test]
    fn clear_domain_dispatches() {
        let api = make_api();
        api.add_note("example.com", "a").unwrap();
        api.clear_domain("example.com").unwrap();
        assert!(api.list_notes("example.com").unwrap().listed_notes.is_empty());
    }
}
