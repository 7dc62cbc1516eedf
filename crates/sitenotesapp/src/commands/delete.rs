use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{NoteStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &NoteStore<B>, domain: &str, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if store.delete(domain, id)? {
        result.add_message(CmdMessage::success(format!("Note deleted: {}", id)));
    } else {
        result.add_message(CmdMessage::info(format!(
            "No note {} on {}, nothing deleted",
            id, domain
        )));
    }
    Ok(result)
}

pub fn clear<B: StorageBackend>(store: &NoteStore<B>, domain: &str) -> Result<CmdResult> {
    let removed = store.clear(domain)?;
    let mut result = CmdResult::default();
    if removed == 0 {
        result.add_message(CmdMessage::info(format!("No notes for {}", domain)));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Deleted {} note{} for {}",
            removed,
            if removed == 1 { "" } else { "s" },
            domain
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, list, MessageLevel};
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn deletes_existing_note() {
        let store = NoteStore::with_backend(MemBackend::new());
        let id = add::run(&store, "example.com", "bye").unwrap().affected_notes[0]
            .id
            .clone();

        let result = run(&store, "example.com", &id).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert!(list::run(&store, "example.com").unwrap().listed_notes.is_empty());
    }

    #[test]
    fn missing_note_is_info_not_error() {
        let store = NoteStore::with_backend(MemBackend::new());
        let result = run(&store, "example.com", "nonexistent-id").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn clear_reports_count() {
        let store = NoteStore::with_backend(MemBackend::new());
        add::run(&store, "example.com", "a").unwrap();
        add::run(&store, "example.com", "b").unwrap();

        let result = clear(&store, "example.com").unwrap();
        assert_eq!(result.messages[0].content, "Deleted 2 notes for example.com");

        let again = clear(&store, "example.com").unwrap();
        assert_eq!(again.messages[0].level, MessageLevel::Info);
    }
}
