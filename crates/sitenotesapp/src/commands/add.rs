use crate::commands::{CmdMessage, CmdResult, DisplayNote};
use crate::error::Result;
use crate::model::{truncate_preview, DEFAULT_PREVIEW_LENGTH};
use crate::store::{NoteStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &NoteStore<B>, domain: &str, text: &str) -> Result<CmdResult> {
    let note = store.add(domain, text)?;
    let display = DisplayNote::from_note(&note, store.timestamp_format());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Note added to {}: {}",
        domain,
        truncate_preview(&display.text, DEFAULT_PREVIEW_LENGTH)
    )));
    Ok(result.with_affected_notes(vec![display]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::list;
    use crate::commands::MessageLevel;
    use crate::error::NotesError;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn creates_note_and_reports_it() {
        let store = NoteStore::with_backend(MemBackend::new());
        let result = run(&store, "example.com", "hello").unwrap();

        assert_eq!(result.affected_notes.len(), 1);
        assert_eq!(result.affected_notes[0].text, "hello");
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert!(result.messages[0].content.contains("example.com"));

        let listed = list::run(&store, "example.com").unwrap().listed_notes;
        assert_eq!(listed, result.affected_notes);
    }

    #[test]
    fn propagates_validation_errors() {
        let store = NoteStore::with_backend(MemBackend::new());
        assert!(matches!(
            run(&store, "example.com", ""),
            Err(NotesError::InvalidContent(_))
        ));
    }
}
