use crate::commands::{corruption_warning, display_notes, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{NoteStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &NoteStore<B>, domain: &str) -> Result<CmdResult> {
    let notes = store.list(domain)?;
    let mut result = CmdResult::default().with_listed_notes(display_notes(store, &notes));
    if notes.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No notes yet for {}. Add your first note!",
            domain
        )));
    }
    if let Some(warning) = corruption_warning(domain, &notes) {
        result.add_message(warning);
    }
    Ok(result)
}

pub fn search<B: StorageBackend>(
    store: &NoteStore<B>,
    domain: &str,
    term: &str,
) -> Result<CmdResult> {
    let notes = store.search(domain, term)?;
    let mut result = CmdResult::default().with_listed_notes(display_notes(store, &notes));
    if notes.is_empty() {
        result.add_message(CmdMessage::info("No notes match your search."));
    }
    if let Some(warning) = corruption_warning(domain, &notes) {
        result.add_message(warning);
    }
    Ok(result)
}

pub fn domains<B: StorageBackend>(store: &NoteStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult {
        domains: store.domains()?,
        ..Default::default()
    };
    if result.domains.is_empty() {
        result.add_message(CmdMessage::info("No notes stored yet."));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, MessageLevel};
    use crate::model::NOTES_KEY;
    use crate::store::mem_backend::MemBackend;
    use serde_json::json;

    fn store_with(notes: &[&str]) -> NoteStore<MemBackend> {
        let store = NoteStore::with_backend(MemBackend::new());
        for text in notes {
            add::run(&store, "example.com", text).unwrap();
        }
        store
    }

    #[test]
    fn lists_newest_first() {
        let store = store_with(&["first", "second"]);
        let listed = run(&store, "example.com").unwrap().listed_notes;
        let texts: Vec<&str> = listed.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[test]
    fn empty_list_has_hint() {
        let store = store_with(&[]);
        let result = run(&store, "example.com").unwrap();
        assert!(result.listed_notes.is_empty());
        assert!(result.messages[0].content.contains("No notes yet"));
    }

    #[test]
    fn search_filters() {
        let store = store_with(&["apple pie", "banana bread"]);
        let result = search(&store, "example.com", "apple").unwrap();
        assert_eq!(result.listed_notes.len(), 1);
        assert_eq!(result.listed_notes[0].text, "apple pie");
        assert!(result.messages.is_empty());

        let none = search(&store, "example.com", "cherry").unwrap();
        assert!(none.listed_notes.is_empty());
        assert_eq!(none.messages[0].content, "No notes match your search.");
    }

    #[test]
    fn domains_lists_known_hosts() {
        let store = store_with(&["x"]);
        add::run(&store, "docs.rs", "y").unwrap();
        let result = domains(&store).unwrap();
        assert_eq!(result.domains, vec!["docs.rs", "example.com"]);
    }

    #[test]
    fn corrupted_notes_raise_a_warning() {
        let store = store_with(&[]);
        store
            .backend()
            .set(
                NOTES_KEY,
                &json!({"example.com": [
                    {"id": "bad", "content": "%%%", "ts": 1},
                    {"id": "good", "content": "aGk=", "ts": 2}
                ]}),
            )
            .unwrap();

        let result = run(&store, "example.com").unwrap();
        assert_eq!(result.listed_notes.len(), 2);
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(
            result.messages[0].content,
            "1 note for example.com could not be decoded and is shown as [Corrupted note]"
        );

        let clean = store_with(&["fine"]);
        assert!(run(&clean, "example.com").unwrap().messages.is_empty());
    }
}
