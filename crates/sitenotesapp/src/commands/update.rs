use crate::commands::{CmdMessage, CmdResult, DisplayNote};
use crate::error::Result;
use crate::store::{NoteStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &NoteStore<B>,
    domain: &str,
    id: &str,
    text: &str,
) -> Result<CmdResult> {
    let note = store.update(domain, id, text)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Note updated: {}", note.id)));
    Ok(result.with_affected_notes(vec![DisplayNote::from_note(
        &note,
        store.timestamp_format(),
    )]))
}
