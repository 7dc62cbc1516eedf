use crate::commands::{corruption_warning, CmdMessage, CmdResult, ExportOutput};
use crate::error::Result;
use crate::export::{export_filename, to_document_at, to_json};
use crate::store::{NoteStore, StorageBackend};
use chrono::{DateTime, Utc};

/// Build the export for `domain`. Fails with `NothingToExport` when the
/// domain has no notes; the caller decides whether to show that.
pub fn run<B: StorageBackend>(
    store: &NoteStore<B>,
    domain: &str,
    exported_at: DateTime<Utc>,
) -> Result<CmdResult> {
    let notes = store.list(domain)?;
    let document = to_document_at(domain, &notes, store.timestamp_format(), exported_at)?;

    let output = ExportOutput {
        filename: export_filename(domain, exported_at),
        json: to_json(&document)?,
        note_count: document.notes.len(),
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} note{} for {}",
        output.note_count,
        if output.note_count == 1 { "" } else { "s" },
        domain
    )));
    if let Some(warning) = corruption_warning(domain, &notes) {
        result.add_message(warning);
    }
    result.export = Some(output);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::error::NotesError;
    use crate::export::ExportDocument;
    use crate::store::mem_backend::MemBackend;
    use chrono::TimeZone;

    #[test]
    fn exports_all_notes_for_domain() {
        let store = NoteStore::with_backend(MemBackend::new());
        add::run(&store, "example.com", "one").unwrap();
        add::run(&store, "example.com", "two").unwrap();
        add::run(&store, "elsewhere.org", "not me").unwrap();

        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let result = run(&store, "example.com", at).unwrap();
        let output = result.export.unwrap();

        assert_eq!(output.filename, "secure-notes-example.com-2026-01-02.json");
        assert_eq!(output.note_count, 2);

        let doc: ExportDocument = serde_json::from_str(&output.json).unwrap();
        assert_eq!(doc.domain, "example.com");
        assert_eq!(doc.export_date, "2026-01-02T03:04:05.000Z");
        let texts: Vec<&str> = doc.notes.iter().map(|n| n.content.as_str()).collect();
        assert_eq!(texts, vec!["two", "one"]);
    }

    #[test]
    fn empty_domain_is_nothing_to_export() {
        let store = NoteStore::with_backend(MemBackend::new());
        assert!(matches!(
            run(&store, "example.com", Utc::now()),
            Err(NotesError::NothingToExport { .. })
        ));
    }

    #[test]
    fn corrupted_notes_export_with_warning() {
        use crate::commands::MessageLevel;
        use crate::model::NOTES_KEY;

        let store = NoteStore::with_backend(MemBackend::new());
        store
            .backend()
            .set(
                NOTES_KEY,
                &serde_json::json!({"example.com": [{"id": "bad", "content": "%%%", "ts": 1}]}),
            )
            .unwrap();

        let result = run(&store, "example.com", Utc::now()).unwrap();
        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[1].level, MessageLevel::Warning);
        assert!(result.export.unwrap().json.contains("[Corrupted note]"));
    }
}
