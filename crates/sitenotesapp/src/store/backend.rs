use crate::error::Result;
use serde_json::Value;
use std::sync::Arc;

/// Abstract interface for the key-value persistence layer.
///
/// This is the whole contract the note store relies on: whole-value reads and
/// writes keyed by string. There is no compare-and-swap and no partial update,
/// which is why [`NoteStore`](super::note_store::NoteStore) has to read the
/// entire map, change one domain, and write the entire map back.
///
/// Implementations must be shareable between threads so that several stores
/// (one per execution context) can sit on top of the same backend.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`.
    /// Returns Ok(None) if nothing has been stored yet.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`.
    /// A failed write MUST leave the previous value intact.
    fn set(&self, key: &str, value: &Value) -> Result<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Arc<B> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        (**self).set(key, value)
    }
}
