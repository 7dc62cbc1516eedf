use super::backend::StorageBackend;
use crate::error::{NotesError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-backed storage: one JSON object on disk, one property per key.
///
/// ```text
/// store.json
/// { "notesByDomain": { "example.com": [ ... ] } }
/// ```
///
/// Writes go to a temporary sibling file that is then renamed over the
/// target, so a crash or a failed write never leaves a half-written store.
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path).map_err(NotesError::Io)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&content).map_err(NotesError::Serialization)? {
            Value::Object(map) => Ok(map),
            _ => Err(NotesError::Store(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    fn ensure_parent(&self) -> Result<PathBuf> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.exists() {
            fs::create_dir_all(&parent).map_err(NotesError::Io)?;
        }
        Ok(parent)
    }
}

impl StorageBackend for FsBackend {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut all = self.load_all()?;
        Ok(all.remove(key))
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let mut all = self.load_all()?;
        all.insert(key.to_string(), value.clone());

        let parent = self.ensure_parent()?;
        let content = serde_json::to_string_pretty(&Value::Object(all))
            .map_err(NotesError::Serialization)?;

        let tmp_path = parent.join(format!(".sitenotes-{}.tmp", Uuid::new_v4()));
        write_atomically(&tmp_path, &self.path, &content).map_err(NotesError::Io)?;

        tracing::trace!(path = %self.path.display(), key, "store file written");
        Ok(())
    }
}

/// Write `content` to `tmp_path`, then rename it over `target`. On any
/// failure the temporary file is removed, whether the write stopped partway
/// or the rename was refused.
fn write_atomically(tmp_path: &Path, target: &Path, content: &str) -> io::Result<()> {
    let result = fs::write(tmp_path, content).and_then(|_| fs::rename(tmp_path, target));
    if result.is_err() {
        let _ = fs::remove_file(tmp_path);
    }
    result
}
