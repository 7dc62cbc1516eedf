//! # Storage Layer
//!
//! Storage is split in two:
//!
//! 1. **[`StorageBackend`]**: the "how". An opaque key-value store with
//!    whole-value `get`/`set`. Nothing else is assumed about it.
//! 2. **[`NoteStore`]**: the "what". The note repository that owns the
//!    read-modify-write protocol, validation, encoding, and rate limiting.
//!
//! ## Read-Modify-Write
//!
//! The backend has no atomic or partial updates, so every mutating call does:
//!
//! 1. `get("notesByDomain")`: the entire map.
//! 2. Change the caller's domain entry only.
//! 3. `set("notesByDomain", map)`: the entire map.
//!
//! The store never caches the map between calls, so it never serves stale data
//! to its own caller.
//!
//! ## Lost Updates
//!
//! Nothing serializes steps 1–3 across stores. Two stores over the same backend
//! (say, a popup and an in-page widget on the same site) can both read the map,
//! both prepend a note, and the later write wins: the other note is silently
//! dropped. This is the accepted behavior of the protocol. A single store never
//! races itself because its calls run to completion one at a time.
//!
//! Replacing the backend with one that offers compare-and-swap, or funnelling
//! all mutations through one owner, would close the gap; both would change
//! observable behavior under concurrency and are not done here.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: a single JSON file, atomically replaced on write.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! └── store.json     # { "notesByDomain": { "<domain>": [Note, ...] } }
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod note_store;

pub use backend::StorageBackend;
pub use note_store::NoteStore;
