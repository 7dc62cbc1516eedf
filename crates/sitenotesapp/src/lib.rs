//! # Sitenotes Architecture
//!
//! Sitenotes keeps short text notes filed under the web domain they were written
//! for. It is a **UI-agnostic library**: popups, in-page widgets, and the bundled
//! CLI are all thin clients of the same repository.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI Layer (the `sitenotes` CLI crate, or any other client)  │
//! │  - Parses input, renders output, owns terminal/file I/O     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, checks domain names           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Turns repository calls into CmdResult values             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - NoteStore: read-modify-write, codec, rate limiting       │
//! │  - StorageBackend: FsBackend (production), MemBackend       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Leaf modules used by the store: [`codec`] (encoding and validation),
//! [`id`] (note identifiers), [`rate_limit`] (per-key sliding window), and
//! [`export`] (portable JSON documents).
//!
//! ## Quick Start
//!
//! ```
//! use sitenotesapp::store::mem_backend::MemBackend;
//! use sitenotesapp::store::NoteStore;
//!
//! let store = NoteStore::with_backend(MemBackend::new());
//! let note = store.add("example.com", "remember the coupon code").unwrap();
//! let notes = store.list("example.com").unwrap();
//! assert_eq!(notes[0].id, note.id);
//! assert_eq!(notes[0].text(), "remember the coupon code");
//! ```
//!
//! ## Testing Strategy
//!
//! - **Leaf modules and the store**: unit tests next to the code, using
//!   `MemBackend` so nothing touches the filesystem.
//! - **Commands and API**: unit tests asserting on `CmdResult` contents.
//! - **`tests/`**: integration tests for the file backend and for behavior
//!   across several stores sharing one backend.

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod id;
pub mod model;
pub mod rate_limit;
pub mod store;
