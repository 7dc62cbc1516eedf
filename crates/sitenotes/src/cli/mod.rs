//! Command-line client for sitenotes.
//!
//! ```text
//! sitenotes add example.com "coupon code SAVE10"
//! sitenotes list example.com
//! sitenotes search example.com coupon
//! sitenotes update example.com <id> "coupon expired"
//! sitenotes export example.com --output ~/backups
//! sitenotes domains
//! ```
//!
//! `add` and `update` read the note text from stdin when no words are given,
//! so `pbpaste | sitenotes add example.com` works.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup, dispatch, and per-command handlers
//! - `render`: Text output for note lists and domains
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling constants

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
