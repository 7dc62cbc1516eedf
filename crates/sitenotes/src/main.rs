//! # Sitenotes CLI
//!
//! The `sitenotes` binary is one client of the `sitenotesapp` library. This
//! file only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/sitenotes/src/cli/)                      │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering (render.rs, styles.rs)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/sitenotesapp/src/api.rs)                 │
//! │  - Checks domain names, dispatches to commands              │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI owns argument
//! parsing, configuration loading, logging setup, file writes for exports,
//! rendering, and exit codes.
//!
//! ## Testing Approach
//!
//! - **Library**: unit and integration tests in `crates/sitenotesapp`.
//! - **Rendering**: unit tests in `render.rs` over canned `DisplayNote`s.
//! - **End to end**: `tests/cli_e2e.rs` drives the built binary against a
//!   temporary store file.

mod cli;
mod logging;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
