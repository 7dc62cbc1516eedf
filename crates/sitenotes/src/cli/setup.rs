use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sitenotes",
    bin_name = "sitenotes",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Short notes filed under the website they belong to", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store file to use instead of the configured one
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub store: Option<PathBuf>,

    /// Config file to load instead of the default location
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose logging on stderr (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes for a domain, newest first
    #[command(alias = "ls", display_order = 1)]
    List {
        domain: String,

        /// Show full note text instead of a one-line preview
        #[arg(long)]
        full: bool,
    },

    /// Add a note (text from arguments, or stdin when omitted)
    #[command(alias = "n", display_order = 2)]
    Add {
        domain: String,

        /// Note text words (joined with spaces)
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Replace a note's text
    #[command(display_order = 3)]
    Update {
        domain: String,
        id: String,

        /// New text words (joined with spaces, or stdin when omitted)
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Delete a note
    #[command(alias = "rm", display_order = 4)]
    Delete { domain: String, id: String },

    /// Delete every note for a domain
    #[command(display_order = 5)]
    Clear {
        domain: String,

        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Search a domain's notes by text or displayed date
    #[command(display_order = 6)]
    Search {
        domain: String,

        /// Search words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Export a domain's notes as JSON
    #[command(display_order = 7)]
    Export {
        domain: String,

        /// Output file or directory; `-` for stdout. Defaults to the
        /// suggested file name in the current directory
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// List domains that have notes
    #[command(display_order = 8)]
    Domains,
}
