use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Invalid note content: {0}")]
    InvalidContent(String),

    #[error("Rate limit exceeded for '{key}', try again shortly")]
    RateLimited { key: String },

    #[error("Note not found: {id} (domain {domain})")]
    NotFound { domain: String, id: String },

    #[error("No notes to export for {domain}")]
    NothingToExport { domain: String },

    #[error("Invalid domain name: {0}")]
    InvalidDomain(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NotesError>;
