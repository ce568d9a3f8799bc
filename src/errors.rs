//! Error types for the secnotes application.
//!
//! Validation failures (empty names, empty note fields) are not errors here:
//! the store declines those operations silently. Only conditions the caller
//! has to report end up in [`NotesError`].

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the secnotes application.
#[derive(Error, Debug)]
pub enum NotesError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The persisted document could not be decoded.
    #[error("Failed to decode workspace document: {0}")]
    Decode(#[from] serde_json::Error),

    /// Selection referenced a section that does not exist.
    #[error("Section not found: {id}")]
    SectionNotFound { id: u64 },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// file not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Input the terminal shell could not understand.
    #[error("{message}")]
    InvalidCommand { message: String },
}

impl NotesError {
    /// Whether this error came from reading a malformed workspace document.
    pub fn is_decode(&self) -> bool {
        matches!(self, NotesError::Decode(_))
    }
}
