//! Error types for notepad

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the notepad application
#[derive(Debug, Error)]
pub enum NotepadError {
    #[error("Note not found: {0}")]
    NoteNotFound(i64),

    #[error("Cannot save an empty note")]
    EmptyNote,

    #[error("Data directory unavailable: {0}")]
    DataDir(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid preference: {0}")]
    InvalidPreference(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Could not {0}; run with -v for details")]
    ActionFailed(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl NotepadError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            NotepadError::DataDir(_) => 2,
            NotepadError::NoteNotFound(_) => 3,
            NotepadError::EmptyNote => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            NotepadError::DataDir(path) => {
                format!(
                    "Data directory unavailable: {}\n\n\
                    Suggestions:\n\
                    • Pass --data-dir with a writable directory\n\
                    • Set NOTEPAD_HOME environment variable to your notes directory",
                    path.display()
                )
            }
            NotepadError::NoteNotFound(id) => {
                format!(
                    "Note not found: {}\n\n\
                    Suggestions:\n\
                    • Use 'notepad list' to see note ids\n\
                    • The note may have been deleted",
                    id
                )
            }
            NotepadError::Editor(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that your editor is installed and in PATH\n\
                    • Set EDITOR environment variable (e.g., export EDITOR=nano)",
                    msg
                )
            }
            NotepadError::InvalidPreference(msg) => {
                format!(
                    "Invalid preference: {}\n\n\
                    Use 'notepad config --list' to see keys and current values",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using NotepadError
pub type Result<T> = std::result::Result<T, NotepadError>;
