//! notepad - Plain-text notes kept in a local SQLite database
//!
//! Notes are stored with an optional unsaved draft, can be imported from and
//! exported to text files, backed up as JSON, and migrated from the old
//! one-file-per-note layout.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use error::NotepadError;
