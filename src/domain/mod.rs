//! Domain layer - Note model and preference values

pub mod filename;
pub mod nav;
pub mod note;
pub mod prefs;

pub use filename::{
    backup_filename, date_from_filename, format_timestamp, generate_filename, parse_timestamp,
};
pub use nav::NavState;
pub use note::{title_from_text, CrossRef, Note, NoteContents, NoteMetadata, UNSAVED_ID};
pub use prefs::{ColorScheme, FilenameFormat, FontSize, FontType, SortOrder};
