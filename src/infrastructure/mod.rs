//! Infrastructure layer - External I/O and persistence

pub mod editor;
pub mod paths;
pub mod picker;
pub mod preferences;
pub mod store;

pub use editor::EditorSession;
pub use paths::AppPaths;
pub use picker::{DocumentPicker, PathPicker, Picked};
pub use preferences::{LegacyDraft, Preferences};
pub use store::NoteStore;
