//! Note records as stored in the database and the aggregate the rest of the
//! application works with.

use chrono::{DateTime, TimeZone, Utc};

/// Id used by records that have not been persisted yet
pub const UNSAVED_ID: i64 = -1;

/// One row of the `NoteMetadata` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMetadata {
    pub metadata_id: i64,
    pub title: String,
    pub date: DateTime<Utc>,
    pub has_draft: bool,
}

impl Default for NoteMetadata {
    fn default() -> Self {
        NoteMetadata {
            metadata_id: UNSAVED_ID,
            title: String::new(),
            date: Utc::now(),
            has_draft: false,
        }
    }
}

/// One row of the `NoteContents` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContents {
    pub contents_id: i64,
    pub text: Option<String>,
    pub draft_text: Option<String>,
}

impl Default for NoteContents {
    fn default() -> Self {
        NoteContents {
            contents_id: UNSAVED_ID,
            text: None,
            draft_text: None,
        }
    }
}

/// Join row linking a metadata record to its contents record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossRef {
    pub metadata_id: i64,
    pub contents_id: i64,
}

/// A metadata row together with its linked contents row.
///
/// `Note::default()` is the unsaved note shown when nothing is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub metadata: NoteMetadata,
    pub contents: NoteContents,
}

impl Note {
    pub fn new(metadata: NoteMetadata, contents: NoteContents) -> Self {
        Note { metadata, contents }
    }

    pub fn id(&self) -> i64 {
        self.metadata.metadata_id
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.metadata.date
    }

    /// Text to show: the draft if one exists, otherwise the saved text
    pub fn text(&self) -> &str {
        self.contents
            .draft_text
            .as_deref()
            .or(self.contents.text.as_deref())
            .unwrap_or("")
    }

    /// Last saved text, ignoring any draft
    pub fn saved_text(&self) -> &str {
        self.contents.text.as_deref().unwrap_or("")
    }

    pub fn draft_text(&self) -> &str {
        self.contents.draft_text.as_deref().unwrap_or("")
    }

    pub fn is_saved(&self) -> bool {
        self.id() != UNSAVED_ID
    }
}

/// Derive a note title: everything before the first newline
pub fn title_from_text(text: &str) -> &str {
    text.split('\n').next().unwrap_or("").trim_end_matches('\r')
}

/// Convert stored epoch milliseconds back into a timestamp
pub fn date_from_millis(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_first_line() {
        assert_eq!(title_from_text("Shopping\nmilk\neggs"), "Shopping");
        assert_eq!(title_from_text("single line"), "single line");
        assert_eq!(title_from_text("windows\r\nline"), "windows");
        assert_eq!(title_from_text(""), "");
        assert_eq!(title_from_text("\nsecond"), "");
    }

    #[test]
    fn test_default_note_is_unsaved() {
        let note = Note::default();
        assert_eq!(note.id(), UNSAVED_ID);
        assert_eq!(note.contents.contents_id, UNSAVED_ID);
        assert!(!note.is_saved());
        assert_eq!(note.text(), "");
    }

    #[test]
    fn test_text_prefers_draft() {
        let note = Note::new(
            NoteMetadata::default(),
            NoteContents {
                contents_id: 3,
                text: Some("saved".to_string()),
                draft_text: Some("draft".to_string()),
            },
        );
        assert_eq!(note.text(), "draft");
        assert_eq!(note.saved_text(), "saved");
        assert_eq!(note.draft_text(), "draft");
    }

    #[test]
    fn test_text_falls_back_to_saved() {
        let note = Note::new(
            NoteMetadata::default(),
            NoteContents {
                contents_id: 3,
                text: Some("saved".to_string()),
                draft_text: None,
            },
        );
        assert_eq!(note.text(), "saved");
        assert_eq!(note.draft_text(), "");
    }

    #[test]
    fn test_date_from_millis() {
        let date = date_from_millis(1_625_000_000_000);
        assert_eq!(date.timestamp_millis(), 1_625_000_000_000);
    }
}
