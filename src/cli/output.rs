//! Output formatting utilities

use crate::domain::NoteMetadata;
use chrono::Local;

const UNTITLED: &str = "(untitled)";

/// Format note metadata for display, one note per line
pub fn format_note_list(notes: &[NoteMetadata]) -> String {
    if notes.is_empty() {
        return "No notes found".to_string();
    }

    let width = notes
        .iter()
        .map(|m| m.metadata_id.to_string().len())
        .max()
        .unwrap_or(1);

    let mut output = String::new();
    for meta in notes {
        let title = if meta.title.is_empty() {
            UNTITLED
        } else {
            &meta.title
        };
        output.push_str(&format!(
            "{:>width$}  {}  {}{}\n",
            meta.metadata_id,
            meta.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            title,
            if meta.has_draft { "  [draft]" } else { "" },
        ));
    }
    output
}

/// Format preferences as `key = value` lines
pub fn format_preferences(pairs: &[(&str, String)]) -> String {
    let mut output = String::new();
    for (key, value) in pairs {
        output.push_str(&format!("{} = {}\n", key, value));
    }
    output
}
