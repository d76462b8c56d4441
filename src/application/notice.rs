//! Short confirmations shown to the user after an action

use std::fmt;

/// Transient, non-blocking message about the outcome of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoteSaved { id: i64 },
    DraftSaved { id: i64 },
    DraftRestored { id: i64 },
    DraftDiscarded,
    /// Saving was refused because there was no text
    EmptyNote,
    NoteDeleted,
    NotesDeleted(usize),
    NotesImported(usize),
    NoteExported,
    NotesExported(usize),
    BackupExported(usize),
    BackupRestored(usize),
    ExportCancelled,
    NothingSelected,
    MigrationComplete(usize),
}

impl Notice {
    /// Note the message refers to, when there is exactly one
    pub fn note_id(&self) -> Option<i64> {
        match self {
            Notice::NoteSaved { id } | Notice::DraftSaved { id } | Notice::DraftRestored { id } => {
                Some(*id)
            }
            _ => None,
        }
    }

    /// Pick the single or plural deletion message
    pub fn deleted(count: usize) -> Notice {
        match count {
            1 => Notice::NoteDeleted,
            n => Notice::NotesDeleted(n),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "note"
    } else {
        "notes"
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoteSaved { .. } => write!(f, "Note saved"),
            Notice::DraftSaved { .. } => write!(f, "Draft saved"),
            Notice::DraftRestored { .. } => write!(f, "Draft restored"),
            Notice::DraftDiscarded => write!(f, "Draft discarded"),
            Notice::EmptyNote => write!(f, "Note is empty, nothing saved"),
            Notice::NoteDeleted => write!(f, "Note deleted"),
            Notice::NotesDeleted(n) => write!(f, "{} {} deleted", n, plural(*n)),
            Notice::NotesImported(1) => write!(f, "Note imported successfully"),
            Notice::NotesImported(n) => write!(f, "{} {} imported successfully", n, plural(*n)),
            Notice::NoteExported => write!(f, "Note exported"),
            Notice::NotesExported(n) => write!(f, "{} {} exported", n, plural(*n)),
            Notice::BackupExported(n) => write!(f, "Backup of {} {} written", n, plural(*n)),
            Notice::BackupRestored(n) => write!(f, "{} {} restored from backup", n, plural(*n)),
            Notice::ExportCancelled => write!(f, "Export cancelled"),
            Notice::NothingSelected => write!(f, "No notes selected"),
            Notice::MigrationComplete(n) => {
                write!(f, "Migrated {} {} from the old format", n, plural(*n))
            }
        }
    }
}
