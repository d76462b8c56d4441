//! Note editing session: current note, draft buffer, selection, and the
//! user-facing actions built on top of the store.
//!
//! Actions return `Option<Notice>`. Storage failures are logged and the
//! action becomes a no-op returning `None`.

use crate::application::import_export::{ExportOutcome, ImportExporter, ImportOutcome};
use crate::application::notice::Notice;
use crate::domain::{FilenameFormat, NavState, Note, NoteMetadata, SortOrder, UNSAVED_ID};
use crate::error::{NotepadError, Result};
use crate::infrastructure::{DocumentPicker, NoteStore};
use chrono::Utc;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::watch;

pub struct NoteService {
    store: NoteStore,
    note: Note,
    draft: String,
    nav: NavState,
    sort_order: SortOrder,
    selected: HashMap<i64, bool>,
    selection_tx: watch::Sender<BTreeSet<i64>>,
    found: HashMap<i64, bool>,
    found_tx: watch::Sender<BTreeSet<i64>>,
}

impl NoteService {
    pub fn new(store: NoteStore, sort_order: SortOrder) -> Self {
        let (selection_tx, _) = watch::channel(BTreeSet::new());
        let (found_tx, _) = watch::channel(BTreeSet::new());
        NoteService {
            store,
            note: Note::default(),
            draft: String::new(),
            nav: NavState::Empty,
            sort_order,
            selected: HashMap::new(),
            selection_tx,
            found: HashMap::new(),
            found_tx,
        }
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn nav(&self) -> NavState {
        self.nav
    }

    pub fn draft_text(&self) -> &str {
        &self.draft
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    /// Load a note, or reset to the blank unsaved note for `None`
    pub fn load_note(&mut self, id: Option<i64>) -> Result<&Note> {
        match id {
            Some(id) => {
                let note = self.store.get_note(id)?.ok_or(NotepadError::NoteNotFound(id))?;
                self.draft = note.text().to_string();
                self.note = note;
                self.nav = NavState::View(id);
            }
            None => {
                self.note = Note::default();
                self.draft.clear();
                self.nav = NavState::Empty;
            }
        }
        Ok(&self.note)
    }

    pub fn begin_edit(&mut self) {
        self.nav = NavState::Edit(self.note.is_saved().then(|| self.note.id()));
        self.draft = self.note.text().to_string();
    }

    pub fn end_edit(&mut self) {
        self.nav = self.nav.leave_edit();
    }

    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Persist `text` as the current note's saved text
    pub fn save_note(&mut self, text: &str) -> Option<Notice> {
        if text.is_empty() {
            return Some(Notice::EmptyNote);
        }

        let id = logged(
            "save note",
            self.store.save_note(self.note.id(), text, Utc::now(), None),
        )?;
        self.reload(id)?;
        self.draft.clear();
        self.nav = match self.nav {
            NavState::Edit(_) => NavState::Edit(Some(id)),
            NavState::Empty | NavState::View(_) => NavState::View(id),
        };

        tracing::info!(id, "note saved");
        Some(Notice::NoteSaved { id })
    }

    /// Store the edit buffer as a draft of the current note.
    ///
    /// Does nothing outside an edit session or with an empty buffer.
    pub fn save_draft(&mut self) -> Option<Notice> {
        if !self.nav.is_editing() || self.draft.is_empty() {
            return None;
        }
        if self.draft == self.note.saved_text() {
            return Some(Notice::DraftSaved { id: self.note.id() });
        }

        let saved_text = self.note.saved_text().to_string();
        let id = logged(
            "save draft",
            self.store.save_note(
                self.note.id(),
                &saved_text,
                self.note.date(),
                Some(self.draft.as_str()),
            ),
        )?;
        self.reload(id)?;
        self.nav = NavState::Edit(Some(id));

        tracing::debug!(id, "draft saved");
        Some(Notice::DraftSaved { id })
    }

    /// Drop the current note's draft. A note that only ever existed as a
    /// draft is deleted.
    pub fn discard_draft(&mut self) -> Option<Notice> {
        if !self.note.is_saved() {
            self.draft.clear();
            return None;
        }

        let id = self.note.id();
        if self.note.saved_text().is_empty() {
            logged("delete draft note", self.store.delete_note(id))?;
            self.reset();
        } else {
            let text = self.note.saved_text().to_string();
            logged(
                "discard draft",
                self.store.save_note(id, &text, self.note.date(), None),
            )?;
            self.reload(id)?;
            self.draft = self.note.text().to_string();
        }

        tracing::debug!(id, "draft discarded");
        Some(Notice::DraftDiscarded)
    }

    /// Reopen a note left with a draft, straight into edit mode
    pub fn restore_draft(&mut self) -> Option<Notice> {
        let id = logged("find saved draft", self.store.saved_draft_id())??;
        self.reload(id)?;
        self.nav = NavState::Edit(Some(id));
        self.draft = self.note.text().to_string();
        Some(Notice::DraftRestored { id })
    }

    pub fn delete_note(&mut self, id: i64) -> Option<Notice> {
        if !logged("delete note", self.store.delete_note(id))? {
            tracing::warn!(id, "no note to delete");
            return None;
        }
        self.forget(&[id]);
        Some(Notice::NoteDeleted)
    }

    pub fn delete_selected(&mut self) -> Option<Notice> {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return Some(Notice::NothingSelected);
        }

        let deleted = logged("delete notes", self.store.delete_notes(&ids))?;
        self.forget(&ids);
        self.clear_selected();
        Some(Notice::deleted(deleted))
    }

    pub fn toggle_selected(&mut self, id: i64) {
        let entry = self.selected.entry(id).or_insert(false);
        *entry = !*entry;
        self.publish_selection();
    }

    pub fn clear_selected(&mut self) {
        self.selected.clear();
        self.publish_selection();
    }

    pub fn select_all(&mut self, notes: &[NoteMetadata]) {
        self.selected = notes.iter().map(|m| (m.metadata_id, true)).collect();
        self.publish_selection();
    }

    /// Selected ids in ascending order
    pub fn selected_ids(&self) -> Vec<i64> {
        self.selection().into_iter().collect()
    }

    /// Receiver that always holds the latest selection
    pub fn subscribe_selection(&self) -> watch::Receiver<BTreeSet<i64>> {
        self.selection_tx.subscribe()
    }

    /// All notes in the configured sort order; empty on storage error
    pub fn note_metadata(&self) -> Vec<NoteMetadata> {
        logged("list notes", self.store.note_metadata(self.sort_order)).unwrap_or_default()
    }

    /// Keep the notes whose text contains `term`, ignoring case.
    ///
    /// The text searched is what the user sees: the draft when there is one.
    /// An empty term finds every note. The found ids are broadcast like the
    /// selection; on storage error nothing is found.
    pub fn search(&mut self, notes: &[NoteMetadata], term: &str) -> Vec<NoteMetadata> {
        self.found = notes.iter().map(|m| (m.metadata_id, true)).collect();

        if !term.is_empty() {
            let needle = term.to_lowercase();
            let ids: Vec<i64> = notes.iter().map(|m| m.metadata_id).collect();
            match logged("search notes", self.store.get_notes(&ids)) {
                Some(loaded) => {
                    for note in loaded {
                        if !note.text().to_lowercase().contains(&needle) {
                            self.found.insert(note.id(), false);
                        }
                    }
                }
                None => self.found.clear(),
            }
        }

        let found = flagged(&self.found);
        self.found_tx.send_replace(found.clone());
        notes
            .iter()
            .filter(|m| found.contains(&m.metadata_id))
            .cloned()
            .collect()
    }

    /// Receiver that always holds the ids matched by the latest search
    pub fn subscribe_found(&self) -> watch::Receiver<BTreeSet<i64>> {
        self.found_tx.subscribe()
    }

    pub fn import_notes(&mut self, picker: &mut dyn DocumentPicker) -> Option<Notice> {
        let store = &mut self.store;
        let mut saved = 0;

        let outcome = ImportExporter::new(picker).import_notes(|text, date| {
            if logged("import note", store.save_note(UNSAVED_ID, &text, date, None)).is_some() {
                saved += 1;
            }
        });

        match outcome {
            ImportOutcome::Imported { failed, .. } => {
                if failed > 0 {
                    tracing::warn!(saved, failed, "some files could not be imported");
                }
                Some(Notice::NotesImported(saved))
            }
            ImportOutcome::Cancelled => None,
        }
    }

    /// Export the selected notes. A single note goes to a file created
    /// through the picker; several go to their own files in a picked directory.
    pub fn export_selected(
        &mut self,
        picker: &mut dyn DocumentPicker,
        format: FilenameFormat,
    ) -> Option<Notice> {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return Some(Notice::NothingSelected);
        }

        let notes = logged("load notes for export", self.store.get_notes(&ids))?;
        if let [note] = notes.as_slice() {
            let outcome = logged(
                "export note",
                ImportExporter::new(picker).export_note(note, format),
            )?;
            return match outcome {
                ExportOutcome::Exported { .. } => {
                    self.clear_selected();
                    Some(Notice::NoteExported)
                }
                ExportOutcome::Cancelled => Some(Notice::ExportCancelled),
            };
        }

        let outcome = ImportExporter::new(picker).export_notes(&notes, format, || {
            tracing::info!(count = ids.len(), "export cancelled");
        });

        match outcome {
            ExportOutcome::Exported { written, failed } => {
                if failed > 0 {
                    tracing::warn!(written, failed, "some notes could not be exported");
                }
                self.clear_selected();
                Some(Notice::NotesExported(written))
            }
            ExportOutcome::Cancelled => Some(Notice::ExportCancelled),
        }
    }

    /// Export the loaded note to one file
    pub fn export_current(
        &mut self,
        picker: &mut dyn DocumentPicker,
        format: FilenameFormat,
    ) -> Option<Notice> {
        if !self.note.is_saved() {
            return None;
        }

        let outcome = logged(
            "export note",
            ImportExporter::new(picker).export_note(&self.note, format),
        )?;
        match outcome {
            ExportOutcome::Exported { .. } => Some(Notice::NoteExported),
            ExportOutcome::Cancelled => Some(Notice::ExportCancelled),
        }
    }

    /// Write every note into one JSON backup
    pub fn backup(&mut self, picker: &mut dyn DocumentPicker) -> Option<Notice> {
        let ids: Vec<i64> = self
            .note_metadata()
            .iter()
            .map(|m| m.metadata_id)
            .collect();
        let notes = logged("load notes for backup", self.store.get_notes(&ids))?;

        let outcome = logged(
            "write backup",
            ImportExporter::new(picker).export_backup(&notes, Utc::now()),
        )?;
        match outcome {
            ExportOutcome::Exported { written, .. } => Some(Notice::BackupExported(written)),
            ExportOutcome::Cancelled => Some(Notice::ExportCancelled),
        }
    }

    /// Add the notes from JSON backups as new notes.
    ///
    /// Unreadable backup files are skipped; the notice counts the notes
    /// actually stored. `None` when every picked file was unreadable.
    pub fn restore(&mut self, picker: &mut dyn DocumentPicker) -> Option<Notice> {
        let store = &mut self.store;
        let mut saved = 0;

        let outcome = ImportExporter::new(picker).import_backup(|entry| {
            let date = entry.parsed_date();
            if logged(
                "restore note",
                store.save_note(UNSAVED_ID, &entry.text, date, None),
            )
            .is_some()
            {
                saved += 1;
            }
        });

        match outcome {
            ImportOutcome::Imported { imported, failed } => {
                if failed > 0 {
                    tracing::warn!(saved, failed, "some backup files could not be read");
                }
                if failed > 0 && imported == 0 {
                    return None;
                }
                Some(Notice::BackupRestored(saved))
            }
            ImportOutcome::Cancelled => None,
        }
    }

    fn reload(&mut self, id: i64) -> Option<()> {
        let note = logged("reload note", self.store.get_note(id))??;
        self.note = note;
        Some(())
    }

    fn reset(&mut self) {
        self.note = Note::default();
        self.draft.clear();
        self.nav = match self.nav {
            NavState::Edit(_) => NavState::Edit(None),
            NavState::Empty | NavState::View(_) => NavState::Empty,
        };
    }

    /// Drop deleted ids from the loaded note and the selection
    fn forget(&mut self, ids: &[i64]) {
        if ids.contains(&self.note.id()) {
            self.reset();
        }
        for id in ids {
            self.selected.remove(id);
        }
        self.publish_selection();
    }

    fn selection(&self) -> BTreeSet<i64> {
        flagged(&self.selected)
    }

    fn publish_selection(&self) {
        self.selection_tx.send_replace(self.selection());
    }
}

/// Ids whose flag is set
fn flagged(flags: &HashMap<i64, bool>) -> BTreeSet<i64> {
    flags
        .iter()
        .filter(|(_, set)| **set)
        .map(|(id, _)| *id)
        .collect()
}

fn logged<T>(action: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!("failed to {action}: {e}");
            None
        }
    }
}
