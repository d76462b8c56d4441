//! One-time migration from the flat-file layout.
//!
//! Old versions kept each note in its own file named by its creation time in
//! epoch milliseconds, an unsaved note in a file called `draft`, and a single
//! combined `theme` preference. This moves all of that into the note store and
//! the structured preference keys, then leaves a marker so later runs skip the
//! file scan.

use crate::domain::note::date_from_millis;
use crate::domain::UNSAVED_ID;
use crate::error::Result;
use crate::infrastructure::{AppPaths, LegacyDraft, NoteStore, Preferences};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// File written into the legacy directory once every note has been moved
pub const MIGRATION_MARKER: &str = "migration_complete";

/// Legacy file holding an unsaved note
pub const LEGACY_DRAFT_NAME: &str = "draft";

fn timestamp_name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[0-9]+$").unwrap())
}

/// What a migration run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub notes_migrated: usize,
    /// Files left on disk because they could not be read or stored
    pub files_skipped: usize,
    pub preferences_migrated: bool,
    /// The marker was already present; no files were scanned
    pub already_complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegacyKind {
    Timestamp(i64),
    Draft,
}

#[derive(Debug, Clone)]
struct LegacyFile {
    path: PathBuf,
    kind: LegacyKind,
}

/// Moves legacy notes and preferences into their current homes
pub struct LegacyMigrator<'a> {
    store: &'a mut NoteStore,
    legacy_dir: PathBuf,
    preferences_path: PathBuf,
    remove_file: fn(&Path) -> io::Result<()>,
}

impl<'a> LegacyMigrator<'a> {
    pub fn new(store: &'a mut NoteStore, paths: &AppPaths) -> Self {
        LegacyMigrator {
            store,
            legacy_dir: paths.legacy_dir(),
            preferences_path: paths.preferences(),
            remove_file: |path| fs::remove_file(path),
        }
    }

    /// Run the migration. Safe to call on every start.
    pub fn migrate(&mut self) -> Result<MigrationReport> {
        let mut report = MigrationReport::default();
        let mut prefs = Preferences::load(&self.preferences_path)?;
        let mut prefs_changed = false;

        if self.marker_path().exists() {
            report.already_complete = true;
        } else {
            let draft = prefs.take_legacy_draft();
            prefs_changed |= draft.is_some();
            if let Some(deferred) = self.migrate_files(draft, &mut report)? {
                prefs.keep_legacy_draft(deferred);
            }
        }

        if prefs.migrate_theme() {
            report.preferences_migrated = true;
            prefs_changed = true;
        }

        if prefs_changed {
            prefs.save(&self.preferences_path)?;
        }

        if report.notes_migrated > 0 || report.preferences_migrated {
            tracing::info!(
                notes = report.notes_migrated,
                skipped = report.files_skipped,
                preferences = report.preferences_migrated,
                "legacy migration finished"
            );
        }
        Ok(report)
    }

    fn marker_path(&self) -> PathBuf {
        self.legacy_dir.join(MIGRATION_MARKER)
    }

    /// Move every legacy file into the store. Returns the legacy draft when
    /// the note it belongs to had to be left for a later run.
    fn migrate_files(
        &mut self,
        draft: Option<LegacyDraft>,
        report: &mut MigrationReport,
    ) -> Result<Option<LegacyDraft>> {
        let mut pending_draft = draft;
        let mut deferred_draft = None;

        if self.legacy_dir.is_dir() {
            for file in self.collect_legacy_files()? {
                let owns_draft = matches!(
                    (file.kind, &pending_draft),
                    (LegacyKind::Timestamp(ms), Some(draft)) if draft.note_name == Some(ms)
                );
                let owned_draft = if owns_draft {
                    pending_draft.take()
                } else {
                    None
                };
                let draft_text = owned_draft.as_ref().map(|d| d.text.as_str());

                match self.migrate_file(&file, draft_text) {
                    Ok(true) => report.notes_migrated += 1,
                    Ok(false) => {}
                    Err(e) => {
                        tracing::warn!("skipping legacy note {}: {e}", file.path.display());
                        report.files_skipped += 1;
                        deferred_draft = deferred_draft.or(owned_draft);
                    }
                }
            }
        }

        // A draft whose note no longer exists still carries text worth keeping
        if let Some(draft) = pending_draft {
            if !draft.text.is_empty() {
                self.store
                    .save_note(UNSAVED_ID, &draft.text, Utc::now(), Some(&draft.text))?;
                report.notes_migrated += 1;
            }
        }

        // Every file is stored and gone by now, so a rescan finds nothing to redo
        if report.files_skipped == 0 && self.legacy_dir.is_dir() {
            if let Err(e) = fs::write(self.marker_path(), "") {
                tracing::warn!("could not write migration marker: {e}");
            }
        }
        Ok(deferred_draft)
    }

    fn collect_legacy_files(&self) -> Result<Vec<LegacyFile>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.legacy_dir)? {
            let Ok(entry) = entry else {
                continue;
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(kind) = Self::classify(name) {
                files.push(LegacyFile { path, kind });
            }
        }

        // Oldest first so new ids follow creation order; the draft goes last
        files.sort_by_key(|file| match file.kind {
            LegacyKind::Timestamp(ms) => (0, ms),
            LegacyKind::Draft => (1, 0),
        });
        Ok(files)
    }

    fn classify(name: &str) -> Option<LegacyKind> {
        if name == LEGACY_DRAFT_NAME {
            return Some(LegacyKind::Draft);
        }
        if !timestamp_name_regex().is_match(name) {
            return None;
        }
        match name.parse::<i64>() {
            Ok(ms) => Some(LegacyKind::Timestamp(ms)),
            Err(_) => {
                tracing::warn!("ignoring legacy file with out-of-range name {name}");
                None
            }
        }
    }

    /// Store one legacy file and delete it. Returns false for empty files,
    /// which are removed without creating a note.
    ///
    /// A file that cannot be deleted is taken back out of the store and
    /// reported as an error, so it is migrated exactly once on a later run.
    fn migrate_file(&mut self, file: &LegacyFile, draft_text: Option<&str>) -> Result<bool> {
        let text = read_legacy_text(&file.path)?;

        if text.is_empty() && draft_text.is_none() {
            tracing::debug!("removing empty legacy note {}", file.path.display());
            if let Err(e) = (self.remove_file)(&file.path) {
                tracing::warn!("could not delete legacy file {}: {e}", file.path.display());
            }
            return Ok(false);
        }

        let (date, draft_text): (DateTime<Utc>, Option<&str>) = match file.kind {
            LegacyKind::Timestamp(ms) => (date_from_millis(ms), draft_text),
            LegacyKind::Draft => (Utc::now(), Some(text.as_str())),
        };

        let id = self.store.save_note(UNSAVED_ID, &text, date, draft_text)?;
        if let Err(e) = (self.remove_file)(&file.path) {
            self.store.delete_note(id)?;
            return Err(e.into());
        }
        Ok(true)
    }
}

/// Read a legacy note the way the old app did: line by line, joined with `\n`
fn read_legacy_text(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path)?;
    Ok(raw.lines().collect::<Vec<_>>().join("\n"))
}
