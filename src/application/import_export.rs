//! Plain-text import/export and JSON backups through a document picker

use crate::domain::{
    backup_filename, date_from_filename, generate_filename, parse_timestamp, FilenameFormat, Note,
};
use crate::error::Result;
use crate::infrastructure::{DocumentPicker, Picked};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Notes handed over, and files that could not be read
    Imported { imported: usize, failed: usize },
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Files written, and files that could not be written
    Exported { written: usize, failed: usize },
    Cancelled,
}

/// One entry of a JSON backup file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupNote {
    pub text: String,
    pub title: String,
    /// `yyyy-MM-dd-HH-mm` in local time
    pub date: String,
}

impl BackupNote {
    fn from_note(note: &Note) -> Self {
        BackupNote {
            text: note.saved_text().to_string(),
            title: note.title().to_string(),
            date: crate::domain::format_timestamp(note.date()),
        }
    }

    /// Parsed date, or now when the backup carries something unreadable
    pub fn parsed_date(&self) -> DateTime<Utc> {
        parse_timestamp(&self.date).unwrap_or_else(Utc::now)
    }
}

/// Moves note text between the store and files chosen through a picker
pub struct ImportExporter<'a> {
    picker: &'a mut dyn DocumentPicker,
}

impl<'a> ImportExporter<'a> {
    pub fn new(picker: &'a mut dyn DocumentPicker) -> Self {
        ImportExporter { picker }
    }

    /// Read every picked file as UTF-8 and hand non-empty text to `on_note`,
    /// dated from a timestamp in the file name or else now.
    /// Files that cannot be read or decoded are skipped.
    pub fn import_notes(
        &mut self,
        mut on_note: impl FnMut(String, DateTime<Utc>),
    ) -> ImportOutcome {
        let Picked::Selected(files) = self.picker.pick_files() else {
            return ImportOutcome::Cancelled;
        };

        let mut imported = 0;
        let mut failed = 0;
        for path in files {
            match read_utf8(&path) {
                Ok(text) if text.is_empty() => {
                    tracing::debug!("skipping empty file {}", path.display());
                }
                Ok(text) => {
                    let date = date_from_filename(&path).unwrap_or_else(Utc::now);
                    on_note(text, date);
                    imported += 1;
                }
                Err(e) => {
                    tracing::warn!("cannot import {}: {e}", path.display());
                    failed += 1;
                }
            }
        }

        ImportOutcome::Imported { imported, failed }
    }

    /// Write each note to its own file in a picked directory.
    ///
    /// Best effort: a file that fails is logged and counted, the rest are
    /// still written, and nothing already written is removed.
    pub fn export_notes(
        &mut self,
        notes: &[Note],
        format: FilenameFormat,
        on_cancel: impl FnOnce(),
    ) -> ExportOutcome {
        let Picked::Selected(dir) = self.picker.pick_directory() else {
            on_cancel();
            return ExportOutcome::Cancelled;
        };

        let mut written = 0;
        let mut failed = 0;
        for note in notes {
            let filename = generate_filename(&note.metadata, format);
            match write_new_file(&dir, &filename, note.saved_text()) {
                Ok(path) => {
                    tracing::debug!(id = note.id(), "exported to {}", path.display());
                    written += 1;
                }
                Err(e) => {
                    tracing::warn!("cannot export note {} as {filename}: {e}", note.id());
                    failed += 1;
                }
            }
        }

        ExportOutcome::Exported { written, failed }
    }

    /// Write one note to a file created through the picker
    pub fn export_note(&mut self, note: &Note, format: FilenameFormat) -> Result<ExportOutcome> {
        let suggested = generate_filename(&note.metadata, format);
        let Picked::Selected(path) = self.picker.create_file(&suggested) else {
            return Ok(ExportOutcome::Cancelled);
        };

        fs::write(&path, note.saved_text())?;
        Ok(ExportOutcome::Exported {
            written: 1,
            failed: 0,
        })
    }

    /// Write all notes into one JSON backup file
    pub fn export_backup(&mut self, notes: &[Note], now: DateTime<Utc>) -> Result<ExportOutcome> {
        let Picked::Selected(path) = self.picker.create_file(&backup_filename(now)) else {
            return Ok(ExportOutcome::Cancelled);
        };

        let entries: Vec<BackupNote> = notes.iter().map(BackupNote::from_note).collect();
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&path, json)?;

        Ok(ExportOutcome::Exported {
            written: entries.len(),
            failed: 0,
        })
    }

    /// Read notes back from picked JSON backup files.
    ///
    /// A file that cannot be read or parsed is logged and counted; the
    /// entries of the other files are still handed to `on_note`.
    pub fn import_backup(&mut self, mut on_note: impl FnMut(BackupNote)) -> ImportOutcome {
        let Picked::Selected(files) = self.picker.pick_files() else {
            return ImportOutcome::Cancelled;
        };

        let mut imported = 0;
        let mut failed = 0;
        for path in files {
            let entries = match read_backup(&path) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("cannot restore {}: {e}", path.display());
                    failed += 1;
                    continue;
                }
            };
            for entry in entries.into_iter().filter(|e| !e.text.is_empty()) {
                on_note(entry);
                imported += 1;
            }
        }

        ImportOutcome::Imported { imported, failed }
    }
}

fn read_backup(path: &Path) -> Result<Vec<BackupNote>> {
    Ok(serde_json::from_str(&read_utf8(path)?)?)
}

fn read_utf8(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.utf8_error()).into()
    })
}

/// Create `name` in `dir` without overwriting: `a.txt`, `a (1).txt`, `a (2).txt`, ...
fn write_new_file(dir: &Path, name: &str, text: &str) -> std::io::Result<PathBuf> {
    let (stem, ext) = name.rsplit_once('.').unwrap_or((name, ""));

    for attempt in 0.. {
        let candidate = match (attempt, ext) {
            (0, _) => name.to_string(),
            (n, "") => format!("{} ({})", stem, n),
            (n, ext) => format!("{} ({}).{}", stem, n, ext),
        };
        let path = dir.join(candidate);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(text.as_bytes())?;
                return Ok(path);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
    unreachable!("unbounded range always yields a free name")
}
