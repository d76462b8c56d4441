//! SQLite note store
//!
//! Notes live in three tables: `NoteMetadata` (title, date, draft flag),
//! `NoteContents` (text and draft text) and `CrossRef`, which pairs one row of
//! each. Every write touches all three inside a single transaction.

use crate::domain::note::date_from_millis;
use crate::domain::{title_from_text, CrossRef, Note, NoteContents, NoteMetadata, SortOrder};
use crate::error::{NotepadError, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const SCHEMA_VERSION: i64 = 1;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS NoteMetadata (
        metadataId INTEGER PRIMARY KEY AUTOINCREMENT,
        title      TEXT    NOT NULL,
        date       INTEGER NOT NULL,
        hasDraft   INTEGER NOT NULL DEFAULT 0
    );
    CREATE TABLE IF NOT EXISTS NoteContents (
        contentsId INTEGER PRIMARY KEY AUTOINCREMENT,
        text       TEXT,
        draftText  TEXT
    );
    CREATE TABLE IF NOT EXISTS CrossRef (
        metadataId INTEGER PRIMARY KEY,
        contentsId INTEGER NOT NULL UNIQUE
    );
";

const NOTE_QUERY: &str = "
    SELECT m.metadataId, m.title, m.date, m.hasDraft,
           c.contentsId, c.text, c.draftText
    FROM CrossRef r
    JOIN NoteMetadata m ON m.metadataId = r.metadataId
    JOIN NoteContents c ON c.contentsId = r.contentsId
    WHERE r.metadataId = ?1";

/// Relational store for notes
pub struct NoteStore {
    conn: Connection,
}

impl NoteStore {
    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        Self::init(conn)
    }

    /// Open a throwaway database, used by tests
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        match version {
            0 => {
                conn.execute_batch(SCHEMA)?;
                conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
                tracing::debug!("created note schema v{SCHEMA_VERSION}");
            }
            SCHEMA_VERSION => {}
            newer => {
                return Err(NotepadError::Config(format!(
                    "Database schema version {} is newer than supported version {}",
                    newer, SCHEMA_VERSION
                )))
            }
        }

        Ok(NoteStore { conn })
    }

    /// Insert a note, or overwrite it in place when `id` already exists.
    ///
    /// The title is always re-derived from the first line of `text`.
    /// Returns the id of the stored note.
    pub fn save_note(
        &mut self,
        id: i64,
        text: &str,
        date: DateTime<Utc>,
        draft_text: Option<&str>,
    ) -> Result<i64> {
        let tx = self.conn.transaction()?;
        let title = title_from_text(text);
        let millis = date.timestamp_millis();
        let has_draft = draft_text.is_some();

        let saved_id = match cross_ref(&tx, id)? {
            Some(cross_ref) => {
                tx.execute(
                    "UPDATE NoteMetadata SET title = ?1, date = ?2, hasDraft = ?3
                     WHERE metadataId = ?4",
                    params![title, millis, has_draft, cross_ref.metadata_id],
                )?;
                tx.execute(
                    "UPDATE NoteContents SET text = ?1, draftText = ?2
                     WHERE contentsId = ?3",
                    params![text, draft_text, cross_ref.contents_id],
                )?;
                cross_ref.metadata_id
            }
            None => {
                tx.execute(
                    "INSERT INTO NoteMetadata (title, date, hasDraft) VALUES (?1, ?2, ?3)",
                    params![title, millis, has_draft],
                )?;
                let metadata_id = tx.last_insert_rowid();

                tx.execute(
                    "INSERT INTO NoteContents (text, draftText) VALUES (?1, ?2)",
                    params![text, draft_text],
                )?;
                let contents_id = tx.last_insert_rowid();

                tx.execute(
                    "INSERT INTO CrossRef (metadataId, contentsId) VALUES (?1, ?2)",
                    params![metadata_id, contents_id],
                )?;
                metadata_id
            }
        };

        tx.commit()?;
        tracing::debug!(id = saved_id, has_draft, "saved note");
        Ok(saved_id)
    }

    /// Fetch one note with its contents
    pub fn get_note(&self, id: i64) -> Result<Option<Note>> {
        let note = self
            .conn
            .query_row(NOTE_QUERY, [id], note_from_row)
            .optional()?;
        Ok(note)
    }

    /// Fetch full notes for `ids`, in the given order. Unknown ids are skipped.
    pub fn get_notes(&self, ids: &[i64]) -> Result<Vec<Note>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut notes = Vec::with_capacity(ids.len());
        {
            let mut stmt = tx.prepare(NOTE_QUERY)?;
            for id in ids {
                if let Some(note) = stmt.query_row([id], note_from_row).optional()? {
                    notes.push(note);
                }
            }
        }
        tx.commit()?;
        Ok(notes)
    }

    /// All note metadata in the requested order
    pub fn note_metadata(&self, order: SortOrder) -> Result<Vec<NoteMetadata>> {
        let order_by = match order {
            SortOrder::DateDescending => "date DESC, metadataId DESC",
            SortOrder::DateAscending => "date ASC, metadataId ASC",
            SortOrder::TitleDescending => "title COLLATE NOCASE DESC, metadataId DESC",
            SortOrder::TitleAscending => "title COLLATE NOCASE ASC, metadataId ASC",
        };
        let sql = format!(
            "SELECT metadataId, title, date, hasDraft FROM NoteMetadata ORDER BY {}",
            order_by
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], metadata_from_row)?;
        let metadata = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(metadata)
    }

    /// Id of a note left with unsaved edits, if there is one
    pub fn saved_draft_id(&self) -> Result<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT metadataId FROM NoteMetadata WHERE hasDraft = 1
                 ORDER BY metadataId LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Delete one note. Returns false when no such note exists.
    pub fn delete_note(&mut self, id: i64) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let deleted = delete_in(&tx, id)?;
        tx.commit()?;
        Ok(deleted)
    }

    /// Delete several notes at once. Returns how many were removed.
    pub fn delete_notes(&mut self, ids: &[i64]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut deleted = 0;
        for id in ids {
            if delete_in(&tx, *id)? {
                deleted += 1;
            }
        }
        tx.commit()?;
        tracing::debug!(deleted, requested = ids.len(), "deleted notes");
        Ok(deleted)
    }

    /// Number of persisted notes
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM CrossRef", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn cross_ref(conn: &Connection, id: i64) -> Result<Option<CrossRef>> {
    let cross_ref = conn
        .query_row(
            "SELECT metadataId, contentsId FROM CrossRef WHERE metadataId = ?1",
            [id],
            |row| {
                Ok(CrossRef {
                    metadata_id: row.get(0)?,
                    contents_id: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(cross_ref)
}

fn delete_in(conn: &Connection, id: i64) -> Result<bool> {
    let Some(cross_ref) = cross_ref(conn, id)? else {
        return Ok(false);
    };

    conn.execute(
        "DELETE FROM NoteMetadata WHERE metadataId = ?1",
        [cross_ref.metadata_id],
    )?;
    conn.execute(
        "DELETE FROM NoteContents WHERE contentsId = ?1",
        [cross_ref.contents_id],
    )?;
    conn.execute(
        "DELETE FROM CrossRef WHERE metadataId = ?1",
        [cross_ref.metadata_id],
    )?;
    Ok(true)
}

fn metadata_from_row(row: &Row<'_>) -> rusqlite::Result<NoteMetadata> {
    Ok(NoteMetadata {
        metadata_id: row.get(0)?,
        title: row.get(1)?,
        date: date_from_millis(row.get(2)?),
        has_draft: row.get(3)?,
    })
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    let metadata = metadata_from_row(row)?;
    let contents = NoteContents {
        contents_id: row.get(4)?,
        text: row.get(5)?,
        draft_text: row.get(6)?,
    };
    Ok(Note::new(metadata, contents))
}
