//! SQLite-backed note storage (structured backend).
//!
//! # Invariants
//! - Ids come from `AUTOINCREMENT` and are never reused after deletion.
//! - Insertion order equals ascending id order.

use crate::db::schema::verify_notes_schema;
use crate::model::note::{Note, NoteId};
use crate::repo::note_backend::{BackendKind, NoteBackend, StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    text,
    date,
    updated_at
FROM notes";

/// Structured backend owning one migrated connection for the session.
pub struct SqliteNoteBackend {
    conn: Connection,
}

impl SqliteNoteBackend {
    /// Wraps a connection returned by `open_db` / `open_db_in_memory`.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        verify_notes_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl NoteBackend for SqliteNoteBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Structured
    }

    fn insert(&mut self, text: &str, now_ms: i64) -> StoreResult<Note> {
        self.conn.execute(
            "INSERT INTO notes (text, date, updated_at) VALUES (?1, ?2, ?2);",
            params![text, now_ms],
        )?;
        Ok(Note::new(self.conn.last_insert_rowid(), text, now_ms))
    }

    fn get(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let note = self
            .conn
            .query_row(
                &format!("{NOTE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                map_note_row,
            )
            .optional()?;
        Ok(note)
    }

    fn replace(&mut self, note: &Note) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                text = ?2,
                date = ?3,
                updated_at = ?4
             WHERE id = ?1;",
            params![note.id, note.text, note.created_at, note.updated_at],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(note.id));
        }

        Ok(())
    }

    fn delete(&mut self, id: NoteId) -> StoreResult<bool> {
        let changed = self.conn.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn list_in_insertion_order(&self) -> StoreResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(map_note_row(row)?);
        }
        Ok(notes)
    }
}

fn map_note_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        text: row.get("text")?,
        created_at: row.get("date")?,
        updated_at: row.get("updated_at")?,
    })
}
