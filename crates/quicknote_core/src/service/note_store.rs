//! Backend-agnostic note CRUD.
//!
//! # Responsibility
//! - Pick the storage backend exactly once, at `initialize`.
//! - Apply the blank-text and timestamp rules before anything is persisted.
//!
//! # Invariants
//! - The selected backend never changes for the lifetime of a `NoteStore`.
//! - `list` is newest-first by insertion, not by timestamp.
//! - Blank `add`/`update` input is a silent no-op.

use crate::clock::{Clock, SystemClock};
use crate::config::{StoreConfig, StoreLocation, FLAT_STORE_DIR_NAME, STRUCTURED_DB_FILE_NAME};
use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::note::{is_blank, Note, NoteId};
use crate::repo::flat_backend::FlatNoteBackend;
use crate::repo::kv_store::{FileKeyValueStore, MemoryKeyValueStore};
use crate::repo::note_backend::{BackendKind, NoteBackend, StoreError, StoreResult};
use crate::repo::sqlite_backend::SqliteNoteBackend;
use log::{debug, error, info};
use rusqlite::Connection;

/// Note collection bound to one backend for the whole session.
pub struct NoteStore {
    backend: Box<dyn NoteBackend>,
    clock: Box<dyn Clock>,
}

impl NoteStore {
    /// Selects and opens a backend using the system clock.
    ///
    /// # Errors
    /// - Returns the open/migration error when SQLite is supported but the
    ///   database cannot be opened. No fallback happens in that case.
    pub fn initialize(config: &StoreConfig) -> StoreResult<Self> {
        Self::initialize_with_clock(config, SystemClock)
    }

    /// Same as `initialize` with an explicit time source.
    pub fn initialize_with_clock(
        config: &StoreConfig,
        clock: impl Clock + 'static,
    ) -> StoreResult<Self> {
        let backend: Box<dyn NoteBackend> = if config.structured_supported {
            let conn = open_structured(&config.location).map_err(|err| {
                error!(
                    "event=store_init module=store status=error backend=structured error_code=backend_open_failed error={err}"
                );
                err
            })?;
            Box::new(SqliteNoteBackend::try_new(conn)?)
        } else {
            info!("event=store_init module=store status=fallback backend=flat reason=structured_unsupported");
            match &config.location {
                StoreLocation::Directory(dir) => Box::new(FlatNoteBackend::new(
                    FileKeyValueStore::open(dir.join(FLAT_STORE_DIR_NAME))?,
                )),
                StoreLocation::InMemory => {
                    Box::new(FlatNoteBackend::new(MemoryKeyValueStore::new()))
                }
            }
        };

        info!(
            "event=store_init module=store status=ok backend={}",
            backend.kind()
        );
        Ok(Self {
            backend,
            clock: Box::new(clock),
        })
    }

    /// Wraps an already constructed backend.
    pub fn with_backend(backend: impl NoteBackend + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            clock: Box::new(clock),
        }
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Creates a note unless `text` is blank.
    ///
    /// Returns `None` when the input was ignored.
    pub fn add(&mut self, text: &str) -> StoreResult<Option<Note>> {
        if is_blank(text) {
            debug!("event=note_add module=store status=skipped reason=blank_text");
            return Ok(None);
        }

        let note = self.backend.insert(text, self.clock.now_ms())?;
        info!(
            "event=note_add module=store status=ok backend={} note_id={} text_len={}",
            self.backend.kind(),
            note.id,
            note.text.chars().count()
        );
        Ok(Some(note))
    }

    /// Replaces the text of an existing note and refreshes `updated_at`.
    ///
    /// Returns `None` when the input was blank and nothing was written.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when `id` does not exist.
    pub fn update(&mut self, id: NoteId, text: &str) -> StoreResult<Option<Note>> {
        if is_blank(text) {
            debug!("event=note_update module=store status=skipped reason=blank_text note_id={id}");
            return Ok(None);
        }

        let mut note = self.backend.get(id)?.ok_or(StoreError::NotFound(id))?;
        note.edit(text, self.clock.now_ms());
        self.backend.replace(&note)?;
        info!(
            "event=note_update module=store status=ok backend={} note_id={} text_len={}",
            self.backend.kind(),
            id,
            note.text.chars().count()
        );
        Ok(Some(note))
    }

    /// Deletes a note if present. Returns whether anything was removed.
    pub fn remove(&mut self, id: NoteId) -> StoreResult<bool> {
        let removed = self.backend.delete(id)?;
        info!(
            "event=note_remove module=store status=ok backend={} note_id={} removed={}",
            self.backend.kind(),
            id,
            removed
        );
        Ok(removed)
    }

    pub fn get(&self, id: NoteId) -> StoreResult<Option<Note>> {
        self.backend.get(id)
    }

    /// All notes, most recently inserted first.
    pub fn list(&self) -> StoreResult<Vec<Note>> {
        let mut notes = self.backend.list_in_insertion_order()?;
        notes.reverse();
        Ok(notes)
    }
}

fn open_structured(location: &StoreLocation) -> StoreResult<Connection> {
    let conn: DbResult<Connection> = match location {
        StoreLocation::Directory(dir) => {
            std::fs::create_dir_all(dir)?;
            open_db(dir.join(STRUCTURED_DB_FILE_NAME))
        }
        StoreLocation::InMemory => open_db_in_memory(),
    };
    Ok(conn?)
}

#[cfg(test)]
mod tests {
    use super::NoteStore;
    use crate::clock::ManualClock;
    use crate::config::StoreConfig;
    use crate::repo::note_backend::BackendKind;

    #[test]
    fn in_memory_config_prefers_structured() {
        let store = NoteStore::initialize(&StoreConfig::in_memory()).unwrap();
        assert_eq!(store.backend_kind(), BackendKind::Structured);
    }

    #[test]
    fn blank_update_keeps_record_untouched() {
        let clock = ManualClock::at_ms(100);
        let mut store =
            NoteStore::initialize_with_clock(&StoreConfig::in_memory(), clock.clone()).unwrap();
        let note = store.add("keep me").unwrap().unwrap();
        clock.advance_ms(50);

        assert_eq!(store.update(note.id, "   ").unwrap(), None);
        assert_eq!(store.get(note.id).unwrap(), Some(note));
    }
}
