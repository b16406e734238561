//! Single-key JSON array note storage (flat backend).
//!
//! # Responsibility
//! - Keep the whole collection as one JSON array under `NOTES_KEY`.
//! - Allocate timestamp ids that stay unique within the array.
//!
//! # Invariants
//! - A missing key reads as an empty collection; deleting the last note
//!   removes the key.
//! - Array order is insertion order; edits replace elements in place.

use crate::model::note::{Note, NoteId};
use crate::repo::kv_store::KeyValueStore;
use crate::repo::note_backend::{BackendKind, NoteBackend, StoreError, StoreResult};
use std::collections::HashSet;

/// Key holding the serialized note array.
pub const NOTES_KEY: &str = "notes";

/// Flat backend over any `KeyValueStore`.
pub struct FlatNoteBackend<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> FlatNoteBackend<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying key-value store.
    pub fn into_inner(self) -> S {
        self.store
    }

    fn load(&self) -> StoreResult<Vec<Note>> {
        let Some(raw) = self.store.get_item(NOTES_KEY)? else {
            return Ok(Vec::new());
        };
        let notes: Vec<Note> = serde_json::from_str(&raw)?;
        ensure_unique_ids(&notes)?;
        Ok(notes)
    }

    fn save(&mut self, notes: &[Note]) -> StoreResult<()> {
        let raw = serde_json::to_string(notes)?;
        self.store.set_item(NOTES_KEY, &raw)
    }
}

impl<S: KeyValueStore> NoteBackend for FlatNoteBackend<S> {
    fn kind(&self) -> BackendKind {
        BackendKind::Flat
    }

    fn insert(&mut self, text: &str, now_ms: i64) -> StoreResult<Note> {
        let mut notes = self.load()?;
        let note = Note::new(allocate_id(&notes, now_ms), text, now_ms);
        notes.push(note.clone());
        self.save(&notes)?;
        Ok(note)
    }

    fn get(&self, id: NoteId) -> StoreResult<Option<Note>> {
        Ok(self.load()?.into_iter().find(|note| note.id == id))
    }

    fn replace(&mut self, note: &Note) -> StoreResult<()> {
        let mut notes = self.load()?;
        let slot = notes
            .iter_mut()
            .find(|current| current.id == note.id)
            .ok_or(StoreError::NotFound(note.id))?;
        *slot = note.clone();
        self.save(&notes)
    }

    fn delete(&mut self, id: NoteId) -> StoreResult<bool> {
        let mut notes = self.load()?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() == before {
            return Ok(false);
        }
        if notes.is_empty() {
            self.store.remove_item(NOTES_KEY)?;
        } else {
            self.save(&notes)?;
        }
        Ok(true)
    }

    fn list_in_insertion_order(&self) -> StoreResult<Vec<Note>> {
        self.load()
    }
}

/// Picks `now_ms` as the id unless it collides, then one past the largest
/// id in use.
fn allocate_id(notes: &[Note], now_ms: i64) -> NoteId {
    if notes.iter().all(|note| note.id != now_ms) {
        return now_ms;
    }
    notes
        .iter()
        .map(|note| note.id)
        .max()
        .map_or(now_ms, |max_id| max_id.saturating_add(1))
}

fn ensure_unique_ids(notes: &[Note]) -> StoreResult<()> {
    let mut seen = HashSet::with_capacity(notes.len());
    for note in notes {
        if !seen.insert(note.id) {
            return Err(StoreError::InvalidData(format!(
                "duplicate note id {} under key `{NOTES_KEY}`",
                note.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{FlatNoteBackend, NOTES_KEY};
    use crate::repo::kv_store::{KeyValueStore, MemoryKeyValueStore};
    use crate::repo::note_backend::{NoteBackend, StoreError};

    #[test]
    fn ids_are_timestamps_and_stay_unique_within_one_millisecond() {
        let mut backend = FlatNoteBackend::new(MemoryKeyValueStore::new());
        let first = backend.insert("a", 1_700_000_000_000).unwrap();
        let second = backend.insert("b", 1_700_000_000_000).unwrap();
        assert_eq!(first.id, 1_700_000_000_000);
        assert_eq!(second.id, 1_700_000_000_001);
    }

    #[test]
    fn persists_json_array_with_flat_field_names() {
        let mut backend = FlatNoteBackend::new(MemoryKeyValueStore::new());
        backend.insert("hello", 10).unwrap();

        let store = backend.into_inner();
        let raw = store.get_item(NOTES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "id": 10, "text": "hello", "date": 10, "updatedAt": 10 }])
        );
    }

    #[test]
    fn reads_array_written_by_another_writer() {
        let mut store = MemoryKeyValueStore::new();
        store
            .set_item(
                NOTES_KEY,
                r#"[{"id":5,"text":"legacy","date":1,"updatedAt":2}]"#,
            )
            .unwrap();
        let backend = FlatNoteBackend::new(store);
        let note = backend.get(5).unwrap().unwrap();
        assert_eq!(note.text, "legacy");
        assert_eq!(note.created_at, 1);
        assert_eq!(note.updated_at, 2);
    }

    #[test]
    fn corrupt_array_surfaces_codec_error() {
        let mut store = MemoryKeyValueStore::new();
        store.set_item(NOTES_KEY, "{not json").unwrap();
        let backend = FlatNoteBackend::new(store);
        let err = backend.list_in_insertion_order().unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
    }

    #[test]
    fn deleting_last_note_removes_the_key() {
        let mut backend = FlatNoteBackend::new(MemoryKeyValueStore::new());
        let first = backend.insert("a", 1).unwrap();
        let second = backend.insert("b", 2).unwrap();

        assert!(backend.delete(first.id).unwrap());
        assert_eq!(backend.list_in_insertion_order().unwrap(), vec![second.clone()]);
        assert!(backend.delete(second.id).unwrap());
        assert!(backend.list_in_insertion_order().unwrap().is_empty());

        let store = backend.into_inner();
        assert_eq!(store.get_item(NOTES_KEY).unwrap(), None);
    }

    #[test]
    fn delete_of_missing_id_does_not_rewrite_array() {
        let mut backend = FlatNoteBackend::new(MemoryKeyValueStore::new());
        assert!(!backend.delete(1).unwrap());
        let store = backend.into_inner();
        assert_eq!(store.get_item(NOTES_KEY).unwrap(), None);
    }
}
