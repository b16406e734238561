//! Backend contract and storage error type.

use crate::db::DbError;
use crate::model::note::{Note, NoteId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for note persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Io(std::io::Error),
    Codec(serde_json::Error),
    NotFound(NoteId),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "note storage i/o failed: {err}"),
            Self::Codec(err) => write!(f, "note data is not valid json: {err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid note data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Which storage strategy a session runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// SQLite table keyed by an auto-increment id.
    Structured,
    /// One JSON array under a single key-value entry.
    Flat,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::Flat => "flat",
        }
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistence contract implemented by both backends.
pub trait NoteBackend {
    fn kind(&self) -> BackendKind;
    /// Persists a new note, assigning its id per backend policy.
    fn insert(&mut self, text: &str, now_ms: i64) -> StoreResult<Note>;
    fn get(&self, id: NoteId) -> StoreResult<Option<Note>>;
    /// Overwrites the stored record with the same id.
    ///
    /// Returns `StoreError::NotFound` when no such record exists.
    fn replace(&mut self, note: &Note) -> StoreResult<()>;
    /// Deletes a record; returns whether anything was removed.
    fn delete(&mut self, id: NoteId) -> StoreResult<bool>;
    fn list_in_insertion_order(&self) -> StoreResult<Vec<Note>>;
}
