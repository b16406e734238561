//! SQLite bootstrap for the structured note backend.
//!
//! # Invariants
//! - A connection is handed out only after migrations ran and the `notes`
//!   table shape was verified.
//! - A file written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to open or validate the note database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// `user_version` is ahead of the migrations this build ships.
    SchemaTooNew { found: u32, supported: u32 },
    /// The `notes` table (or one of its columns) is absent.
    NotesSchemaMismatch { missing: &'static str },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "note database was written by a newer version (schema {found}, this build knows up to {supported})"
            ),
            Self::NotesSchemaMismatch { missing } => {
                write!(f, "note database is missing `{missing}` in the notes schema")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::NotesSchemaMismatch { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
