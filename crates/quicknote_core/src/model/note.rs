//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted record shared by both storage backends.
//! - Own the text and timestamp rules applied on create and edit.
//!
//! # Invariants
//! - `text` is never blank once persisted.
//! - `created_at` never changes after creation.
//! - `updated_at >= created_at`.

use serde::{Deserialize, Serialize};

/// Backend-assigned note identifier.
///
/// Auto-increment row id for SQLite, epoch milliseconds for the flat store.
pub type NoteId = i64;

/// A single user text entry.
///
/// Serialized with the field names of the flat `notes` array:
/// `id`, `text`, `date`, `updatedAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub text: String,
    /// Creation time in epoch milliseconds.
    #[serde(rename = "date")]
    pub created_at: i64,
    /// Last edit time in epoch milliseconds.
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

impl Note {
    /// Builds a freshly created note where both timestamps equal `now_ms`.
    pub fn new(id: NoteId, text: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id,
            text: text.into(),
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Replaces the text and refreshes `updated_at`.
    ///
    /// The new timestamp is clamped so it never precedes the previous
    /// `updated_at`, even if the wall clock stepped backwards.
    pub fn edit(&mut self, text: impl Into<String>, now_ms: i64) {
        self.text = text.into();
        self.updated_at = now_ms.max(self.updated_at);
    }
}

/// Returns whether `text` would be ignored on submit.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
