//! Domain model for locally persisted notes.
//!
//! # Invariants
//! - Every note is identified by a backend-assigned `NoteId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
