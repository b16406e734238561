//! Storage backends for the note collection.
//!
//! # Responsibility
//! - Define the `NoteBackend` contract shared by both storage strategies.
//! - Keep SQL and JSON layout details out of `NoteStore`.
//!
//! # Invariants
//! - Backends persist whole records; there are no partial updates.
//! - `list_in_insertion_order` returns oldest-first; callers reverse it.

pub mod flat_backend;
pub mod kv_store;
pub mod note_backend;
pub mod sqlite_backend;
