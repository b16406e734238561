//! Use-case layer over the storage backends.
//!
//! # Responsibility
//! - Select the backend once per session (`NoteStore`).
//! - Keep editing state outside the store (`EditorState`).

pub mod editor;
pub mod note_store;
