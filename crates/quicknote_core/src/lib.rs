//! Core of QuickNote: local note persistence with a SQLite backend and a
//! flat JSON key-value fallback.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{StoreConfig, StoreLocation};
pub use logging::{default_log_level, init_logging};
pub use model::note::{Note, NoteId};
pub use repo::flat_backend::FlatNoteBackend;
pub use repo::kv_store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use repo::note_backend::{BackendKind, NoteBackend, StoreError, StoreResult};
pub use repo::sqlite_backend::SqliteNoteBackend;
pub use service::editor::{key_action, EditorState, Key, KeyAction, SubmitOutcome};
pub use service::note_store::NoteStore;
