use quicknote_core::config::{FLAT_STORE_DIR_NAME, STRUCTURED_DB_FILE_NAME};
use quicknote_core::db::DbError;
use quicknote_core::{BackendKind, NoteStore, StoreConfig, StoreError};
use rusqlite::Connection;

#[test]
fn structured_backend_is_preferred_when_supported() {
    let dir = tempfile::tempdir().unwrap();
    let store = NoteStore::initialize(&StoreConfig::in_directory(dir.path())).unwrap();

    assert_eq!(store.backend_kind(), BackendKind::Structured);
    assert!(dir.path().join(STRUCTURED_DB_FILE_NAME).exists());
    assert!(!dir.path().join(FLAT_STORE_DIR_NAME).exists());
}

#[test]
fn unsupported_structured_backend_falls_back_to_flat_without_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_directory(dir.path()).without_structured();
    let mut store = NoteStore::initialize(&config).unwrap();
    assert_eq!(store.backend_kind(), BackendKind::Flat);

    store.add("offline note").unwrap();
    let raw = std::fs::read_to_string(dir.path().join(FLAT_STORE_DIR_NAME).join("notes.json"))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["text"], "offline note");
    assert!(value[0]["id"].is_i64());
    assert!(!dir.path().join(STRUCTURED_DB_FILE_NAME).exists());
}

#[test]
fn flat_notes_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_directory(dir.path()).without_structured();
    let created = {
        let mut store = NoteStore::initialize(&config).unwrap();
        store.add("persisted").unwrap().unwrap()
    };

    let reopened = NoteStore::initialize(&config).unwrap();
    assert_eq!(reopened.list().unwrap(), vec![created]);
}

#[test]
fn structured_notes_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_directory(dir.path());
    let created = {
        let mut store = NoteStore::initialize(&config).unwrap();
        store.add("persisted").unwrap().unwrap()
    };

    let reopened = NoteStore::initialize(&config).unwrap();
    assert_eq!(reopened.list().unwrap(), vec![created]);
}

#[test]
fn data_from_one_backend_is_invisible_to_the_other() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut structured = NoteStore::initialize(&StoreConfig::in_directory(dir.path())).unwrap();
        structured.add("only in sqlite").unwrap();
    }

    let flat_config = StoreConfig::in_directory(dir.path()).without_structured();
    let flat = NoteStore::initialize(&flat_config).unwrap();
    assert!(flat.list().unwrap().is_empty());
}

#[test]
fn structured_open_failure_rejects_initialization() {
    let dir = tempfile::tempdir().unwrap();
    let conn = Connection::open(dir.path().join(STRUCTURED_DB_FILE_NAME)).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = NoteStore::initialize(&StoreConfig::in_directory(dir.path()))
        .err()
        .unwrap();
    assert!(matches!(
        err,
        StoreError::Db(DbError::SchemaTooNew { found: 999, .. })
    ));
    assert!(!dir.path().join(FLAT_STORE_DIR_NAME).exists());
}
