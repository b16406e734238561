//! Store configuration.
//!
//! # Responsibility
//! - Describe where note data lives and whether SQLite may be used.
//! - Resolve defaults from `QUICKNOTE_*` environment variables.

use std::path::{Path, PathBuf};

/// SQLite file used by the structured backend.
pub const STRUCTURED_DB_FILE_NAME: &str = "quicknote.sqlite3";
/// Directory (under the data dir) holding flat key-value files.
pub const FLAT_STORE_DIR_NAME: &str = "kv";
/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".quicknote";

pub const ENV_DATA_DIR: &str = "QUICKNOTE_DATA_DIR";
pub const ENV_STRUCTURED: &str = "QUICKNOTE_STRUCTURED";

/// Where both backends keep their data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Files under this directory, created on first use.
    Directory(PathBuf),
    /// Nothing touches disk; data is lost when the store is dropped.
    InMemory,
}

/// Inputs for `NoteStore::initialize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: StoreLocation,
    /// When `false` the environment is treated as lacking SQLite support
    /// and the flat backend is selected.
    pub structured_supported: bool,
}

impl StoreConfig {
    pub fn in_directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            location: StoreLocation::Directory(dir.into()),
            structured_supported: true,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::InMemory,
            structured_supported: true,
        }
    }

    /// Marks the structured backend as unavailable.
    pub fn without_structured(mut self) -> Self {
        self.structured_supported = false;
        self
    }

    /// Reads `QUICKNOTE_DATA_DIR` and `QUICKNOTE_STRUCTURED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dir = lookup(ENV_DATA_DIR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let structured_supported = lookup(ENV_STRUCTURED)
            .map(|value| parse_switch(&value))
            .unwrap_or(true);

        Self {
            location: StoreLocation::Directory(PathBuf::from(dir)),
            structured_supported,
        }
    }

    pub fn data_dir(&self) -> Option<&Path> {
        match &self.location {
            StoreLocation::Directory(dir) => Some(dir.as_path()),
            StoreLocation::InMemory => None,
        }
    }
}

/// Interprets an on/off environment value; anything unrecognized is "on".
pub fn parse_switch(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}
