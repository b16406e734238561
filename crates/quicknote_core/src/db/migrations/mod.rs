//! Versioned schema changes for the note database.
//!
//! Migration `n` is `NOTES_MIGRATIONS[n - 1]`; the applied version is kept
//! in `PRAGMA user_version`. Pending steps run in one transaction.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const NOTES_MIGRATIONS: &[&str] = &[include_str!("0001_notes.sql")];

/// Where a database stands relative to this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    Current,
    Behind { from: u32 },
    Ahead { found: u32 },
}

/// Highest schema version this build can produce.
pub fn latest_version() -> u32 {
    NOTES_MIGRATIONS.len() as u32
}

pub fn schema_status(conn: &Connection) -> DbResult<SchemaStatus> {
    let found = conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?;
    let latest = latest_version();
    Ok(if found == latest {
        SchemaStatus::Current
    } else if found < latest {
        SchemaStatus::Behind { from: found }
    } else {
        SchemaStatus::Ahead { found }
    })
}

/// Brings the schema up to `latest_version`; returns how many steps ran.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<u32> {
    let from = match schema_status(conn)? {
        SchemaStatus::Current => return Ok(0),
        SchemaStatus::Ahead { found } => {
            return Err(DbError::SchemaTooNew {
                found,
                supported: latest_version(),
            })
        }
        SchemaStatus::Behind { from } => from,
    };

    let tx = conn.transaction()?;
    for (version, sql) in (1..).zip(NOTES_MIGRATIONS).skip(from as usize) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    let to = latest_version();
    info!("event=db_migrate module=db status=ok from={from} to={to}");
    Ok(to - from)
}
