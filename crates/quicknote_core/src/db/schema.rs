//! Shape check for the `notes` table.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

const NOTES_TABLE: &str = "notes";
const NOTES_COLUMNS: [&str; 4] = ["id", "text", "date", "updated_at"];

/// Fails with `NotesSchemaMismatch` naming the first missing piece.
pub fn verify_notes_schema(conn: &Connection) -> DbResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('notes');")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(DbError::NotesSchemaMismatch {
            missing: NOTES_TABLE,
        });
    }
    for column in NOTES_COLUMNS {
        if !columns.iter().any(|present| present == column) {
            return Err(DbError::NotesSchemaMismatch { missing: column });
        }
    }
    Ok(())
}
