use crate::errors::AppResult;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// Write one change-journal line into the `log` table.
///
/// `target` encodes the affected rows as `table:key` (es.
/// `tickets:NT-1001`, `oee_records:Cabine 1`) so a consumer can scope
/// what to re-read. Mutating operations call this inside their own
/// transaction, so journal and data never diverge.
pub fn ntlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    // Timestamp locale, formattato in ISO 8601
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}
