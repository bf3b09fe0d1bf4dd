use crate::errors::{AppError, AppResult};
use crate::models::history::{HistoryEntry, SamplingType};
use rusqlite::params;
use rusqlite::{Connection, Result, Row};

pub fn map_history_row(row: &Row) -> Result<HistoryEntry> {
    let type_str: String = row.get("sampling_type")?;
    let sampling_type = SamplingType::from_db_str(&type_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidSamplingType(type_str.clone())),
        )
    })?;

    Ok(HistoryEntry {
        id: row.get("id")?,
        ticket_id: row.get("ticket_id")?,
        ticket_number: row.get("ticket_number")?,
        sampling_type,
        withdrawn_at: row.get("withdrawn_at")?,
        notes: row.get("notes")?,
    })
}

pub fn insert_history(conn: &Connection, entry: &HistoryEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO history (ticket_id, ticket_number, sampling_type, withdrawn_at, notes)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            entry.ticket_id,
            entry.ticket_number,
            entry.sampling_type.to_db_str(),
            entry.withdrawn_at,
            entry.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_history(conn: &Connection) -> AppResult<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare("SELECT * FROM history ORDER BY withdrawn_at ASC, id ASC")?;

    let rows = stmt.query_map([], map_history_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
