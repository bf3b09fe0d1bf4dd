use crate::errors::{AppError, AppResult};
use crate::models::oee::{OeeRecord, OeeStatus};
use crate::models::pause::PauseInterval;
use crate::utils::date;
use rusqlite::params;
use rusqlite::{Connection, OptionalExtension, Result, Row};

pub fn map_oee_row(row: &Row) -> Result<OeeRecord> {
    let status_str: String = row.get("status")?;
    let status = OeeStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(OeeRecord {
        id: row.get("id")?,
        ticket_id: row.get("ticket_id")?,
        cabin: row.get("cabin")?,
        operator: row.get("operator")?,
        started_at: row.get("started_at")?,
        ended_at: row.get("ended_at")?,
        elapsed_seconds: row.get("elapsed_seconds")?,
        total_seconds: row.get("total_seconds")?,
        status,
    })
}

pub fn map_pause_row(row: &Row) -> Result<PauseInterval> {
    Ok(PauseInterval {
        id: row.get("id")?,
        ticket_id: row.get("ticket_id")?,
        cabin: row.get("cabin")?,
        reason: row.get("reason")?,
        note: row.get("note")?,
        started_at: row.get("started_at")?,
        ended_at: row.get("ended_at")?,
    })
}

pub fn insert_oee(conn: &Connection, rec: &OeeRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO oee_records (ticket_id, cabin, operator, started_at, ended_at, elapsed_seconds, total_seconds, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            rec.ticket_id,
            rec.cabin,
            rec.operator,
            rec.started_at,
            rec.ended_at,
            rec.elapsed_seconds,
            rec.total_seconds,
            rec.status.to_db_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// The cabin's non-finished record, if any. At most one exists by the
/// claim-time guard; newest wins if an old database violates that.
pub fn active_oee_for_cabin(conn: &Connection, cabin: &str) -> AppResult<Option<OeeRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM oee_records
         WHERE cabin = ?1 AND status <> 'finished'
         ORDER BY id DESC
         LIMIT 1",
    )?;
    let rec = stmt.query_row([cabin], map_oee_row).optional()?;
    Ok(rec)
}

/// Periodic flush of the net-running counter into the persisted row.
pub fn flush_elapsed(conn: &Connection, oee_id: i64, elapsed_seconds: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE oee_records SET elapsed_seconds = ?1 WHERE id = ?2",
        params![elapsed_seconds, oee_id],
    )?;
    Ok(())
}

pub fn close_oee(
    conn: &Connection,
    oee_id: i64,
    ended_at: &str,
    elapsed_seconds: i64,
    total_seconds: i64,
) -> AppResult<()> {
    conn.execute(
        "UPDATE oee_records
         SET status = 'finished', ended_at = ?1, elapsed_seconds = ?2, total_seconds = ?3
         WHERE id = ?4",
        params![ended_at, elapsed_seconds, total_seconds, oee_id],
    )?;
    Ok(())
}

pub fn load_finished_oee(conn: &Connection) -> AppResult<Vec<OeeRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM oee_records
         WHERE status = 'finished'
         ORDER BY started_at ASC, id ASC",
    )?;

    let rows = stmt.query_map([], map_oee_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_all_oee(conn: &Connection) -> AppResult<Vec<OeeRecord>> {
    let mut stmt = conn.prepare("SELECT * FROM oee_records ORDER BY started_at ASC, id ASC")?;

    let rows = stmt.query_map([], map_oee_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_pause(conn: &Connection, p: &PauseInterval) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO pause_intervals (ticket_id, cabin, reason, note, started_at, ended_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![p.ticket_id, p.cabin, p.reason, p.note, p.started_at, p.ended_at],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent still-open pause of one run.
pub fn open_pause_for_run(
    conn: &Connection,
    ticket_id: i64,
    cabin: &str,
) -> AppResult<Option<PauseInterval>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM pause_intervals
         WHERE ticket_id = ?1 AND cabin = ?2 AND ended_at IS NULL
         ORDER BY id DESC
         LIMIT 1",
    )?;
    let p = stmt
        .query_row(params![ticket_id, cabin], map_pause_row)
        .optional()?;
    Ok(p)
}

pub fn close_pause(conn: &Connection, pause_id: i64, ended_at: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE pause_intervals SET ended_at = ?1 WHERE id = ?2",
        params![ended_at, pause_id],
    )?;
    Ok(())
}

/// Force-close every open interval of a run. Used by finish() and by
/// the repair pass. Returns how many rows were closed.
pub fn close_open_pauses(
    conn: &Connection,
    ticket_id: i64,
    cabin: &str,
    ended_at: &str,
) -> AppResult<usize> {
    let affected = conn.execute(
        "UPDATE pause_intervals
         SET ended_at = ?3
         WHERE ticket_id = ?1 AND cabin = ?2 AND ended_at IS NULL",
        params![ticket_id, cabin, ended_at],
    )?;
    Ok(affected)
}

pub fn load_pauses_for_run(
    conn: &Connection,
    ticket_id: i64,
    cabin: &str,
) -> AppResult<Vec<PauseInterval>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM pause_intervals
         WHERE ticket_id = ?1 AND cabin = ?2
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(params![ticket_id, cabin], map_pause_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Measured pause time of one run.
///
/// Returns `(count, closed_sum_seconds, has_unusable)`: intervals whose
/// timestamps fail to parse, or that are still open, make the run fall
/// back to the count-based estimate.
pub fn pause_totals_for_run(
    conn: &Connection,
    ticket_id: i64,
    cabin: &str,
) -> AppResult<(usize, i64, bool)> {
    let pauses = load_pauses_for_run(conn, ticket_id, cabin)?;

    let mut sum = 0i64;
    let mut unusable = false;

    for p in &pauses {
        match &p.ended_at {
            Some(end) => match date::seconds_between(&p.started_at, end) {
                Some(secs) => sum += secs,
                None => unusable = true,
            },
            None => unusable = true,
        }
    }

    Ok((pauses.len(), sum, unusable))
}
