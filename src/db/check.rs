//! Domain consistency scan and conservative repair.
//!
//! Transactions make partial writes unobservable for databases this
//! binary manages, but imported or hand-edited databases can still
//! carry the legacy inconsistencies: items of one ticket with mixed
//! in-flight statuses, pause intervals left open after their run
//! finished, in-progress OEE rows whose ticket already moved on.

use crate::db::log::ntlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date;
use rusqlite::params;

/// One finding of the scan, human-readable.
#[derive(Debug, Clone)]
pub struct Finding {
    pub table: String,
    pub detail: String,
}

/// Scan the whole database for domain inconsistencies. Read-only.
pub fn run_consistency_scan(pool: &mut DbPool) -> AppResult<Vec<Finding>> {
    let conn = &pool.conn;
    let mut findings = Vec::new();

    // 1) Tickets whose non-finalized items disagree on status or cabin
    {
        let mut stmt = conn.prepare(
            "SELECT t.number, COUNT(DISTINCT li.status), COUNT(DISTINCT li.cabin)
             FROM tickets t
             JOIN line_items li ON li.ticket_id = t.id
             WHERE li.status <> 'finalized'
             GROUP BY t.id
             HAVING COUNT(DISTINCT li.status) > 1 OR COUNT(DISTINCT li.cabin) > 1",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        for r in rows {
            let (number, statuses, cabins) = r?;
            findings.push(Finding {
                table: "line_items".into(),
                detail: format!(
                    "ticket {} has desynchronized items ({} statuses, {} cabins)",
                    number, statuses, cabins
                ),
            });
        }
    }

    // 2) Open pause intervals whose run already finished
    {
        let mut stmt = conn.prepare(
            "SELECT p.id, p.cabin, p.ticket_id
             FROM pause_intervals p
             JOIN oee_records o
               ON o.ticket_id = p.ticket_id AND o.cabin = p.cabin
             WHERE p.ended_at IS NULL AND o.status = 'finished'",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        for r in rows {
            let (id, cabin, ticket_id) = r?;
            findings.push(Finding {
                table: "pause_intervals".into(),
                detail: format!(
                    "interval {} ({}, ticket id {}) still open after its run finished",
                    id, cabin, ticket_id
                ),
            });
        }
    }

    // 3) In-progress OEE rows whose ticket has no in_sampling item left
    {
        let mut stmt = conn.prepare(
            "SELECT o.id, o.cabin
             FROM oee_records o
             WHERE o.status = 'in_progress'
               AND NOT EXISTS (
                   SELECT 1 FROM line_items li
                   WHERE li.ticket_id = o.ticket_id AND li.status = 'in_sampling'
               )",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        for r in rows {
            let (id, cabin) = r?;
            findings.push(Finding {
                table: "oee_records".into(),
                detail: format!("record {} ({}) in progress with no item being sampled", id, cabin),
            });
        }
    }

    // 4) OEE rows stuck in 'awaiting' (no code path creates these)
    {
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM oee_records WHERE status = 'awaiting'",
            [],
            |row| row.get(0),
        )?;

        if n > 0 {
            findings.push(Finding {
                table: "oee_records".into(),
                detail: format!("{} record(s) stuck in 'awaiting'", n),
            });
        }
    }

    // 5) History entries whose ticket still has non-finalized items
    {
        let mut stmt = conn.prepare(
            "SELECT h.ticket_number
             FROM history h
             WHERE EXISTS (
                 SELECT 1 FROM line_items li
                 WHERE li.ticket_id = h.ticket_id AND li.status <> 'finalized'
             )",
        )?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        for r in rows {
            findings.push(Finding {
                table: "history".into(),
                detail: format!("ticket {} withdrawn but items not finalized", r?),
            });
        }
    }

    Ok(findings)
}

/// Conservative repair: force-close pause intervals orphaned by a
/// finished run. Nothing else is touched automatically.
pub fn repair_orphan_pauses(pool: &mut DbPool) -> AppResult<usize> {
    let now = date::now_rfc3339();
    let conn = &mut pool.conn;

    let tx = conn.transaction()?;

    let affected = tx.execute(
        "UPDATE pause_intervals
         SET ended_at = ?1
         WHERE ended_at IS NULL
           AND EXISTS (
               SELECT 1 FROM oee_records o
               WHERE o.ticket_id = pause_intervals.ticket_id
                 AND o.cabin = pause_intervals.cabin
                 AND o.status = 'finished'
           )",
        params![now],
    )?;

    if affected > 0 {
        ntlog(
            &tx,
            "repair",
            "pause_intervals:*",
            &format!("Force-closed {} orphan pause interval(s)", affected),
        )?;
    }

    tx.commit()?;
    Ok(affected)
}
