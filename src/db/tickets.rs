use crate::errors::{AppError, AppResult};
use crate::models::ticket::{LineItem, Ticket};
use crate::models::ticket_status::TicketStatus;
use rusqlite::params;
use rusqlite::{Connection, OptionalExtension, Result, Row};

pub fn map_ticket_row(row: &Row) -> Result<Ticket> {
    Ok(Ticket {
        id: row.get("id")?,
        number: row.get("number")?,
        created_at: row.get("created_at")?,
    })
}

pub fn map_item_row(row: &Row) -> Result<LineItem> {
    let status_str: String = row.get("status")?;
    let status = TicketStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(LineItem {
        id: row.get("id")?,
        ticket_id: row.get("ticket_id")?,
        code: row.get("code")?,
        description: row.get("description")?,
        quantity: row.get("quantity")?,
        batch: row.get("batch")?,
        status,
        cabin: row.get("cabin")?,
        sample_started_at: row.get("sample_started_at")?,
        sample_finished_at: row.get("sample_finished_at")?,
    })
}

pub fn insert_ticket(conn: &Connection, number: &str, created_at: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO tickets (number, created_at) VALUES (?1, ?2)",
        params![number, created_at],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_item(conn: &Connection, item: &LineItem) -> AppResult<()> {
    conn.execute(
        "INSERT INTO line_items (ticket_id, code, description, quantity, batch, status, cabin, sample_started_at, sample_finished_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            item.ticket_id,
            item.code,
            item.description,
            item.quantity,
            item.batch,
            item.status.to_db_str(),
            item.cabin,
            item.sample_started_at,
            item.sample_finished_at,
        ],
    )?;
    Ok(())
}

pub fn find_ticket_by_number(conn: &Connection, number: &str) -> AppResult<Option<Ticket>> {
    let mut stmt = conn.prepare("SELECT * FROM tickets WHERE number = ?1")?;
    let ticket = stmt.query_row([number], map_ticket_row).optional()?;
    Ok(ticket)
}

pub fn load_ticket(conn: &Connection, id: i64) -> AppResult<Option<Ticket>> {
    let mut stmt = conn.prepare("SELECT * FROM tickets WHERE id = ?1")?;
    let ticket = stmt.query_row([id], map_ticket_row).optional()?;
    Ok(ticket)
}

pub fn load_all_tickets(conn: &Connection) -> AppResult<Vec<Ticket>> {
    let mut stmt = conn.prepare("SELECT * FROM tickets ORDER BY created_at ASC, id ASC")?;

    let rows = stmt.query_map([], map_ticket_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_items(conn: &Connection, ticket_id: i64) -> AppResult<Vec<LineItem>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM line_items
         WHERE ticket_id = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([ticket_id], map_item_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_item_by_code(
    conn: &Connection,
    ticket_id: i64,
    code: &str,
) -> AppResult<Option<LineItem>> {
    let mut stmt = conn.prepare("SELECT * FROM line_items WHERE ticket_id = ?1 AND code = ?2")?;
    let item = stmt
        .query_row(params![ticket_id, code], map_item_row)
        .optional()?;
    Ok(item)
}

pub fn count_items(conn: &Connection, ticket_id: i64) -> AppResult<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM line_items WHERE ticket_id = ?1",
        [ticket_id],
        |row| row.get(0),
    )?;
    Ok(n as usize)
}

/// Count of items NOT in the given status: the precondition probe used
/// before lifecycle advances.
pub fn count_items_not_in(
    conn: &Connection,
    ticket_id: i64,
    status: TicketStatus,
) -> AppResult<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM line_items WHERE ticket_id = ?1 AND status <> ?2",
        params![ticket_id, status.to_db_str()],
        |row| row.get(0),
    )?;
    Ok(n as usize)
}

/// Conditional claim: every awaiting item of the ticket moves to
/// in_sampling with the cabin and start stamp set. Returns the number
/// of rows actually updated; the caller verifies it against the item
/// count and rolls back on mismatch.
pub fn claim_items(
    conn: &Connection,
    ticket_id: i64,
    cabin: &str,
    started_at: &str,
) -> AppResult<usize> {
    let affected = conn.execute(
        "UPDATE line_items
         SET status = 'in_sampling', cabin = ?2, sample_started_at = ?3
         WHERE ticket_id = ?1 AND status = 'awaiting_sampling'",
        params![ticket_id, cabin, started_at],
    )?;
    Ok(affected)
}

/// in_sampling → awaiting_withdrawal, stamping the finish time.
pub fn finish_items(conn: &Connection, ticket_id: i64, finished_at: &str) -> AppResult<usize> {
    let affected = conn.execute(
        "UPDATE line_items
         SET status = 'awaiting_withdrawal', sample_finished_at = ?2
         WHERE ticket_id = ?1 AND status = 'in_sampling'",
        params![ticket_id, finished_at],
    )?;
    Ok(affected)
}

/// awaiting_withdrawal → finalized.
pub fn finalize_items(conn: &Connection, ticket_id: i64) -> AppResult<usize> {
    let affected = conn.execute(
        "UPDATE line_items
         SET status = 'finalized'
         WHERE ticket_id = ?1 AND status = 'awaiting_withdrawal'",
        params![ticket_id],
    )?;
    Ok(affected)
}

/// Update the editable fields of one item (description, quantity, batch).
pub fn update_item_fields(conn: &Connection, item: &LineItem) -> AppResult<()> {
    conn.execute(
        "UPDATE line_items
         SET description = ?1, quantity = ?2, batch = ?3
         WHERE id = ?4",
        params![item.description, item.quantity, item.batch, item.id],
    )?;
    Ok(())
}

pub fn rename_ticket(conn: &Connection, ticket_id: i64, new_number: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE tickets SET number = ?1 WHERE id = ?2",
        params![new_number, ticket_id],
    )?;
    Ok(())
}

pub fn delete_item(conn: &Connection, item_id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM line_items WHERE id = ?", [item_id])?;
    Ok(())
}

/// Hard delete: items first, then the ticket row.
pub fn delete_ticket_cascade(conn: &Connection, ticket_id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM line_items WHERE ticket_id = ?", [ticket_id])?;
    conn.execute("DELETE FROM tickets WHERE id = ?", [ticket_id])?;
    Ok(())
}

/// Item counts grouped by status, one O(n) scan.
pub fn count_items_by_status(conn: &Connection) -> AppResult<Vec<(TicketStatus, usize)>> {
    let mut stmt =
        conn.prepare("SELECT status, COUNT(*) FROM line_items GROUP BY status ORDER BY status")?;

    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (status_str, n) = r?;
        let status = TicketStatus::from_db_str(&status_str)
            .ok_or_else(|| AppError::InvalidStatus(status_str.clone()))?;
        out.push((status, n as usize));
    }
    Ok(out)
}
