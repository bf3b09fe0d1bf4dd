use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `history` table exists.
fn history_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='history'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `history` table has a `notes` column.
fn history_has_notes_column(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('history')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "notes" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the ticket/item tables with the modern schema.
fn create_ticket_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS tickets (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            number     TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS line_items (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            ticket_id          INTEGER NOT NULL REFERENCES tickets(id),
            code               TEXT NOT NULL,
            description        TEXT NOT NULL,
            quantity           REAL NOT NULL,
            batch              TEXT NOT NULL,
            status             TEXT NOT NULL DEFAULT 'awaiting_sampling'
                               CHECK(status IN ('awaiting_sampling','in_sampling','awaiting_withdrawal','finalized')),
            cabin              TEXT NOT NULL DEFAULT '',
            sample_started_at  TEXT NOT NULL DEFAULT '',
            sample_finished_at TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_line_items_ticket ON line_items(ticket_id);
        CREATE INDEX IF NOT EXISTS idx_line_items_status ON line_items(status);
        "#,
    )?;
    Ok(())
}

/// Create the session-tracking tables (OEE records + pause intervals).
fn create_session_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS oee_records (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            ticket_id       INTEGER NOT NULL REFERENCES tickets(id),
            cabin           TEXT NOT NULL,
            operator        TEXT NOT NULL,
            started_at      TEXT NOT NULL,
            ended_at        TEXT NOT NULL DEFAULT '',
            elapsed_seconds INTEGER NOT NULL DEFAULT 0,
            total_seconds   INTEGER NOT NULL DEFAULT 0,
            status          TEXT NOT NULL DEFAULT 'in_progress'
                            CHECK(status IN ('awaiting','in_progress','finished'))
        );

        CREATE TABLE IF NOT EXISTS pause_intervals (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            ticket_id  INTEGER NOT NULL,
            cabin      TEXT NOT NULL,
            reason     TEXT NOT NULL,
            note       TEXT NOT NULL DEFAULT '',
            started_at TEXT NOT NULL,
            ended_at   TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_oee_cabin_status ON oee_records(cabin, status);
        CREATE INDEX IF NOT EXISTS idx_pause_ticket ON pause_intervals(ticket_id, cabin);
        "#,
    )?;
    Ok(())
}

/// Create the withdrawal history table.
fn create_history_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS history (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            ticket_id     INTEGER NOT NULL,
            ticket_number TEXT NOT NULL,
            sampling_type TEXT NOT NULL CHECK(sampling_type IN ('AVR','Conventional')),
            withdrawn_at  TEXT NOT NULL,
            notes         TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_history_ticket ON history(ticket_id);
        "#,
    )?;
    Ok(())
}

/// Migrate a pre-0.4 `history` table to include the `notes` column.
fn migrate_add_notes_to_history(conn: &Connection) -> Result<(), Error> {
    let version = "20260318_0002_add_history_notes";

    // 1) Verifica se già applicata
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(()); // già applicata
    }

    if history_has_notes_column(conn)? {
        return Ok(()); // modern schema, nothing to do
    }

    // 2) Esegui la migrazione
    conn.execute(
        "ALTER TABLE history ADD COLUMN notes TEXT NOT NULL DEFAULT '';",
        [],
    )
    .map_err(|e| {
        Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some(format!("Failed to add 'notes' column: {}", e)),
        )
    })?;

    // 3) Marca come applicata
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added notes column to history')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'notes' to history table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Ensure the domain tables exist
    create_ticket_tables(conn)?;
    create_session_tables(conn)?;

    let history_exists = history_table_exists(conn)?;
    create_history_table(conn)?;

    // 3) Column upgrades for databases created before 0.4
    if history_exists {
        migrate_add_notes_to_history(conn)?;
    }

    // 4) Config-file migrations ride the same journal
    crate::config::migrate::migrate_add_pause_estimate(conn)?;

    Ok(())
}
