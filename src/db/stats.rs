use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let tickets: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))?;
    let items: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM line_items", [], |row| row.get(0))?;
    let runs: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM oee_records", [], |row| row.get(0))?;
    let pauses: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM pause_intervals", [], |row| row.get(0))?;
    let history: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;

    println!("{}• Tickets:{} {}{}{}", CYAN, RESET, GREEN, tickets, RESET);
    println!("{}• Line items:{} {}{}{}", CYAN, RESET, GREEN, items, RESET);
    println!("{}• OEE records:{} {}{}{}", CYAN, RESET, GREEN, runs, RESET);
    println!("{}• Pause intervals:{} {}{}{}", CYAN, RESET, GREEN, pauses, RESET);
    println!("{}• History entries:{} {}{}{}", CYAN, RESET, GREEN, history, RESET);

    //
    // 3) TICKET DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT created_at FROM tickets ORDER BY created_at ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT created_at FROM tickets ORDER BY created_at DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Ticket range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
