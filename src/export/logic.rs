// src/export/logic.rs

use crate::db::history::load_history;
use crate::db::oee::load_all_oee;
use crate::db::pool::DbPool;
use crate::db::tickets::{load_all_tickets, load_items};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::model::{
    HistoryExport, OeeExport, TicketExport, history_headers, history_to_row, oee_headers,
    oee_to_row, ticket_headers, ticket_to_row,
};
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportKind};
use crate::export::json_csv::{export_csv, export_json};
use crate::ui::messages::warning;
use crate::utils::date;
use chrono::NaiveDate;
use std::io;
use std::path::Path;

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Export one dataset.
    ///
    /// - `format`: csv | json | xlsx
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or period expressions like
    ///   `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `YYYY-MM:YYYY-MM`, ...
    pub fn export(
        pool: &mut DbPool,
        kind: ExportKind,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        ensure_writable(path, force)?;

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        match kind {
            ExportKind::Tickets => {
                let rows = load_ticket_rows(pool, bounds)?;
                if rows.is_empty() {
                    warning("⚠️  No tickets found for selected range.");
                    return Ok(());
                }
                match format {
                    ExportFormat::Csv => export_csv(&rows, path)?,
                    ExportFormat::Json => export_json(&rows, path)?,
                    ExportFormat::Xlsx => {
                        let table: Vec<Vec<String>> = rows.iter().map(ticket_to_row).collect();
                        export_xlsx(&ticket_headers(), &table, path)?
                    }
                }
            }
            ExportKind::History => {
                let rows = load_history_rows(pool, bounds)?;
                if rows.is_empty() {
                    warning("⚠️  No history entries found for selected range.");
                    return Ok(());
                }
                match format {
                    ExportFormat::Csv => export_csv(&rows, path)?,
                    ExportFormat::Json => export_json(&rows, path)?,
                    ExportFormat::Xlsx => {
                        let table: Vec<Vec<String>> = rows.iter().map(history_to_row).collect();
                        export_xlsx(&history_headers(), &table, path)?
                    }
                }
            }
            ExportKind::Oee => {
                let rows = load_oee_rows(pool, bounds)?;
                if rows.is_empty() {
                    warning("⚠️  No OEE records found for selected range.");
                    return Ok(());
                }
                match format {
                    ExportFormat::Csv => export_csv(&rows, path)?,
                    ExportFormat::Json => export_json(&rows, path)?,
                    ExportFormat::Xlsx => {
                        let table: Vec<Vec<String>> = rows.iter().map(oee_to_row).collect();
                        export_xlsx(&oee_headers(), &table, path)?
                    }
                }
            }
        }

        Ok(())
    }
}

fn within(ts: &str, bounds: Option<(NaiveDate, NaiveDate)>) -> bool {
    match bounds {
        None => true,
        Some((start, end)) => match date::date_of_timestamp(ts) {
            Some(d) => d >= start && d <= end,
            None => false,
        },
    }
}

/// One export row per line item, joined with its ticket.
fn load_ticket_rows(
    pool: &mut DbPool,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<TicketExport>> {
    let conn = &pool.conn;
    let mut out = Vec::new();

    for ticket in load_all_tickets(conn)? {
        if !within(&ticket.created_at, bounds) {
            continue;
        }

        for item in load_items(conn, ticket.id)? {
            out.push(TicketExport {
                ticket: ticket.number.clone(),
                created_at: ticket.created_at.clone(),
                code: item.code,
                description: item.description,
                quantity: item.quantity,
                batch: item.batch,
                status: item.status.to_db_str().to_string(),
                cabin: item.cabin,
                sample_started_at: item.sample_started_at,
                sample_finished_at: item.sample_finished_at,
            });
        }
    }

    Ok(out)
}

fn load_history_rows(
    pool: &mut DbPool,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<HistoryExport>> {
    let entries = load_history(&pool.conn)?;

    Ok(entries
        .into_iter()
        .filter(|e| within(&e.withdrawn_at, bounds))
        .map(|e| HistoryExport {
            ticket: e.ticket_number,
            sampling_type: e.sampling_type.to_db_str().to_string(),
            withdrawn_at: e.withdrawn_at,
            notes: e.notes,
        })
        .collect())
}

fn load_oee_rows(
    pool: &mut DbPool,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<OeeExport>> {
    let conn = &pool.conn;
    let mut out = Vec::new();

    for rec in load_all_oee(conn)? {
        if !within(&rec.started_at, bounds) {
            continue;
        }

        let ticket = crate::db::tickets::load_ticket(conn, rec.ticket_id)?
            .map(|t| t.number)
            .unwrap_or_else(|| format!("id {}", rec.ticket_id));

        out.push(OeeExport {
            ticket,
            cabin: rec.cabin,
            operator: rec.operator,
            started_at: rec.started_at,
            ended_at: rec.ended_at,
            elapsed_seconds: rec.elapsed_seconds,
            total_seconds: rec.total_seconds,
            status: rec.status.to_db_str().to_string(),
        });
    }

    Ok(out)
}
