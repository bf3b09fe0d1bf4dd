use crate::db::history::insert_history;
use crate::db::log::ntlog;
use crate::db::pool::DbPool;
use crate::db::tickets::{count_items, finalize_items, find_ticket_by_number};
use crate::errors::{AppError, AppResult};
use crate::models::history::{HistoryEntry, SamplingType};
use crate::ui::messages::success;
use crate::utils::date;

/// High-level business logic for the `withdraw` (baixa) command.
pub struct WithdrawLogic;

impl WithdrawLogic {
    pub fn apply(
        pool: &mut DbPool,
        number: &str,
        sampling_type: SamplingType,
        notes: &str,
    ) -> AppResult<()> {
        let ticket = find_ticket_by_number(&pool.conn, number)?
            .ok_or_else(|| AppError::TicketNotFound(number.to_string()))?;

        let now = date::now_rfc3339();

        let tx = pool.conn.transaction()?;

        // Conditional advance: every item must have been awaiting
        // withdrawal, otherwise roll back and report the conflict.
        let total = count_items(&tx, ticket.id)?;
        let affected = finalize_items(&tx, ticket.id)?;

        if affected != total || total == 0 {
            return Err(AppError::Conflict(format!(
                "Ticket {} is not fully awaiting withdrawal ({}/{} items ready).",
                number, affected, total
            )));
        }

        let entry = HistoryEntry {
            id: 0,
            ticket_id: ticket.id,
            ticket_number: ticket.number.clone(),
            sampling_type,
            withdrawn_at: now,
            notes: notes.trim().to_string(),
        };
        insert_history(&tx, &entry)?;

        ntlog(
            &tx,
            "withdraw",
            &format!("tickets:{}", number),
            &format!("Withdrawal recorded as {}", sampling_type.to_db_str()),
        )?;

        tx.commit()?;

        success(format!(
            "Ticket {} finalized — withdrawal recorded as {}.",
            number,
            sampling_type.to_db_str()
        ));

        Ok(())
    }
}
