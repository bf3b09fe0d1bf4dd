use crate::config::Config;
use crate::db::log::ntlog;
use crate::db::oee::{active_oee_for_cabin, insert_oee};
use crate::db::pool::DbPool;
use crate::db::tickets::{claim_items, count_items, find_ticket_by_number};
use crate::errors::{AppError, AppResult};
use crate::models::oee::{OeeRecord, OeeStatus};
use crate::ui::messages::success;
use crate::utils::date;

/// High-level business logic for the `claim` command: a cabin takes an
/// awaiting ticket and its timer starts.
pub struct ClaimLogic;

/// Operator badges are five ASCII digits. The original system only
/// checked this in the UI; here it is a hard precondition.
pub fn validate_operator(operator: &str) -> AppResult<()> {
    if operator.len() != 5 || !operator.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(format!(
            "Operator id must be exactly 5 digits, got '{}'.",
            operator
        )));
    }
    Ok(())
}

impl ClaimLogic {
    pub fn apply(
        pool: &mut DbPool,
        cfg: &Config,
        number: &str,
        cabin: &str,
        operator: &str,
    ) -> AppResult<()> {
        // ------------------------------------------------
        // 1️⃣ VALIDATION
        // ------------------------------------------------
        validate_operator(operator)?;

        if !cfg.knows_cabin(cabin) {
            return Err(AppError::InvalidCabin(format!(
                "'{}'. Configured cabins: {}",
                cabin,
                cfg.cabins.join(", ")
            )));
        }

        let ticket = find_ticket_by_number(&pool.conn, number)?
            .ok_or_else(|| AppError::TicketNotFound(number.to_string()))?;

        // One non-finished run per cabin, always.
        if let Some(active) = active_oee_for_cabin(&pool.conn, cabin)? {
            return Err(AppError::Conflict(format!(
                "{} is busy (ticket id {} still open). Finish it first.",
                cabin, active.ticket_id
            )));
        }

        // ------------------------------------------------
        // 2️⃣ CLAIM: conditional update, one transaction
        // ------------------------------------------------
        let now = date::now_rfc3339();

        let tx = pool.conn.transaction()?;

        let total = count_items(&tx, ticket.id)?;
        let affected = claim_items(&tx, ticket.id, cabin, &now)?;

        if affected != total || total == 0 {
            // Someone else advanced the ticket between our read and this
            // write, or it has no items. Dropping the transaction rolls
            // everything back and no item is left half-claimed.
            return Err(AppError::Conflict(format!(
                "Ticket {} is no longer fully awaiting sampling ({}/{} items claimable).",
                number, affected, total
            )));
        }

        let rec = OeeRecord {
            id: 0,
            ticket_id: ticket.id,
            cabin: cabin.to_string(),
            operator: operator.to_string(),
            started_at: now.clone(),
            ended_at: String::new(),
            elapsed_seconds: 0,
            total_seconds: 0,
            status: OeeStatus::InProgress,
        };
        insert_oee(&tx, &rec)?;

        ntlog(
            &tx,
            "claim",
            &format!("tickets:{}", number),
            &format!("Claimed by {} (operator {})", cabin, operator),
        )?;

        tx.commit()?;

        success(format!(
            "Ticket {} claimed by {} — sampling started, timer at 00:00:00.",
            number, cabin
        ));

        Ok(())
    }
}
