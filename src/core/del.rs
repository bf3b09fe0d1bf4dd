use crate::db::log::ntlog;
use crate::db::pool::DbPool;
use crate::db::tickets::{
    count_items, count_items_not_in, delete_ticket_cascade, find_ticket_by_number,
};
use crate::errors::{AppError, AppResult};
use crate::models::ticket_status::TicketStatus;
use crate::ui::messages::info;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Hard delete of a ticket and its items. Irreversible, and only
    /// allowed while the whole ticket is still awaiting sampling.
    pub fn apply(pool: &mut DbPool, number: &str) -> AppResult<()> {
        let ticket = find_ticket_by_number(&pool.conn, number)?
            .ok_or_else(|| AppError::TicketNotFound(number.to_string()))?;

        if count_items_not_in(&pool.conn, ticket.id, TicketStatus::AwaitingSampling)? > 0 {
            return Err(AppError::Conflict(format!(
                "Ticket {} was already claimed and cannot be deleted.",
                number
            )));
        }

        let items = count_items(&pool.conn, ticket.id)?;

        let tx = pool.conn.transaction()?;

        delete_ticket_cascade(&tx, ticket.id)?;

        ntlog(
            &tx,
            "del",
            &format!("tickets:{}", number),
            &format!("Deleted ticket and {} item(s)", items),
        )?;

        tx.commit()?;

        info(format!("Deleted ticket {} and {} item(s).", number, items));
        Ok(())
    }
}
