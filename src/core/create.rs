use crate::db::log::ntlog;
use crate::db::pool::DbPool;
use crate::db::tickets::{find_ticket_by_number, insert_item, insert_ticket};
use crate::errors::{AppError, AppResult};
use crate::models::ticket::{ItemInput, LineItem};
use crate::ui::messages::success;
use crate::utils::date;

/// High-level business logic for the `create` command.
pub struct CreateLogic;

/// Field-level validation shared by create and edit.
pub fn validate_item(item: &ItemInput) -> AppResult<()> {
    if item.code.trim().is_empty() {
        return Err(AppError::Validation("Item code cannot be blank.".into()));
    }
    if item.description.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "Item '{}': description cannot be blank.",
            item.code
        )));
    }
    if item.quantity <= 0.0 {
        return Err(AppError::Validation(format!(
            "Item '{}': quantity must be positive.",
            item.code
        )));
    }
    if item.batch.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "Item '{}': batch cannot be blank.",
            item.code
        )));
    }
    Ok(())
}

impl CreateLogic {
    pub fn apply(pool: &mut DbPool, number: &str, items: &[ItemInput]) -> AppResult<()> {
        // ------------------------------------------------
        // 1️⃣ VALIDATION (before any write)
        // ------------------------------------------------
        if number.trim().is_empty() {
            return Err(AppError::Validation("Ticket number cannot be blank.".into()));
        }

        if items.is_empty() {
            return Err(AppError::Validation(
                "A ticket needs at least one line item (--item).".into(),
            ));
        }

        for item in items {
            validate_item(item)?;
        }

        if find_ticket_by_number(&pool.conn, number)?.is_some() {
            return Err(AppError::Conflict(format!(
                "Ticket {} already exists.",
                number
            )));
        }

        // ------------------------------------------------
        // 2️⃣ PERSIST: ticket + items as one transaction
        // ------------------------------------------------
        let created_at = date::now_rfc3339();

        let tx = pool.conn.transaction()?;

        let ticket_id = insert_ticket(&tx, number, &created_at)?;

        for item in items {
            let li = LineItem::new(ticket_id, &item.code, &item.description, item.quantity, &item.batch);
            insert_item(&tx, &li)?;
        }

        ntlog(
            &tx,
            "create",
            &format!("tickets:{}", number),
            &format!("Created ticket with {} item(s)", items.len()),
        )?;

        tx.commit()?;

        success(format!(
            "Created ticket {} with {} item(s), awaiting sampling.",
            number,
            items.len()
        ));

        Ok(())
    }
}
