use crate::core::create::validate_item;
use crate::db::log::ntlog;
use crate::db::pool::DbPool;
use crate::db::tickets::{
    count_items, count_items_not_in, delete_item, find_item_by_code, find_ticket_by_number,
    insert_item, rename_ticket, update_item_fields,
};
use crate::errors::{AppError, AppResult};
use crate::models::ticket::{ItemInput, LineItem};
use crate::models::ticket_status::TicketStatus;
use crate::ui::messages::success;

/// High-level business logic for the `edit` command.
/// Only tickets nobody has claimed yet can be edited.
pub struct EditLogic;

impl EditLogic {
    pub fn apply(
        pool: &mut DbPool,
        number: &str,
        new_number: Option<&str>,
        item_edits: &[ItemInput],
        drop_codes: &[String],
    ) -> AppResult<()> {
        // ------------------------------------------------
        // 1️⃣ VALIDATION
        // ------------------------------------------------
        if new_number.is_none() && item_edits.is_empty() && drop_codes.is_empty() {
            return Err(AppError::Validation(
                "Nothing to do: specify --number, --item or --drop-item.".into(),
            ));
        }

        if let Some(n) = new_number
            && n.trim().is_empty()
        {
            return Err(AppError::Validation("Ticket number cannot be blank.".into()));
        }

        for item in item_edits {
            validate_item(item)?;
        }

        let ticket = find_ticket_by_number(&pool.conn, number)?
            .ok_or_else(|| AppError::TicketNotFound(number.to_string()))?;

        if count_items_not_in(&pool.conn, ticket.id, TicketStatus::AwaitingSampling)? > 0 {
            return Err(AppError::Conflict(format!(
                "Ticket {} was already claimed and can no longer be edited.",
                number
            )));
        }

        if let Some(n) = new_number
            && n != number
            && find_ticket_by_number(&pool.conn, n)?.is_some()
        {
            return Err(AppError::Conflict(format!("Ticket {} already exists.", n)));
        }

        // ------------------------------------------------
        // 2️⃣ APPLY: rename, upserts, deletes; one transaction
        // ------------------------------------------------
        let tx = pool.conn.transaction()?;

        let mut changes: Vec<String> = Vec::new();

        if let Some(n) = new_number
            && n != number
        {
            rename_ticket(&tx, ticket.id, n)?;
            changes.push(format!("renamed to {}", n));
        }

        // Upsert by item code
        for item in item_edits {
            match find_item_by_code(&tx, ticket.id, &item.code)? {
                Some(existing) => {
                    let updated = LineItem {
                        description: item.description.clone(),
                        quantity: item.quantity,
                        batch: item.batch.clone(),
                        ..existing
                    };
                    update_item_fields(&tx, &updated)?;
                    changes.push(format!("updated {}", item.code));
                }
                None => {
                    let li = LineItem::new(
                        ticket.id,
                        &item.code,
                        &item.description,
                        item.quantity,
                        &item.batch,
                    );
                    insert_item(&tx, &li)?;
                    changes.push(format!("added {}", item.code));
                }
            }
        }

        // Deletes by item code
        for code in drop_codes {
            let existing = find_item_by_code(&tx, ticket.id, code)?.ok_or_else(|| {
                AppError::Validation(format!("Ticket {} has no item '{}'.", number, code))
            })?;
            delete_item(&tx, existing.id)?;
            changes.push(format!("dropped {}", code));
        }

        // A ticket cannot be left without items; delete it instead.
        if count_items(&tx, ticket.id)? == 0 {
            return Err(AppError::Validation(format!(
                "Edit would leave ticket {} without items; use del instead.",
                number
            )));
        }

        ntlog(
            &tx,
            "edit",
            &format!("tickets:{}", number),
            &changes.join(", "),
        )?;

        tx.commit()?;

        success(format!("Ticket {} updated: {}.", number, changes.join(", ")));

        Ok(())
    }
}
