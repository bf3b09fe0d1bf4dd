use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::tickets::{load_all_tickets, load_items};
use crate::errors::{AppError, AppResult};
use crate::models::ticket::LineItem;
use crate::models::ticket_status::TicketStatus;
use crate::utils::colors::{GREY, RESET};
use crate::utils::date;
use crate::utils::formatting::format_quantity;
use crate::utils::table::{Column, Table};

/// Shared stage of a ticket's items, or None when they disagree
/// (possible only on imported databases).
fn ticket_stage(items: &[LineItem]) -> Option<TicketStatus> {
    let first = items.first()?.status;
    if items.iter().all(|i| i.status == first) {
        Some(first)
    } else {
        None
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        status,
        cabin,
        period,
        items: show_items,
    } = cmd
    {
        //
        // 1. Parse filters
        //
        let status_filter = match status {
            Some(code) => Some(TicketStatus::from_code(code).ok_or_else(|| {
                AppError::InvalidStatus(format!(
                    "'{}'. Use awaiting, sampling, withdrawal or finalized.",
                    code
                ))
            })?),
            None => None,
        };

        let bounds = match period {
            Some(p) => Some(
                date::parse_period(p)
                    .ok_or_else(|| AppError::InvalidDate(p.to_string()))?,
            ),
            None => None,
        };

        //
        // 2. Load and filter
        //
        let pool = DbPool::new(&cfg.database)?;

        let mut table = Table::new(vec![
            Column {
                header: "TICKET".into(),
                width: 12,
            },
            Column {
                header: "CREATED".into(),
                width: 10,
            },
            Column {
                header: "ITEMS".into(),
                width: 5,
            },
            Column {
                header: "STATUS".into(),
                width: 14,
            },
            Column {
                header: "CABIN".into(),
                width: 10,
            },
        ]);

        let mut item_blocks: Vec<(String, Vec<LineItem>)> = Vec::new();
        let mut shown = 0usize;

        for ticket in load_all_tickets(&pool.conn)? {
            if let Some((start, end)) = bounds {
                match date::date_of_timestamp(&ticket.created_at) {
                    Some(d) if d >= start && d <= end => {}
                    _ => continue,
                }
            }

            let items = load_items(&pool.conn, ticket.id)?;
            if items.is_empty() {
                continue;
            }

            let stage = ticket_stage(&items);

            if let Some(wanted) = status_filter
                && stage != Some(wanted)
            {
                continue;
            }

            if let Some(c) = cabin
                && !items.iter().any(|i| &i.cabin == c)
            {
                continue;
            }

            let created = date::date_of_timestamp(&ticket.created_at)
                .map(|d| d.to_string())
                .unwrap_or_else(|| "--".into());

            let stage_label = match stage {
                Some(s) => s.label().to_string(),
                None => "mixed".to_string(),
            };

            let cabin_cell = items
                .iter()
                .find(|i| !i.cabin.is_empty())
                .map(|i| i.cabin.clone())
                .unwrap_or_else(|| "--".into());

            table.add_row(vec![
                ticket.number.clone(),
                created,
                items.len().to_string(),
                stage_label,
                cabin_cell,
            ]);

            if *show_items {
                item_blocks.push((ticket.number.clone(), items));
            }
            shown += 1;
        }

        //
        // 3. Render
        //
        if shown == 0 {
            println!("{}No tickets match the given filters.{}", GREY, RESET);
            return Ok(());
        }

        println!("{}", table.render(&cfg.separator_char));

        if *show_items {
            for (number, items) in item_blocks {
                println!("{}:", number);
                for i in items {
                    println!(
                        "  {} {} x{} (batch {}) — {}",
                        i.code,
                        i.description,
                        format_quantity(i.quantity),
                        i.batch,
                        i.status.label()
                    );
                }
                println!();
            }
        }
    }

    Ok(())
}
