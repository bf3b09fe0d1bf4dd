use crate::cli::commands::create::parse_item_spec;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::edit::EditLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Edit a ticket that has not been claimed yet.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        number,
        new_number,
        items,
        drop_items,
    } = cmd
    {
        let mut parsed = Vec::with_capacity(items.len());
        for spec in items {
            parsed.push(parse_item_spec(spec)?);
        }

        let mut pool = DbPool::new(&cfg.database)?;

        EditLogic::apply(
            &mut pool,
            number,
            new_number.as_deref(),
            &parsed,
            drop_items,
        )?;
    }

    Ok(())
}
