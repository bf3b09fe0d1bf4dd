use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::create::CreateLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::ticket::ItemInput;

/// Parse one `--item CODE:DESCRIPTION:QTY:BATCH` spec.
/// Shared with the edit command.
pub fn parse_item_spec(spec: &str) -> AppResult<ItemInput> {
    let parts: Vec<&str> = spec.splitn(4, ':').collect();

    if parts.len() != 4 {
        return Err(AppError::Validation(format!(
            "Invalid item spec '{}'. Expected CODE:DESCRIPTION:QTY:BATCH.",
            spec
        )));
    }

    let quantity: f64 = parts[2].trim().parse().map_err(|_| {
        AppError::Validation(format!(
            "Invalid quantity '{}' in item spec '{}'.",
            parts[2], spec
        ))
    })?;

    Ok(ItemInput {
        code: parts[0].trim().to_string(),
        description: parts[1].trim().to_string(),
        quantity,
        batch: parts[3].trim().to_string(),
    })
}

/// Create a work ticket with its line items.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Create { number, items } = cmd {
        //
        // 1. Parse item specs (mandatory, ≥1)
        //
        let mut parsed = Vec::with_capacity(items.len());
        for spec in items {
            parsed.push(parse_item_spec(spec)?);
        }

        //
        // 2. Open DB
        //
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 3. Execute logic
        //
        CreateLogic::apply(&mut pool, number, &parsed)?;
    }

    Ok(())
}
