use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, prompt};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { number, yes } = cmd {
        //
        // Confirmation prompt
        //
        if !*yes {
            let msg = format!(
                "Delete ticket {} and all its items? This action is irreversible.",
                number
            );

            if !prompt(&msg) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        //
        // Execute deletion
        //
        let mut pool = DbPool::new(&cfg.database)?;

        DeleteLogic::apply(&mut pool, number)?;
    }

    Ok(())
}
