use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Finish sampling for a cabin's active ticket.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Finish { cabin } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        SessionLogic::finish(&mut pool, cabin)?;
    }

    Ok(())
}
