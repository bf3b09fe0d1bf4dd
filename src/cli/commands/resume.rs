use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Resume a paused cabin session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Resume { cabin } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        SessionLogic::resume(&mut pool, cabin)?;
    }

    Ok(())
}
