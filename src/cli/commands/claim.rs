use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::claim::ClaimLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Claim an awaiting ticket for a cabin.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Claim {
        number,
        cabin,
        operator,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        ClaimLogic::apply(&mut pool, cfg, number, cabin, operator)?;
    }

    Ok(())
}
