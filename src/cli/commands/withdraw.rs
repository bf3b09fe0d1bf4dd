use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::withdraw::WithdrawLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::history::SamplingType;

/// Record the withdrawal (baixa) of a ticket awaiting it.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Withdraw {
        number,
        sampling_type,
        notes,
    } = cmd
    {
        let parsed = SamplingType::from_code(sampling_type).ok_or_else(|| {
            AppError::InvalidSamplingType(format!(
                "'{}'. Use 'avr' or 'conventional'.",
                sampling_type
            ))
        })?;

        let mut pool = DbPool::new(&cfg.database)?;

        WithdrawLogic::apply(&mut pool, number, parsed, notes)?;
    }

    Ok(())
}
