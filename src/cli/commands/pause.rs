use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::pause::PauseReason;

/// Pause a running cabin session with a reason.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Pause {
        cabin,
        reason,
        note,
    } = cmd
    {
        let parsed = PauseReason::from_code(reason).ok_or_else(|| {
            AppError::InvalidReason(format!(
                "'{}'. Use T (Troca de Turno), A (Almoço), M (Manutenção), R (Reunião) or O (Outros).",
                reason
            ))
        })?;

        let mut pool = DbPool::new(&cfg.database)?;

        SessionLogic::pause(&mut pool, cabin, parsed, note)?;
    }

    Ok(())
}
