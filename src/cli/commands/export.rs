use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportKind, ExportLogic};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        tickets: _,
        history,
        oee,
        force,
    } = cmd
    {
        // Exactly one dataset; tickets is the default.
        let kind = if *history {
            ExportKind::History
        } else if *oee {
            ExportKind::Oee
        } else {
            ExportKind::Tickets
        };

        let mut pool = DbPool::new(&cfg.database)?;

        ExportLogic::export(&mut pool, kind, format.clone(), file, range, *force)?;
    }

    Ok(())
}
