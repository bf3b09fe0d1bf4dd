use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{RESET, color_for_run_state};
use crate::utils::time::format_seconds;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { cabin } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        let cabins: Vec<String> = match cabin {
            Some(c) => {
                if !cfg.knows_cabin(c) {
                    return Err(AppError::InvalidCabin(format!(
                        "'{}'. Configured cabins: {}",
                        c,
                        cfg.cabins.join(", ")
                    )));
                }
                vec![c.clone()]
            }
            None => cfg.cabins.clone(),
        };

        println!();

        for name in cabins {
            let session = SessionLogic::snapshot(&pool.conn, &name)?;

            let state = session.state.label();
            let color = color_for_run_state(state);

            match &session.ticket_number {
                Some(number) => {
                    println!(
                        "🏭 {:<10} {}{:<8}{} {} — operator {} — elapsed {} — {} pause(s)",
                        session.cabin,
                        color,
                        state,
                        RESET,
                        number,
                        session.operator.as_deref().unwrap_or("--"),
                        format_seconds(session.elapsed_seconds),
                        session.pause_count()
                    );

                    if let Some(open) = session.open_pause() {
                        println!("   ⏸️  paused since {} ({})", open.started_at, open.reason);
                    }
                }
                None => {
                    println!(
                        "🏭 {:<10} {}{:<8}{} no ticket claimed",
                        session.cabin, color, state, RESET
                    );
                }
            }
        }

        println!();
    }

    Ok(())
}
