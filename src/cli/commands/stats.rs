use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date;
use crate::utils::time::format_seconds;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { period } = cmd {
        let bounds = match period {
            Some(p) => Some(
                date::parse_period(p).ok_or_else(|| AppError::InvalidDate(p.to_string()))?,
            ),
            None => None,
        };

        let mut pool = DbPool::new(&cfg.database)?;

        let summary = Core::build_fleet_summary(&mut pool, cfg, bounds)?;
        let c = summary.stage_counts;

        println!();
        println!("{}📊 Fleet overview{}", CYAN, RESET);
        println!();
        println!("{}• Ag. Amostragem:{} {}", CYAN, RESET, c.awaiting_sampling);
        println!("{}• Em Amostragem:{}  {}", CYAN, RESET, c.in_sampling);
        println!("{}• Ag. Baixa:{}      {}", CYAN, RESET, c.awaiting_withdrawal);
        println!("{}• Finalizado:{}     {}", CYAN, RESET, c.finalized);
        println!("{}• Total items:{}    {}", CYAN, RESET, c.total());
        println!();

        if summary.finished_runs == 0 {
            println!("{}No finished runs yet — no cycle metrics.{}", GREY, RESET);
            println!();
            return Ok(());
        }

        println!(
            "{}• Finished runs:{}  {}{}{}",
            CYAN, RESET, GREEN, summary.finished_runs, RESET
        );
        println!(
            "{}• Avg cycle:{}      {}",
            CYAN,
            RESET,
            format_seconds(summary.avg_cycle_seconds)
        );

        let eff_label = if summary.efficiency_estimated {
            format!(
                "{:.1}% {}(estimated: missing pause data){}",
                summary.efficiency_pct, YELLOW, RESET
            )
        } else {
            format!("{:.1}%", summary.efficiency_pct)
        };
        println!("{}• Efficiency:{}     {}", CYAN, RESET, eff_label);
        println!();
    }

    Ok(())
}
