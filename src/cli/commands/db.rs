use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::check::{repair_orphan_pauses, run_consistency_scan};
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        repair,
        vacuum,
        info,
    } = cmd
    {
        // Unica istanza condivisa
        let mut pool: Option<DbPool> = None;

        // Helper per ottenere il DbPool (NON closure!)
        fn get_pool<'a>(pool: &'a mut Option<DbPool>, db_path: &str) -> AppResult<&'a mut DbPool> {
            if pool.is_none() {
                *pool = Some(DbPool::new(db_path)?);
            }
            Ok(pool.as_mut().expect("pool initialized above"))
        }

        //
        // 1) MIGRATE
        //
        if *migrate {
            let pool = get_pool(&mut pool, &cfg.database)?;
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            run_pending_migrations(&pool.conn)?;
            println!("{}✔ Migration completed.{}\n", GREEN, RESET);
        }

        //
        // 2) INFO
        //
        if *info {
            let pool = get_pool(&mut pool, &cfg.database)?;
            stats::print_db_info(pool, &cfg.database)?;
        }

        //
        // 3) CHECK: PRAGMA integrity + domain consistency
        //
        if *check {
            let pool = get_pool(&mut pool, &cfg.database)?;

            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
            }

            println!("{}▶ Running consistency scan…{}", CYAN, RESET);

            let findings = run_consistency_scan(pool)?;
            if findings.is_empty() {
                println!("{}✔ No domain inconsistencies found.{}\n", GREEN, RESET);
            } else {
                for f in &findings {
                    println!("{}• [{}]{} {}", YELLOW, f.table, RESET, f.detail);
                }
                println!(
                    "{}✘ {} inconsistency(ies) found. Run with --repair to fix orphan pauses.{}\n",
                    RED,
                    findings.len(),
                    RESET
                );
            }
        }

        //
        // 4) REPAIR
        //
        if *repair {
            let pool = get_pool(&mut pool, &cfg.database)?;
            println!("{}▶ Repairing orphan pause intervals…{}", CYAN, RESET);

            let closed = repair_orphan_pauses(pool)?;
            println!("{}✔ Closed {} orphan pause interval(s).{}\n", GREEN, closed, RESET);
        }

        //
        // 5) VACUUM
        //
        if *vacuum {
            let pool = get_pool(&mut pool, &cfg.database)?;
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);

            pool.conn.execute_batch("VACUUM;")?;

            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
