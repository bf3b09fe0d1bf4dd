use crate::config::Config;
use crate::core::metrics::{counts, cycle, efficiency};
use crate::db::oee::load_finished_oee;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::fleet_summary::FleetSummary;
use crate::utils::date;
use chrono::NaiveDate;

pub struct Core;

impl Core {
    /// Recompute the fleet metrics from current rows. No caching: the
    /// summary is as fresh as the store at the moment of the call.
    /// Optional bounds restrict the cycle/efficiency metrics to runs
    /// started within the period; stage counts always cover everything.
    pub fn build_fleet_summary(
        pool: &mut DbPool,
        cfg: &Config,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<FleetSummary> {
        let stage_counts = counts::stage_counts(&pool.conn)?;
        let mut finished = load_finished_oee(&pool.conn)?;

        if let Some((start, end)) = bounds {
            finished.retain(|r| match date::date_of_timestamp(&r.started_at) {
                Some(d) => d >= start && d <= end,
                None => false,
            });
        }

        let avg_cycle_seconds = cycle::avg_cycle_seconds(&finished);
        let (efficiency_pct, efficiency_estimated) =
            efficiency::efficiency_pct(&pool.conn, &finished, cfg.pause_estimate_minutes)?;

        Ok(FleetSummary {
            stage_counts,
            finished_runs: finished.len(),
            avg_cycle_seconds,
            efficiency_pct,
            efficiency_estimated,
        })
    }
}
