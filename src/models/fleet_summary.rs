use serde::Serialize;

/// Fleet-level metrics recomputed on demand from current rows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FleetSummary {
    pub stage_counts: StageCounts,
    pub finished_runs: usize,
    pub avg_cycle_seconds: i64,
    pub efficiency_pct: f64,
    /// True when at least one run fell back to the count-based
    /// pause-time estimate instead of measured intervals.
    pub efficiency_estimated: bool,
}

/// Line-item counts grouped by lifecycle stage.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StageCounts {
    pub awaiting_sampling: usize,
    pub in_sampling: usize,
    pub awaiting_withdrawal: usize,
    pub finalized: usize,
}

impl StageCounts {
    pub fn total(&self) -> usize {
        self.awaiting_sampling + self.in_sampling + self.awaiting_withdrawal + self.finalized
    }
}
