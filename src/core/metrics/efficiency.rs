use crate::db::oee::pause_totals_for_run;
use crate::errors::AppResult;
use crate::models::oee::OeeRecord;
use rusqlite::Connection;

/// Fleet efficiency: `(Σ gross − Σ paused) / Σ gross`, clamped to
/// [0, 100] percent.
///
/// Pause time is the measured sum of closed intervals. A run whose
/// interval data is missing or unclosed falls back to the count-based
/// estimate (`pauses × estimate_minutes`); the second return value
/// flags that at least one run was estimated, so callers can label the
/// figure instead of presenting it as measured.
pub fn efficiency_pct(
    conn: &Connection,
    finished: &[OeeRecord],
    estimate_minutes: i64,
) -> AppResult<(f64, bool)> {
    let mut total_sum = 0i64;
    let mut pause_sum = 0i64;
    let mut estimated = false;

    for rec in finished {
        let (count, measured, unusable) = pause_totals_for_run(conn, rec.ticket_id, &rec.cabin)?;

        total_sum += rec.total_seconds;
        if unusable {
            pause_sum += count as i64 * estimate_minutes * 60;
            estimated = true;
        } else {
            pause_sum += measured;
        }
    }

    if total_sum <= 0 {
        return Ok((100.0, estimated));
    }

    let pct = ((total_sum - pause_sum) as f64 / total_sum as f64) * 100.0;
    Ok((pct.clamp(0.0, 100.0), estimated))
}
