use crate::models::oee::OeeRecord;

/// Mean gross duration across finished runs, in seconds.
pub fn avg_cycle_seconds(finished: &[OeeRecord]) -> i64 {
    if finished.is_empty() {
        return 0;
    }

    let sum: i64 = finished.iter().map(|r| r.total_seconds).sum();
    sum / finished.len() as i64
}
