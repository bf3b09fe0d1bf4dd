// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_period;
use chrono::NaiveDate;

/// Parse --range into inclusive date bounds.
///
/// Supports single periods (YYYY, YYYY-MM, YYYY-MM-DD) and
/// colon-separated intervals of two periods with the same granularity
/// (es. 2025-01:2025-06). The interval starts at the first day of the
/// left period and ends at the last day of the right one.
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::Validation(
                "Range start and end must have the same format.".into(),
            ));
        }

        let (d1, _) = parse_period(start)
            .ok_or_else(|| AppError::InvalidDate(start.to_string()))?;
        let (_, d2) = parse_period(end)
            .ok_or_else(|| AppError::InvalidDate(end.to_string()))?;

        if d2 < d1 {
            return Err(AppError::Validation(
                "Range end precedes range start.".into(),
            ));
        }

        Ok((d1, d2))
    } else {
        parse_period(r).ok_or_else(|| AppError::InvalidDate(r.to_string()))
    }
}
