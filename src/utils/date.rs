use chrono::{DateTime, Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a `--period` filter into inclusive date bounds.
/// Accepts YYYY, YYYY-MM and YYYY-MM-DD.
pub fn parse_period(p: &str) -> Option<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        7 => {
            let y: i32 = p[0..4].parse().ok()?;
            let m: u32 = p[5..7].parse().ok()?;
            let start = NaiveDate::from_ymd_opt(y, m, 1)?;
            let end = if m == 12 {
                NaiveDate::from_ymd_opt(y + 1, 1, 1)?
            } else {
                NaiveDate::from_ymd_opt(y, m + 1, 1)?
            }
            .pred_opt()?;
            Some((start, end))
        }
        10 => {
            let d = parse_date(p)?;
            Some((d, d))
        }
        _ => None,
    }
}

/// Current instant, formatted the way every timestamp column stores it.
pub fn now_rfc3339() -> String {
    Local::now().to_rfc3339()
}

/// Parse one of our stored RFC 3339 timestamps.
pub fn parse_rfc3339(s: &str) -> Option<DateTime<chrono::FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

/// Calendar date part of a stored timestamp, for period filtering.
pub fn date_of_timestamp(s: &str) -> Option<NaiveDate> {
    parse_rfc3339(s).map(|dt| dt.date_naive())
}

/// Seconds between two stored timestamps; negative spans are clamped
/// to zero (clock skew on reused databases).
pub fn seconds_between(start: &str, end: &str) -> Option<i64> {
    let s = parse_rfc3339(start)?;
    let e = parse_rfc3339(end)?;
    Some((e - s).num_seconds().max(0))
}

/// Seconds from a stored timestamp until now, clamped to zero.
pub fn seconds_since(start: &str) -> Option<i64> {
    let s = parse_rfc3339(start)?;
    Some((Local::now().fixed_offset() - s).num_seconds().max(0))
}
