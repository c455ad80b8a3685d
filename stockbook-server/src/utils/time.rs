//! Time helpers
//!
//! All date-string parsing happens at the API handler layer; the repository
//! layer only ever sees `i64` Unix millis.

use chrono::{Duration, NaiveDate, Utc};

use crate::utils::{AppError, AppResult};

/// Current time as Unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Unix millis `days` days from now
pub fn millis_days_from_now(days: i64) -> i64 {
    (Utc::now() + Duration::days(days)).timestamp_millis()
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Start of day (00:00:00 UTC) as Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc()
        .timestamp_millis()
}

/// End of day as Unix millis: next day's 00:00:00 minus 1ms, so callers can
/// use inclusive `<= end` semantics on created_at.
pub fn day_end_millis(date: NaiveDate) -> i64 {
    let next = date.succ_opt().unwrap_or(date);
    day_start_millis(next) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let d = parse_date("2025-03-09").unwrap();
        assert_eq!(d.to_string(), "2025-03-09");
        assert!(parse_date("09/03/2025").is_err());
    }

    #[test]
    fn day_bounds_are_inclusive() {
        let d = parse_date("2025-03-09").unwrap();
        let start = day_start_millis(d);
        let end = day_end_millis(d);
        assert_eq!(end - start, 24 * 3600 * 1000 - 1);
    }
}
