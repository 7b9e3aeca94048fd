//! Cell-level parsing helpers for the CSV loader.
//!
//! Source exports are inconsistent about formats: dates appear as ISO or
//! US-style, numeric columns sometimes carry a trailing `.0` from
//! float-typed exports, and any cell may be blank. All helpers here
//! degrade to `None` (or zero for counts) instead of failing.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parses a date cell. Accepts `YYYY-MM-DD`, `MM/DD/YYYY` and full ISO
/// datetimes (date part taken).
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(d);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Parses a time cell. Accepts `HH:MM:SS` and `HH:MM`.
#[must_use]
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
        return Some(t);
    }
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// Parses an integer cell, tolerating float-formatted exports like
/// `"2021.0"`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_int(s: &str) -> Option<i64> {
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.fract() == 0.0 && f.abs() < 9e15)
        .map(|f| f as i64)
}

/// Parses a non-negative count cell, degrading to 0 when missing,
/// negative or unparseable.
#[must_use]
pub fn parse_count(s: Option<&str>) -> u32 {
    s.and_then(parse_int)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

/// Parses a coordinate cell.
#[must_use]
pub fn parse_coord(s: &str) -> Option<f64> {
    s.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let d = parse_date("2021-04-14").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2021, 4, 14).unwrap());
    }

    #[test]
    fn parses_us_date() {
        let d = parse_date("04/14/2021").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2021, 4, 14).unwrap());
    }

    #[test]
    fn parses_datetime_date_part() {
        let d = parse_date("2021-04-14T17:30:00").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2021, 4, 14).unwrap());
    }

    #[test]
    fn rejects_garbage_date() {
        assert!(parse_date("not-a-date").is_none());
    }

    #[test]
    fn parses_times_with_and_without_seconds() {
        assert_eq!(
            parse_time("17:30:45"),
            NaiveTime::from_hms_opt(17, 30, 45)
        );
        assert_eq!(parse_time("17:30"), NaiveTime::from_hms_opt(17, 30, 0));
        assert!(parse_time("25:00").is_none());
    }

    #[test]
    fn parses_float_formatted_integers() {
        assert_eq!(parse_int("2021"), Some(2021));
        assert_eq!(parse_int("2021.0"), Some(2021));
        assert_eq!(parse_int("2021.5"), None);
        assert_eq!(parse_int("abc"), None);
    }

    #[test]
    fn counts_degrade_to_zero() {
        assert_eq!(parse_count(Some("3")), 3);
        assert_eq!(parse_count(Some("-1")), 0);
        assert_eq!(parse_count(Some("n/a")), 0);
        assert_eq!(parse_count(None), 0);
    }
}
