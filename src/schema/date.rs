//! Date encoding for date attributes
//!
//! Dates encode to epoch milliseconds (UTC). Formats are chrono
//! `strftime`-style strings used verbatim; no locale or time zone is applied.

use std::fmt::Write;

use chrono::format::{self, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, NaiveDateTime};

use crate::error::{Error, Result};

/// Parses `text` with `format`
///
/// Fields the format leaves out default to January, the first of the month
/// and midnight, so `%Y-%m` or `%Y-%m-%d` formats parse as well. A format
/// without a year cannot be resolved.
pub fn parse_millis(text: &str, format: &str) -> Option<f64> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
        return Some(dt.and_utc().timestamp_millis() as f64);
    }
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, StrftimeItems::new(format)).ok()?;
    fill_missing_fields(&mut parsed).ok()?;
    let date = parsed.to_naive_date().ok()?;
    let time = parsed.to_naive_time().ok()?;
    Some(date.and_time(time).and_utc().timestamp_millis() as f64)
}

fn fill_missing_fields(parsed: &mut Parsed) -> ParseResult<()> {
    let week_or_ordinal = parsed.ordinal().is_some()
        || parsed.isoweek().is_some()
        || parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some();
    if !week_or_ordinal {
        if parsed.month().is_none() {
            parsed.set_month(1)?;
        }
        if parsed.day().is_none() {
            parsed.set_day(1)?;
        }
    }
    if parsed.hour_div_12().is_none() && parsed.hour_mod_12().is_none() {
        parsed.set_hour(0)?;
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    Ok(())
}

/// Formats epoch milliseconds with `format`
pub fn format_millis(millis: f64, format: &str) -> Result<String> {
    if !millis.is_finite() {
        return Err(Error::Cast(format!("{} is not a date value", millis)));
    }
    let dt = DateTime::from_timestamp_millis(millis as i64)
        .ok_or_else(|| Error::Cast(format!("{} is out of the date range", millis)))?;
    let mut out = String::new();
    write!(out, "{}", dt.naive_utc().format(format))
        .map_err(|_| Error::Format(format!("invalid date format '{}'", format)))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_time() {
        assert_eq!(
            parse_millis("1970-01-01T00:00:01", "%Y-%m-%dT%H:%M:%S"),
            Some(1000.0)
        );
        assert_eq!(parse_millis("1970-01-02", "%Y-%m-%d"), Some(86_400_000.0));
        assert_eq!(parse_millis("yesterday", "%Y-%m-%d"), None);
    }

    #[test]
    fn test_partial_formats_fill_defaults() {
        let may = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis() as f64;
        assert_eq!(parse_millis("2024-05", "%Y-%m"), Some(may));
        assert_eq!(format_millis(may, "%Y-%m").unwrap(), "2024-05");
        assert_eq!(
            parse_millis("1970", "%Y"),
            Some(0.0)
        );
        assert_eq!(
            parse_millis("1970-01-01 10", "%Y-%m-%d %H"),
            Some(36_000_000.0)
        );
        assert_eq!(parse_millis("1970-032", "%Y-%j"), Some(31.0 * 86_400_000.0));
        assert_eq!(parse_millis("05-01", "%m-%d"), None);
    }

    #[test]
    fn test_format_round_trip() {
        let millis = parse_millis("2024-02-29", "%Y-%m-%d").unwrap();
        assert_eq!(format_millis(millis, "%Y-%m-%d").unwrap(), "2024-02-29");
        assert!(format_millis(f64::NAN, "%Y").is_err());
    }
}
