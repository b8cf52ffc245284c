//! Display formatting for loosely-typed sheet values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

pub const DATE_FALLBACK: &str = "Unknown";
pub const ETA_FALLBACK: &str = "Not set";

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%b %d %Y",
];
// `Date.toString()` form, e.g. `Thu Nov 27 2025 00:00:00 GMT-0500`.
const ZONED_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Render a date as `Mon D, YYYY`.
///
/// Falsy input (`null`, `""`, `0`, `false`) yields `fallback`. A string that
/// does not parse is returned unchanged; any other unparseable value yields
/// `fallback`. Instants are rendered by their UTC calendar date.
pub fn format_date(value: &Value, fallback: &str) -> String {
    let falsy = match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    };
    if falsy {
        return fallback.to_string();
    }

    match parse_date(value) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => match value {
            Value::String(s) => s.clone(),
            _ => fallback.to_string(),
        },
    }
}

pub fn format_eta(value: &Value) -> String {
    format_date(value, ETA_FALLBACK)
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_str(s.trim()),
        // Numbers are epoch milliseconds.
        Value::Number(n) => n
            .as_f64()
            .filter(|ms| ms.is_finite())
            .and_then(|ms| DateTime::<Utc>::from_timestamp_millis(ms as i64))
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(strip_zone_name(s), ZONED_FORMAT) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Drop a trailing `(Eastern Standard Time)` style zone name.
fn strip_zone_name(s: &str) -> &str {
    match s.rfind(" (") {
        Some(idx) if s.ends_with(')') => s[..idx].trim_end(),
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn iso_instant() {
        assert_eq!(
            format_date(&json!("2025-11-27T08:00:00.000Z"), DATE_FALLBACK),
            "Nov 27, 2025"
        );
    }

    #[test]
    fn date_only_and_sheet_formats() {
        assert_eq!(format_date(&json!("2025-03-04"), "x"), "Mar 4, 2025");
        assert_eq!(format_date(&json!("2025-03-04 13:45:00"), "x"), "Mar 4, 2025");
        assert_eq!(format_date(&json!("2025-03-04T13:45:00"), "x"), "Mar 4, 2025");
        assert_eq!(format_date(&json!("11/27/2025"), "x"), "Nov 27, 2025");
        assert_eq!(
            format_date(&json!("Thu, 27 Nov 2025 10:00:00 +0000"), "x"),
            "Nov 27, 2025"
        );
    }

    #[test]
    fn date_to_string_form() {
        assert_eq!(
            format_date(
                &json!("Thu Nov 27 2025 00:00:00 GMT-0500 (Eastern Standard Time)"),
                "fallback"
            ),
            "Nov 27, 2025"
        );
        assert_eq!(
            format_date(&json!("Thu Nov 27 2025 10:00:00 GMT+0000"), "fallback"),
            "Nov 27, 2025"
        );
    }

    #[test]
    fn long_month_name() {
        assert_eq!(format_date(&json!("November 27, 2025"), "fallback"), "Nov 27, 2025");
    }

    #[test]
    fn short_month_name_with_comma() {
        assert_eq!(format_date(&json!("Nov 27, 2025"), "fallback"), "Nov 27, 2025");
    }

    #[test]
    fn short_month_name_without_comma() {
        assert_eq!(format_date(&json!("Nov 27 2025"), "fallback"), "Nov 27, 2025");
    }

    #[test]
    fn slash_separated_iso_date() {
        assert_eq!(format_date(&json!("2025/11/27"), "fallback"), "Nov 27, 2025");
    }

    #[test]
    fn epoch_millis() {
        assert_eq!(format_date(&json!(1_764_230_400_000_i64), "x"), "Nov 27, 2025");
    }

    #[test]
    fn falsy_input_returns_fallback() {
        assert_eq!(format_date(&Value::Null, "fallback"), "fallback");
        assert_eq!(format_date(&json!(""), "fallback"), "fallback");
        assert_eq!(format_date(&json!(0), "fallback"), "fallback");
        assert_eq!(format_date(&json!(false), "fallback"), "fallback");
    }

    #[test]
    fn unparseable_string_is_returned_unchanged() {
        assert_eq!(format_date(&json!("next week"), "fallback"), "next week");
        assert_eq!(format_date(&json!("TBD"), DATE_FALLBACK), "TBD");
    }

    #[test]
    fn unparseable_non_string_returns_fallback() {
        assert_eq!(format_date(&json!({"when": "soon"}), "fallback"), "fallback");
        assert_eq!(format_date(&json!([1, 2]), "fallback"), "fallback");
    }

    #[test]
    fn eta_defaults_to_not_set() {
        assert_eq!(format_eta(&Value::Null), "Not set");
        assert_eq!(format_eta(&json!("2026-01-09")), "Jan 9, 2026");
    }

    #[test]
    fn output_matches_month_day_year_pattern() {
        for input in ["2024-02-29", "2025-12-31T23:59:59Z", "1/2/2025"] {
            let out = format_date(&json!(input), "fallback");
            let (month, rest) = out.split_once(' ').unwrap();
            let (day, year) = rest.split_once(", ").unwrap();
            assert_eq!(month.len(), 3, "{out}");
            assert!(day.parse::<u32>().is_ok(), "{out}");
            assert_eq!(year.len(), 4, "{out}");
        }
    }
}
