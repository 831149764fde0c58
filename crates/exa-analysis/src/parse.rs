//! Cell value parsing: numbers, dates, and boolean tokens.
//!
//! Parsing never fails loudly. A value that cannot be read as the requested
//! type yields `None` and the caller decides the fallback.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use exa_model::Scalar;

/// Years at or below this are not accepted as dates.
const MIN_DATE_YEAR: i32 = 1900;

const TRUE_TOKENS: [&str; 4] = ["true", "yes", "1", "on"];
const FALSE_TOKENS: [&str; 4] = ["false", "no", "0", "off"];

/// Parses the longest numeric prefix of a string.
///
/// Mirrors the lenient float parsing spreadsheet exports rely on:
/// - Leading whitespace is skipped: "  12" is 12
/// - Trailing garbage is ignored: "12kg" is 12
/// - Exponents only count when digits follow: "1e" is 1
/// - "Infinity" with an optional sign is accepted
///
/// Returns None when no digits start the string.
pub fn parse_float(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Reads a cell as a finite number.
///
/// Numbers pass through, text goes through [`parse_float`], booleans and
/// nulls are not numbers.
pub fn scalar_to_number(value: &Scalar) -> Option<f64> {
    let n = match value {
        Scalar::Number(n) => *n,
        Scalar::Text(s) => parse_float(s)?,
        Scalar::Null | Scalar::Bool(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Returns true when a cell counts as a number for type detection.
///
/// Follows [`scalar_to_number`], so "12kg" counts as 12. Text that also
/// parses as a date is not a number: "2024-01-15" is a date, not 2024.
pub fn is_numeric_value(value: &Scalar) -> bool {
    scalar_to_number(value).is_some() && !is_date_value(value)
}

/// Strips currency, percent, and thousands separators before parsing.
///
/// Used when coercing a numeric column: "$1,200" is 1200, "15%" is 15.
pub fn parse_formatted_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '%'))
        .collect();
    parse_float(&cleaned).filter(|n| n.is_finite())
}

/// Parses a date or datetime string.
///
/// Accepts ISO 8601 (with or without time and offset), slash and dash
/// separated US dates, and month-name forms. Years must be after 1900.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| try_parse_datetime(trimmed))
        .or_else(|| try_parse_date(trimmed).and_then(|d| d.and_hms_opt(0, 0, 0)))?;

    (parsed.year() > MIN_DATE_YEAR).then_some(parsed)
}

/// Returns true when a cell holds a parseable date string.
pub fn is_date_value(value: &Scalar) -> bool {
    value.as_text().is_some_and(|s| parse_date(s).is_some())
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%m/%d/%Y %H:%M:%S", // US
        "%m/%d/%Y %H:%M",
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",  // US: 01/15/2024
        "%m-%d-%Y",  // 01-15-2024
        "%d-%b-%Y",  // 15-Jan-2024
        "%b %d, %Y", // Jan 15, 2024
        "%B %d, %Y", // January 15, 2024
        "%b %d %Y",  // Jan 15 2024
        "%d %b %Y",  // 15 Jan 2024
        "%d %B %Y",  // 15 January 2024
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Formats a datetime as an ISO 8601 UTC timestamp with milliseconds.
pub fn format_iso_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Reads a cell as a boolean token.
///
/// Accepts native booleans, the numbers 0 and 1, and the case-insensitive
/// tokens true/false, yes/no, 1/0, on/off.
pub fn parse_boolean(value: &Scalar) -> Option<bool> {
    match value {
        Scalar::Bool(b) => Some(*b),
        Scalar::Number(n) if *n == 1.0 => Some(true),
        Scalar::Number(n) if *n == 0.0 => Some(false),
        Scalar::Text(s) => {
            let token = s.trim().to_ascii_lowercase();
            if TRUE_TOKENS.contains(&token.as_str()) {
                Some(true)
            } else if FALSE_TOKENS.contains(&token.as_str()) {
                Some(false)
            } else {
                None
            }
        }
        Scalar::Null | Scalar::Number(_) => None,
    }
}
