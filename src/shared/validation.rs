use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::shared::constants::MAX_SEARCH_LENGTH;

lazy_static! {
    /// Characters with meaning to PostgreSQL text search queries
    /// - `&`, `|`, `!` are boolean operators
    /// - `:` and `*` introduce weights and prefix matching
    /// - `(`, `)`, `\`, `<`, `>` group, escape and form phrase operators
    pub static ref SEARCH_OPERATOR_REGEX: Regex = Regex::new(r"[&|!:*()\\<>]").unwrap();

    /// Calendar date without time, e.g. "2024-01-31"
    static ref DATE_ONLY_REGEX: Regex = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap();

    /// Reduced precision dates: "2024" or "2024-06"
    static ref REDUCED_DATE_REGEX: Regex = Regex::new(r"^(\d{4})(?:-(\d{2}))?$").unwrap();
}

/// Keep at most `max` characters of `value`.
pub fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Strip text search operators, trim, then truncate to `MAX_SEARCH_LENGTH`.
pub fn sanitize_search(term: &str) -> String {
    let replaced = SEARCH_OPERATOR_REGEX.replace_all(term, " ");
    truncate_chars(replaced.trim(), MAX_SEARCH_LENGTH).to_string()
}

/// Parse a user supplied date or timestamp.
///
/// Accepts RFC 3339 timestamps, `YYYY`, `YYYY-MM` and `YYYY-MM-DD` (start of
/// the period, UTC), and `YYYY-MM-DD[T| ]HH:MM[:SS[.fff]]` with an optional
/// `+HHMM` offset. Values without an offset are read as UTC.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(caps) = DATE_ONLY_REGEX.captures(value) {
        return start_of_day(&caps[1], Some(&caps[2]), Some(&caps[3]));
    }

    if let Some(caps) = REDUCED_DATE_REGEX.captures(value) {
        return start_of_day(&caps[1], caps.get(2).map(|m| m.as_str()), None);
    }

    const WITH_OFFSET: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M:%S%.f%z",
        "%Y-%m-%dT%H:%M%z",
        "%Y-%m-%d %H:%M%z",
    ];
    if let Some(dt) = WITH_OFFSET
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE: [&str; 6] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    NAIVE
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Midnight UTC on the given calendar day; missing month or day means 1.
fn start_of_day(year: &str, month: Option<&str>, day: Option<&str>) -> Option<DateTime<Utc>> {
    let year = year.parse().ok()?;
    let month = month.map_or(Some(1), |m| m.parse().ok())?;
    let day = day.map_or(Some(1), |d| d.parse().ok())?;
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

/// Read a numeric query value. Empty, non-numeric and non-finite input
/// yields `None`; fractions are truncated toward zero.
pub fn parse_number(value: Option<&str>) -> Option<i64> {
    let raw = value?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sanitize_search_strips_operators() {
        assert_eq!(sanitize_search("test&|!:*"), "test");
        assert_eq!(sanitize_search("(sdk)"), "sdk");
        assert_eq!(sanitize_search("a<b>c"), "a b c");
        assert_eq!(sanitize_search(r"back\slash"), "back slash");
        assert_eq!(sanitize_search("   performance   "), "performance");
    }

    #[test]
    fn test_sanitize_search_truncates_after_trim() {
        let long = "a".repeat(200);
        assert_eq!(sanitize_search(&long), "a".repeat(100));

        // Leading operators become whitespace and are trimmed away before the cut
        let padded = format!("{}{}", "*".repeat(10), "b".repeat(100));
        assert_eq!(sanitize_search(&padded), "b".repeat(100));
    }

    #[test]
    fn test_sanitize_search_only_operators_is_empty() {
        assert_eq!(sanitize_search("&&||!!"), "");
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_parse_date_accepts_common_shapes() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2024-01-01"), Some(midnight));
        assert_eq!(parse_date("2024-01-01T00:00:00Z"), Some(midnight));
        assert_eq!(parse_date("2024-01-01T02:00:00+02:00"), Some(midnight));
        assert_eq!(parse_date("2024-01-01T00:00"), Some(midnight));
        assert_eq!(parse_date("2024-01-01T00:00:00.000"), Some(midnight));
    }

    #[test]
    fn test_parse_date_accepts_reduced_precision() {
        assert_eq!(
            parse_date("2024"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_date("2024-06"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_date("2024-13"), None);
        assert_eq!(parse_date("24"), None);
    }

    #[test]
    fn test_parse_date_accepts_space_separator_and_compact_offset() {
        let ten = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_date("2024-01-01 10:00:00"), Some(ten));
        assert_eq!(parse_date("2024-01-01 10:00"), Some(ten));
        assert_eq!(parse_date("2024-01-01T12:00:00.000+0200"), Some(ten));
        assert_eq!(parse_date("2024-01-01 12:00:00+0200"), Some(ten));
        assert_eq!(parse_date("2024-01-01T10:00:00Z"), Some(ten));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date("invalid"), None);
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(Some("50")), Some(50));
        assert_eq!(parse_number(Some(" -5 ")), Some(-5));
        assert_eq!(parse_number(Some("2.9")), Some(2));
        assert_eq!(parse_number(Some("abc")), None);
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("NaN")), None);
        assert_eq!(parse_number(None), None);
    }
}
