// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Timestamp normalization for marker and phase lines
//!
//! Ginkgo marker lines carry `MM/DD/YY hh:mm:ss` timestamps with zero to
//! three fractional-second digits. Phase lines (backup/restore progress)
//! embed a timestamp somewhere in the line, in either two- or four-digit
//! year form.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::LogError;

/// Candidate formats for marker timestamps, tried in order.
///
/// `%.f` accepts a dot followed by one to nine fractional digits, which
/// covers the one- to three-digit fractions Ginkgo emits; the bare format
/// handles lines without a fraction.
const MARKER_FORMATS: &[&str] = &["%m/%d/%y %H:%M:%S%.f", "%m/%d/%y %H:%M:%S"];

/// Parse the timestamp text captured from an Enter/Exit marker.
///
/// The first format that parses wins. Ordering matters only for
/// performance: the formats are mutually exclusive on the same input.
///
/// # Errors
///
/// Returns `LogError::Timestamp` if no format matches.
pub fn parse_marker_time(text: &str) -> Result<NaiveDateTime, LogError> {
    let text = text.trim();
    for format in MARKER_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(parsed);
        }
    }
    Err(LogError::Timestamp {
        text: text.to_string(),
    })
}

/// Timestamp shapes recognized inside arbitrary log lines, paired with the
/// chrono format used to parse the match. Four-digit years are tried before
/// two-digit years so that `2024/01/02` is not misread from its tail.
static LINE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (
            r"\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}\.\d{3}",
            "%Y/%m/%d %H:%M:%S%.f",
        ),
        (
            r"\d{2}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}\.\d{3}",
            "%m/%d/%y %H:%M:%S%.f",
        ),
        (r"\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}", "%Y/%m/%d %H:%M:%S"),
        (r"\d{2}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}", "%m/%d/%y %H:%M:%S"),
    ]
    .iter()
    .map(|(pattern, format)| {
        (
            Regex::new(pattern).expect("static timestamp pattern"),
            *format,
        )
    })
    .collect()
});

/// Find and parse a timestamp substring anywhere in a log line.
///
/// Best-effort: used for phase (backup/restore) event timing, where the
/// timestamp is embedded in free-form text. Returns `None` when no known
/// shape appears or the matched text does not parse.
#[must_use]
pub fn scan_line_time(line: &str) -> Option<NaiveDateTime> {
    for (pattern, format) in LINE_PATTERNS.iter() {
        if let Some(found) = pattern.find(line) {
            return NaiveDateTime::parse_from_str(found.as_str(), format).ok();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use similar_asserts::assert_eq;

    #[test]
    fn test_parse_marker_time_three_digit_fraction() {
        let parsed = parse_marker_time("01/02/24 10:00:05.123").expect("should parse");
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_milli_opt(10, 0, 5, 123)
            .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_marker_time_short_fractions() {
        let two = parse_marker_time("01/02/24 10:00:05.12").expect("should parse");
        assert_eq!(two.nanosecond(), 120_000_000);

        let one = parse_marker_time("01/02/24 10:00:05.1").expect("should parse");
        assert_eq!(one.nanosecond(), 100_000_000);
    }

    #[test]
    fn test_parse_marker_time_no_fraction() {
        let parsed = parse_marker_time("01/02/24 10:00:05").expect("should parse");
        assert_eq!(parsed.nanosecond(), 0);
    }

    #[test]
    fn test_parse_marker_time_rejects_garbage() {
        assert!(parse_marker_time("not-a-time").is_err());
        assert!(parse_marker_time("").is_err());
        assert!(parse_marker_time("2024-01-02T10:00:05Z").is_err());
    }

    #[test]
    fn test_scan_line_time_four_digit_year() {
        let line = "2024/01/02 10:01:00 Creating backup for case mysql";
        let found = scan_line_time(line).expect("should find timestamp");
        assert_eq!(
            found,
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(10, 1, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_scan_line_time_two_digit_year_with_fraction() {
        let line = "STEP: done @ 01/02/24 10:01:00.500";
        let found = scan_line_time(line).expect("should find timestamp");
        assert_eq!(found.nanosecond(), 500_000_000);
    }

    #[test]
    fn test_scan_line_time_none_present() {
        assert!(scan_line_time("no timestamps here").is_none());
    }
}
