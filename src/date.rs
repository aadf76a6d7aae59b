//! Canonical calendar-date handling.
//!
//! Every value a [`DateField`](crate::DateField) stores passes through
//! [`validate`]: the string must be an ISO 8601 calendar date written exactly
//! as `YYYY-MM-DD`, so parsing and re-formatting it reproduces the input byte
//! for byte.

use chrono::NaiveDate;

/// `chrono` format string of the canonical representation.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

const CANONICAL_LEN: usize = 10;

/// Returns the canonical form of `input`, or `None` when the input is empty,
/// malformed, names a day that does not exist, or is not already written in
/// canonical form (`2020-2-1` is rejected, not reformatted).
pub fn validate(input: Option<&str>) -> Option<String> {
    let input = input.filter(|raw| !raw.is_empty())?;
    let date = parse_canonical(input)?;
    Some(format_canonical(date))
}

/// Strict parse: only canonical `YYYY-MM-DD` strings produce a date.
pub fn parse_canonical(input: &str) -> Option<NaiveDate> {
    // chrono accepts unpadded fields and signed years; the length check and
    // the re-format comparison below reject both.
    if input.len() != CANONICAL_LEN {
        return None;
    }
    let date = NaiveDate::parse_from_str(input, CANONICAL_FORMAT).ok()?;
    if format_canonical(date) == input {
        Some(date)
    } else {
        None
    }
}

pub fn format_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}
