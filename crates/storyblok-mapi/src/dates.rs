use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

/// Timestamp layout the Management API emits, e.g.
/// `2023-05-10T14:03:27.123456Z`: six fractional digits, literal `Z`.
const STORYBLOK_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Error for timestamps that do not match the Management API layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateError {
    input: String,
    reason: String,
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid Storyblok timestamp '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for DateError {}

/// Parse a Management API timestamp into a UTC datetime.
///
/// The layout is exactly `YYYY-MM-DDTHH:MM:SS.ffffffZ`. Offsets, a
/// missing or mis-sized fraction, or a missing `Z` are rejected rather
/// than guessed at; a timestamp that deviates means the payload is not
/// what this client was written against.
///
/// # Example
///
/// ```
/// use storyblok_mapi::parse_storyblok_date;
///
/// let ts = parse_storyblok_date("2023-05-10T14:03:27.123456Z").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2023-05-10T14:03:27.123456+00:00");
/// assert!(parse_storyblok_date("2023-05-10T14:03:27Z").is_err());
/// ```
pub fn parse_storyblok_date(input: &str) -> Result<DateTime<Utc>, DateError> {
    // When parsing, `%.6f` treats an absent fraction as valid and only
    // enforces the six-digit width once a dot is present. The shape is
    // pinned before chrono sees the input: 27 bytes with the dot at
    // byte 19 leaves room for exactly six fractional digits.
    if input.len() != 27 || input.as_bytes()[19] != b'.' {
        return Err(DateError {
            input: input.to_string(),
            reason: "does not match the 'YYYY-MM-DDTHH:MM:SS.ffffffZ' layout".to_string(),
        });
    }
    NaiveDateTime::parse_from_str(input, STORYBLOK_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| DateError {
            input: input.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_the_mapi_layout() {
        let ts = parse_storyblok_date("2023-05-10T14:03:27.123456Z").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2023, 5, 10));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (14, 3, 27));
        assert_eq!(ts.nanosecond(), 123_456_000);
    }

    #[test]
    fn rejects_missing_z() {
        assert!(parse_storyblok_date("2023-05-10T14:03:27.123456").is_err());
    }

    #[test]
    fn rejects_a_fraction_less_timestamp() {
        // The fraction is not optional.
        assert!(parse_storyblok_date("2023-05-10T14:03:27Z").is_err());
    }

    #[test]
    fn rejects_short_fractions() {
        assert!(parse_storyblok_date("2023-05-10T14:03:27.123Z").is_err());
        assert!(parse_storyblok_date("2023-05-10T14:03:27.1Z").is_err());
    }

    #[test]
    fn rejects_long_fractions() {
        assert!(parse_storyblok_date("2023-05-10T14:03:27.123456789Z").is_err());
    }

    #[test]
    fn rejects_numeric_offsets() {
        assert!(parse_storyblok_date("2023-05-10T14:03:27.123456+00:00").is_err());
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse_storyblok_date("2023-05-10T14:03:27.123456Zx").is_err());
    }

    #[test]
    fn error_names_the_input() {
        let err = parse_storyblok_date("yesterday").unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }
}
