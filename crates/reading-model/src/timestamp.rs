//! Timestamp Text Format
//!
//! Readings carry wall-clock timestamps at second granularity. They are written
//! as `YYYY-MM-DD HH:MM:SS`, which sorts lexicographically. ISO-8601 with a `T`
//! separator (optionally with fractional seconds) is accepted on input, as is
//! RFC 3339 with a `Z` or numeric offset, which is normalised to UTC.

use crate::ModelError;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

/// Layout used when writing timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ACCEPTED_FORMATS: [&str; 3] = [TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Render a timestamp in the file format
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp in any accepted layout
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, ModelError> {
    let text = text.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.naive_utc()))
        .ok_or_else(|| ModelError::InvalidTimestamp(text.to_string()))
}

pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(ts))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_timestamp(&text).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_layouts() {
        let a = parse_timestamp("2024-03-01 12:30:00").unwrap();
        let b = parse_timestamp("2024-03-01T12:30:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(format_timestamp(&a), "2024-03-01 12:30:00");
    }

    #[test]
    fn test_fractional_seconds_accepted() {
        let ts = parse_timestamp("2024-03-01T12:30:00.250").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-03-01 12:30:00");
    }

    #[test]
    fn test_utc_suffix_accepted() {
        let ts = parse_timestamp("2024-07-01T12:00:00Z").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-07-01 12:00:00");
    }

    #[test]
    fn test_offset_normalised_to_utc() {
        let ts = parse_timestamp("2024-07-01T14:00:00+02:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-07-01 12:00:00");

        let ts = parse_timestamp("2024-07-01T12:00:00.5-01:30").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-07-01 13:30:00");
    }

    #[test]
    fn test_invalid_timestamp() {
        assert_eq!(
            parse_timestamp("yesterday"),
            Err(ModelError::InvalidTimestamp("yesterday".to_string()))
        );
    }
}
