//! Timestamp parsing for persisted records
//!
//! Ledger files written by the Python test harness carry ISO-8601 timestamps
//! without an offset (`2026-02-01T12:00:00.123456`). Those are read as UTC.
//! Everything is written back as RFC 3339.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};

/// RFC 3339, or a naive date-time taken as UTC
pub fn parse(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            text.parse::<NaiveDateTime>()
                .ok()
                .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
        })
}

fn parse_field<E: de::Error>(text: &str) -> Result<DateTime<Utc>, E> {
    parse(text).ok_or_else(|| E::custom(format!("invalid timestamp '{}'", text)))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_field(&text)
}

/// For `Option<DateTime<Utc>>` fields; pair with `#[serde(default)]`
pub mod option {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|text| parse_field(&text))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parses_offset_and_naive_forms() {
        let zulu = parse("2026-02-01T12:00:00Z").unwrap();
        let naive = parse("2026-02-01T12:00:00").unwrap();
        assert_eq!(zulu, naive);

        let python = parse("2026-02-01T12:00:00.123456").unwrap();
        assert_eq!(python.nanosecond(), 123_456_000);
        assert_eq!(python.day(), 1);

        let shifted = parse("2026-02-01T14:00:00+02:00").unwrap();
        assert_eq!(shifted, zulu);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse("yesterday").is_none());
        assert!(parse("").is_none());
    }
}
