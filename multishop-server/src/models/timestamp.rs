//! Timestamp precision shared by every adapter
//!
//! PostgreSQL `TIMESTAMPTZ` stores microseconds. Values are truncated to
//! that precision before they reach any store, so the in-memory adapters
//! return exactly what Postgres would.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};

/// Digits of sub-second precision the store keeps
pub const STORE_SUBSEC_DIGITS: u16 = 6;

/// Drop sub-microsecond digits.
pub fn store_precision(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(STORE_SUBSEC_DIGITS)
}

/// `deserialize_with` adapter for incoming DTO timestamps
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    DateTime::<Utc>::deserialize(deserializer).map(store_precision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Stamp {
        #[serde(deserialize_with = "deserialize")]
        at: DateTime<Utc>,
    }

    #[test]
    fn nanoseconds_are_truncated_to_micros() {
        let ts = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        assert_eq!(store_precision(ts).nanosecond(), 123_456_000);
    }

    #[test]
    fn whole_micros_are_unchanged() {
        let ts = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap()
            + chrono::Duration::microseconds(5);
        assert_eq!(store_precision(ts), ts);
    }

    #[test]
    fn deserialized_dates_use_store_precision() {
        let stamp: Stamp =
            serde_json::from_str(r#"{"at":"2025-12-31T00:00:00.123456789Z"}"#).unwrap();
        assert_eq!(stamp.at.to_rfc3339(), "2025-12-31T00:00:00.123456+00:00");
    }
}
