// crates/sincer-core/src/record.rs - The record entity

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DEFAULT_COLOR;

/// A named point in time: "time since X"
///
/// `since` is kept at millisecond precision so that a record written to disk
/// and read back compares equal to the one in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique among the records of one config
    pub name: String,
    /// The moment the timer counts from
    pub since: DateTime<Utc>,
    /// Display colour as a hex string, e.g. `#ff8800`
    pub color: String,
}

impl Record {
    /// Create a record, defaulting the colour to white
    pub fn new<S: Into<String>>(name: S, since: DateTime<Utc>, color: Option<String>) -> Self {
        Self {
            name: name.into(),
            since: since.trunc_subsecs(3),
            color: color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        }
    }

    /// Create a record that starts counting now
    pub fn starting_now<S: Into<String>>(name: S) -> Self {
        Self::new(name, Utc::now(), None)
    }

    /// The `since` timestamp in the on-disk form (`2024-04-13T10:30:00.000Z`)
    pub fn since_string(&self) -> String {
        self.since.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Time elapsed between `since` and `now`; negative for future dates
    pub fn elapsed(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.since)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (since {})", self.name, self.since_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_record_defaults() {
        let record = Record::starting_now("coffee");
        assert_eq!(record.name, "coffee");
        assert_eq!(record.color, "#ffffff");
        assert!(record.elapsed(Utc::now()).num_seconds() < 5);
    }

    #[test]
    fn test_since_is_truncated_to_millis() {
        let since = Utc.timestamp_nanos(1_700_000_000_123_456_789);
        let record = Record::new("a", since, Some("#00ff00".to_string()));
        assert_eq!(record.since.timestamp_subsec_nanos(), 123_000_000);
        assert_eq!(record.since_string(), "2023-11-14T22:13:20.123Z");
        assert_eq!(record.color, "#00ff00");
    }

    #[test]
    fn test_display() {
        let since = Utc.with_ymd_and_hms(2024, 4, 13, 10, 30, 0).unwrap();
        let record = Record::new("walk", since, None);
        assert_eq!(record.to_string(), "walk (since 2024-04-13T10:30:00.000Z)");
    }
}
