//! `google.protobuf.Timestamp` equivalent.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Largest valid `nanos` value.
const MAX_NANOS: u32 = 999_999_999;

/// Point in time as seconds and nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
    /// Whole seconds since `1970-01-01T00:00:00Z`.
    pub seconds: i64,
    /// Non-negative nanosecond offset within the second.
    pub nanos: i32,
}

impl Timestamp {
    /// Converts a UTC date-time.
    ///
    /// Leap-second nanosecond values are clamped into the valid range.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use protomap::schema::domain::Timestamp;
    ///
    /// let instant = Utc
    ///     .with_ymd_and_hms(2024, 1, 1, 0, 0, 5)
    ///     .single()
    ///     .expect("valid instant");
    /// let timestamp = Timestamp::from_datetime(instant);
    /// assert_eq!(timestamp.seconds, instant.timestamp());
    /// assert_eq!(timestamp.nanos, 0);
    /// ```
    #[must_use]
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        let nanos = instant.timestamp_subsec_nanos().min(MAX_NANOS);
        Self {
            seconds: instant.timestamp(),
            nanos: i32::try_from(nanos).unwrap_or_default(),
        }
    }

    /// Converts a calendar date, using midnight UTC.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_datetime(date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Converts back into a UTC date-time, if in range.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.nanos).ok()?;
        DateTime::from_timestamp(self.seconds, nanos)
    }

    /// Renders the RFC 3339 form used by the proto3 JSON mapping.
    #[must_use]
    pub fn to_rfc3339(self) -> Option<String> {
        self.to_datetime()
            .map(|instant| instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}
