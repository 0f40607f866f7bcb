//! Temporal values accepted by the filter
//!
//! [`Temporal`] is the structured calendar/clock family, [`LegacyInstant`] the
//! plain point in time used by the legacy path.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::error::ShiftError;
use crate::zone::ResolvedZone;

/// Runtime kind of a [`Temporal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    Date,
    Time,
    DateTime,
    ZonedDateTime,
    OffsetDateTime,
    Instant,
}

impl fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemporalKind::Date => "date",
            TemporalKind::Time => "time",
            TemporalKind::DateTime => "date-time",
            TemporalKind::ZonedDateTime => "zoned date-time",
            TemporalKind::OffsetDateTime => "offset date-time",
            TemporalKind::Instant => "instant",
        };
        f.write_str(name)
    }
}

/// A calendar/clock-aware value supporting zone queries and arithmetic
#[derive(Debug, Clone, PartialEq)]
pub enum Temporal {
    Date(NaiveDate),
    Time(NaiveTime),
    /// Local date and time without a zone
    DateTime(NaiveDateTime),
    Zoned(DateTime<Tz>),
    Offset(DateTime<FixedOffset>),
    /// Point on the UTC time-line without an attached zone
    Instant(DateTime<Utc>),
}

impl Temporal {
    pub fn kind(&self) -> TemporalKind {
        match self {
            Temporal::Date(_) => TemporalKind::Date,
            Temporal::Time(_) => TemporalKind::Time,
            Temporal::DateTime(_) => TemporalKind::DateTime,
            Temporal::Zoned(_) => TemporalKind::ZonedDateTime,
            Temporal::Offset(_) => TemporalKind::OffsetDateTime,
            Temporal::Instant(_) => TemporalKind::Instant,
        }
    }

    /// The zone carried by the value itself, if any
    pub fn zone(&self) -> Option<ResolvedZone> {
        match self {
            Temporal::Zoned(dt) => Some(ResolvedZone::Region(dt.timezone())),
            Temporal::Offset(dt) => Some(ResolvedZone::Offset(*dt.offset())),
            _ => None,
        }
    }

    /// Whether the value can absorb hours, minutes and seconds
    pub fn supports_sub_day(&self) -> bool {
        !matches!(self, Temporal::Date(_))
    }

    /// Adds an exact duration.
    ///
    /// Local times wrap around midnight. Date-only values accept whole days
    /// and reject anything finer with [`ShiftError::SubDayUnsupported`].
    pub fn checked_add(&self, delta: TimeDelta) -> Result<Temporal, ShiftError> {
        let shifted = match self {
            Temporal::Date(date) => {
                if delta.num_seconds() % 86_400 != 0 || delta.subsec_nanos() != 0 {
                    return Err(ShiftError::SubDayUnsupported(self.kind()));
                }
                date.checked_add_signed(delta).map(Temporal::Date)
            }
            Temporal::Time(time) => Some(Temporal::Time(time.overflowing_add_signed(delta).0)),
            Temporal::DateTime(dt) => dt.checked_add_signed(delta).map(Temporal::DateTime),
            Temporal::Zoned(dt) => dt.checked_add_signed(delta).map(Temporal::Zoned),
            Temporal::Offset(dt) => dt.checked_add_signed(delta).map(Temporal::Offset),
            Temporal::Instant(dt) => dt.checked_add_signed(delta).map(Temporal::Instant),
        };
        shifted.ok_or(ShiftError::Overflow)
    }

    /// Adds a number of calendar days. Times of day ignore it.
    pub fn checked_add_days(&self, days: i64) -> Result<Temporal, ShiftError> {
        match self {
            Temporal::Time(_) => Ok(self.clone()),
            Temporal::Date(date) => TimeDelta::try_days(days)
                .and_then(|delta| date.checked_add_signed(delta))
                .map(Temporal::Date)
                .ok_or(ShiftError::Overflow),
            _ => TimeDelta::try_days(days)
                .ok_or(ShiftError::Overflow)
                .and_then(|delta| self.checked_add(delta)),
        }
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Temporal::Time(time) => write!(f, "{}", time.format("%H:%M:%S%.f")),
            Temporal::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Temporal::Zoned(dt) => write!(
                f,
                "{}[{}]",
                dt.format("%Y-%m-%dT%H:%M:%S%.f%:z"),
                dt.timezone().name()
            ),
            Temporal::Offset(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f%:z")),
            Temporal::Instant(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.fZ")),
        }
    }
}

impl From<NaiveDate> for Temporal {
    fn from(value: NaiveDate) -> Self {
        Temporal::Date(value)
    }
}

impl From<NaiveTime> for Temporal {
    fn from(value: NaiveTime) -> Self {
        Temporal::Time(value)
    }
}

impl From<NaiveDateTime> for Temporal {
    fn from(value: NaiveDateTime) -> Self {
        Temporal::DateTime(value)
    }
}

impl From<DateTime<Tz>> for Temporal {
    fn from(value: DateTime<Tz>) -> Self {
        Temporal::Zoned(value)
    }
}

impl From<DateTime<FixedOffset>> for Temporal {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Temporal::Offset(value)
    }
}

impl From<DateTime<Utc>> for Temporal {
    fn from(value: DateTime<Utc>) -> Self {
        Temporal::Instant(value)
    }
}

/// A millisecond-precision point in time without zone semantics of its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LegacyInstant(DateTime<Utc>);

impl LegacyInstant {
    /// Builds an instant from milliseconds since the epoch.
    /// Returns `None` when the count is out of range.
    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn as_utc(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl From<DateTime<Utc>> for LegacyInstant {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl fmt::Display for LegacyInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%a %b %d %H:%M:%S UTC %Y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_zone_query() {
        let date = Temporal::Date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(date.zone(), None);

        let paris = chrono_tz::Europe::Paris
            .with_ymd_and_hms(2020, 6, 1, 12, 0, 0)
            .unwrap();
        assert_eq!(
            Temporal::Zoned(paris).zone(),
            Some(ResolvedZone::Region(chrono_tz::Europe::Paris))
        );
    }

    #[test]
    fn test_date_rejects_sub_day_delta() {
        let date = Temporal::Date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert!(!date.supports_sub_day());
        assert_eq!(
            date.checked_add(TimeDelta::hours(36)),
            Err(ShiftError::SubDayUnsupported(TemporalKind::Date))
        );
        assert_eq!(
            date.checked_add(TimeDelta::days(2)),
            Ok(Temporal::Date(NaiveDate::from_ymd_opt(2020, 1, 3).unwrap()))
        );
    }

    #[test]
    fn test_time_wraps_midnight() {
        let time = Temporal::Time(NaiveTime::from_hms_opt(23, 0, 0).unwrap());
        assert_eq!(
            time.checked_add(TimeDelta::hours(2)),
            Ok(Temporal::Time(NaiveTime::from_hms_opt(1, 0, 0).unwrap()))
        );
    }

    #[test]
    fn test_legacy_instant_display() {
        let instant = LegacyInstant::from_epoch_millis(0).unwrap();
        assert_eq!(instant.to_string(), "Thu Jan 01 00:00:00 UTC 1970");
        assert_eq!(instant.epoch_millis(), 0);
    }
}
