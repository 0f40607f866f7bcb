//! Time shifts requested through `alterTime`

use std::str::FromStr;

use chrono::TimeDelta;
use log::debug;

use crate::error::{DurationError, ShiftError};
use crate::parser::parse_duration;
use crate::temporal::Temporal;

/// A signed duration parsed once from an ISO-8601 duration string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftSpec {
    duration: TimeDelta,
}

impl ShiftSpec {
    pub fn parse(text: &str) -> Result<Self, DurationError> {
        parse_duration(text).map(Self::from)
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    /// Whole days, truncated toward zero
    pub fn whole_days(&self) -> i64 {
        self.duration.num_days()
    }

    /// What `whole_days` leaves out
    pub fn sub_day_remainder(&self) -> TimeDelta {
        self.duration - TimeDelta::days(self.whole_days())
    }
}

impl From<TimeDelta> for ShiftSpec {
    fn from(duration: TimeDelta) -> Self {
        Self { duration }
    }
}

impl FromStr for ShiftSpec {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Shift a value.
///
/// Values that hold a time of day take the exact duration. Date-only values
/// take the whole days and drop the rest.
pub fn apply(value: &Temporal, shift: &ShiftSpec) -> Result<Temporal, ShiftError> {
    if value.supports_sub_day() {
        return value.checked_add(shift.duration());
    }

    let remainder = shift.sub_day_remainder();
    if !remainder.is_zero() {
        debug!(
            "{} value cannot hold a time of day, dropping {}s of the shift",
            value.kind(),
            remainder.num_seconds()
        );
    }
    value.checked_add_days(shift.whole_days())
}
