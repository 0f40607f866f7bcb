use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};

use crate::error::{Field, FieldError};
use crate::temporal::Temporal;
use crate::zone::ResolvedZone;

/// The fields a value offers to a formatter once a zone is bound
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fields {
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    offset: Option<FixedOffset>,
    zone: Option<ResolvedZone>,
    /// Abbreviation in effect at the instant, e.g. CET
    zone_name: Option<String>,
}

impl Fields {
    /// Values on the time-line are converted to the bound zone; local values
    /// keep their fields and only gain the zone identity.
    pub fn from_temporal(value: &Temporal, bound_zone: Option<&ResolvedZone>) -> Self {
        let zone = bound_zone.copied().or_else(|| value.zone());
        let instant = match value {
            Temporal::Zoned(dt) => Some(dt.with_timezone(&Utc)),
            Temporal::Offset(dt) => Some(dt.with_timezone(&Utc)),
            Temporal::Instant(dt) => Some(*dt),
            _ => None,
        };

        if let (Some(instant), Some(zone)) = (instant, zone.as_ref()) {
            return Self::from_instant(&instant, zone);
        }

        let (date, time) = match value {
            Temporal::Date(date) => (Some(*date), None),
            Temporal::Time(time) => (None, Some(*time)),
            Temporal::DateTime(dt) => (Some(dt.date()), Some(dt.time())),
            _ => (None, None),
        };
        Self {
            date,
            time,
            offset: None,
            zone,
            zone_name: None,
        }
    }

    pub fn from_instant(instant: &DateTime<Utc>, zone: &ResolvedZone) -> Self {
        let localized = zone.localize(instant);
        Self {
            date: Some(localized.local.date()),
            time: Some(localized.local.time()),
            offset: Some(localized.offset),
            zone: Some(*zone),
            zone_name: Some(localized.abbreviation),
        }
    }

    pub fn date(&self) -> Result<NaiveDate, FieldError> {
        self.date.ok_or(FieldError::Unsupported(Field::Date))
    }

    pub fn time(&self) -> Result<NaiveTime, FieldError> {
        self.time.ok_or(FieldError::Unsupported(Field::Time))
    }

    pub fn offset(&self) -> Result<FixedOffset, FieldError> {
        self.offset.ok_or(FieldError::Unsupported(Field::OffsetSeconds))
    }

    pub fn zone(&self) -> Result<ResolvedZone, FieldError> {
        self.zone.ok_or(FieldError::Unsupported(Field::ZoneId))
    }

    pub fn zone_name(&self) -> Option<&str> {
        self.zone_name.as_deref()
    }

    pub fn has_offset(&self) -> bool {
        self.offset.is_some()
    }
}
