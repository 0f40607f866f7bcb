//! Time zone resolution
//!
//! Structured values pick their zone through a fallback chain: the zone they
//! carry, then the caller's override, then the ambient default.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use log::{debug, warn};
use winnow::Parser;

use crate::error::ZoneError;
use crate::parser::{gmt_offset_id, offset_id};
use crate::temporal::Temporal;

/// An effective zone used to localize formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedZone {
    /// IANA region such as Europe/Paris
    Region(Tz),
    /// Fixed offset from UTC
    Offset(FixedOffset),
}

/// A point in time as seen from a zone
pub(crate) struct Localized {
    pub local: NaiveDateTime,
    pub offset: FixedOffset,
    pub abbreviation: String,
}

impl ResolvedZone {
    pub const UTC: ResolvedZone = ResolvedZone::Region(Tz::UTC);

    /// Reads a zone identifier: region names, `Z`, signed offsets and
    /// `UTC`/`GMT`/`UT` prefixed offsets.
    pub fn parse(id: &str) -> Result<Self, ZoneError> {
        if let Ok(tz) = id.parse::<Tz>() {
            return Ok(ResolvedZone::Region(tz));
        }
        if id == "Z" {
            return Ok(ResolvedZone::Offset(Utc.fix()));
        }
        if id == "UT" {
            return Ok(ResolvedZone::UTC);
        }

        let offset_part = ["UTC", "GMT", "UT"]
            .iter()
            .find_map(|prefix| id.strip_prefix(prefix))
            .filter(|rest| rest.starts_with(['+', '-']))
            .unwrap_or(id);

        if offset_part.starts_with(['+', '-']) {
            if let Ok(offset) = offset_id.parse(offset_part) {
                return Ok(ResolvedZone::Offset(offset));
            }
        }

        Err(ZoneError::UnknownZone(id.to_string()))
    }

    /// Lookup used by the legacy path.
    ///
    /// Only region names and `GMT` custom offsets (`GMT+5`, `GMT-08:00`,
    /// `GMT+0530`) are known there; anything else, bare offsets and `Z`
    /// included, means UTC.
    pub fn parse_or_utc(id: &str) -> Self {
        if let Ok(tz) = id.parse::<Tz>() {
            return ResolvedZone::Region(tz);
        }
        match gmt_offset_id.parse(id) {
            Ok(offset) => ResolvedZone::Offset(offset),
            Err(_) => {
                debug!("unknown legacy time zone '{id}', using UTC");
                ResolvedZone::UTC
            }
        }
    }

    /// The zone configured for the host system
    pub fn system_default() -> Self {
        match iana_time_zone::get_timezone() {
            Ok(name) => match name.parse::<Tz>() {
                Ok(tz) => ResolvedZone::Region(tz),
                Err(_) => {
                    warn!("system time zone '{name}' is not in the zone database, using UTC");
                    ResolvedZone::UTC
                }
            },
            Err(e) => {
                warn!("could not read the system time zone ({e}), using UTC");
                ResolvedZone::UTC
            }
        }
    }

    pub fn id(&self) -> String {
        match self {
            ResolvedZone::Region(tz) => tz.name().to_string(),
            ResolvedZone::Offset(offset) => format_offset_id(offset),
        }
    }

    pub(crate) fn localize(&self, instant: &DateTime<Utc>) -> Localized {
        match self {
            ResolvedZone::Region(tz) => {
                let dt = instant.with_timezone(tz);
                Localized {
                    local: dt.naive_local(),
                    offset: dt.offset().fix(),
                    abbreviation: dt.format("%Z").to_string(),
                }
            }
            ResolvedZone::Offset(offset) => Localized {
                local: instant.with_timezone(offset).naive_local(),
                offset: *offset,
                abbreviation: format_offset_id(offset),
            },
        }
    }

    /// Places a local date-time on the time-line.
    ///
    /// Ambiguous times take the earlier instant; times inside a gap are moved
    /// forward by an hour.
    pub(crate) fn from_local(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            ResolvedZone::Region(tz) => tz
                .from_local_datetime(local)
                .earliest()
                .or_else(|| {
                    let later = local.checked_add_signed(TimeDelta::hours(1))?;
                    tz.from_local_datetime(&later).earliest()
                })
                .map(|dt| dt.with_timezone(&Utc)),
            ResolvedZone::Offset(offset) => offset
                .from_local_datetime(local)
                .single()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl fmt::Display for ResolvedZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// Offset id as `Z`, `+01:00` or `+01:00:30`
pub(crate) fn format_offset_id(offset: &FixedOffset) -> String {
    let total = offset.local_minus_utc();
    if total == 0 {
        return "Z".to_string();
    }
    let sign = if total < 0 { '-' } else { '+' };
    let abs = total.abs();
    let (hours, minutes, seconds) = (abs / 3600, abs / 60 % 60, abs % 60);
    if seconds == 0 {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Effective zone for a structured value, first match wins:
/// the value's own zone, the override, the ambient zone.
pub fn resolve(
    input: &Temporal,
    zone_override: Option<&str>,
    ambient: &ResolvedZone,
) -> Result<ResolvedZone, ZoneError> {
    if let Some(embedded) = input.zone() {
        return Ok(embedded);
    }
    match zone_override {
        Some(id) => ResolvedZone::parse(id),
        None => Ok(*ambient),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tokyo() -> ResolvedZone {
        ResolvedZone::Region(chrono_tz::Asia::Tokyo)
    }

    #[test]
    fn test_parse_region_and_offsets() {
        assert_eq!(
            ResolvedZone::parse("Europe/Paris"),
            Ok(ResolvedZone::Region(chrono_tz::Europe::Paris))
        );
        assert_eq!(
            ResolvedZone::parse("+05:30").unwrap().id(),
            "+05:30".to_string()
        );
        assert_eq!(ResolvedZone::parse("GMT-3").unwrap().id(), "-03:00");
        assert_eq!(ResolvedZone::parse("UTC+0130").unwrap().id(), "+01:30");
        assert_eq!(ResolvedZone::parse("Z").unwrap().id(), "Z");
        assert_eq!(ResolvedZone::parse("UTC"), Ok(ResolvedZone::UTC));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            ResolvedZone::parse("Mars/Olympus"),
            Err(ZoneError::UnknownZone("Mars/Olympus".to_string()))
        );
        assert!(ResolvedZone::parse("+19:00").is_err());
        assert_eq!(ResolvedZone::parse_or_utc("Mars/Olympus"), ResolvedZone::UTC);
    }

    #[test]
    fn test_legacy_lookup_grammar() {
        assert_eq!(
            ResolvedZone::parse_or_utc("Asia/Tokyo"),
            ResolvedZone::Region(chrono_tz::Asia::Tokyo)
        );
        assert_eq!(ResolvedZone::parse_or_utc("GMT+05:30").id(), "+05:30");
        assert_eq!(ResolvedZone::parse_or_utc("GMT-8").id(), "-08:00");
        for id in ["+05:30", "Z", "UTC+01:30", "UT+3", "-0800"] {
            assert_eq!(ResolvedZone::parse_or_utc(id), ResolvedZone::UTC, "{id}");
        }
    }

    #[test]
    fn test_resolve_prefers_embedded_zone() {
        let zoned = chrono_tz::Europe::Paris
            .with_ymd_and_hms(2020, 1, 1, 10, 0, 0)
            .unwrap();
        let zone = resolve(&Temporal::Zoned(zoned), Some("America/New_York"), &tokyo()).unwrap();
        assert_eq!(zone, ResolvedZone::Region(chrono_tz::Europe::Paris));
    }

    #[test]
    fn test_resolve_falls_back() {
        let date = Temporal::Date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(
            resolve(&date, Some("America/New_York"), &tokyo()).unwrap(),
            ResolvedZone::Region(chrono_tz::America::New_York)
        );
        assert_eq!(resolve(&date, None, &tokyo()).unwrap(), tokyo());
        assert!(resolve(&date, Some("nowhere"), &tokyo()).is_err());
    }

    #[test]
    fn test_from_local_skips_gap() {
        let paris = ResolvedZone::Region(chrono_tz::Europe::Paris);
        let in_gap = NaiveDate::from_ymd_opt(2021, 3, 28)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let instant = paris.from_local(&in_gap).unwrap();
        assert_eq!(instant.to_rfc3339(), "2021-03-28T01:30:00+00:00");
    }
}
