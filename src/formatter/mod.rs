//! Date formatting module
//!
//! This module turns temporal values into text according to a compiled date
//! pattern or the ISO-8601 date-time layout. The main entry point is
//! [`DateFormatter`].

mod fields;
mod iso;
mod render;

use chrono::{DateTime, Utc};

use crate::error::{FieldError, PatternError, ValueParseError};
use crate::parser::{parse_date_pattern, parse_instant};
use crate::temporal::Temporal;
use crate::types::{DatePattern, LocaleSettings, PatternFlavor};
use crate::zone::ResolvedZone;
use fields::Fields;

/// Output pattern of the legacy path when the caller gives none
pub const LEGACY_DEFAULT_PATTERN: &str = "yyyy-MM-dd'T'HH:mm:ssZ";

/// How a formatter lays out its output
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// ISO-8601 extended date-time with offset and region id when known
    IsoDateTime,
    Pattern(DatePattern),
}

/// A ready-to-use formatter: layout, locale and optionally a bound zone
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use date_filter::formatter::DateFormatter;
/// use date_filter::temporal::Temporal;
/// use date_filter::types::{LocaleSettings, PatternFlavor};
///
/// let formatter =
///     DateFormatter::of_pattern("dd/MM/yyyy", LocaleSettings::default(), PatternFlavor::Modern).unwrap();
/// let date = Temporal::Date(NaiveDate::from_ymd_opt(2020, 1, 31).unwrap());
/// assert_eq!(formatter.format(&date).unwrap(), "31/01/2020");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DateFormatter {
    layout: Layout,
    locale: LocaleSettings,
    zone: Option<ResolvedZone>,
}

impl DateFormatter {
    pub fn iso_date_time(locale: LocaleSettings) -> Self {
        Self {
            layout: Layout::IsoDateTime,
            locale,
            zone: None,
        }
    }

    pub fn of_pattern(pattern: &str, locale: LocaleSettings, flavor: PatternFlavor) -> Result<Self, PatternError> {
        Ok(Self {
            layout: Layout::Pattern(parse_date_pattern(pattern, flavor)?),
            locale,
            zone: None,
        })
    }

    /// Builds the formatter for an optional caller pattern.
    ///
    /// Without a pattern the modern flavor uses the ISO date-time layout and
    /// the legacy flavor uses [`LEGACY_DEFAULT_PATTERN`].
    pub fn resolve(pattern: Option<&str>, locale: LocaleSettings, flavor: PatternFlavor) -> Result<Self, PatternError> {
        match (pattern, flavor) {
            (Some(pattern), _) => Self::of_pattern(pattern, locale, flavor),
            (None, PatternFlavor::Modern) => Ok(Self::iso_date_time(locale)),
            (None, PatternFlavor::Legacy) => Self::of_pattern(LEGACY_DEFAULT_PATTERN, locale, flavor),
        }
    }

    /// Binds a zone. Values with an instant are shown in this zone; local
    /// values only gain its identity.
    pub fn with_zone(mut self, zone: ResolvedZone) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn zone(&self) -> Option<&ResolvedZone> {
        self.zone.as_ref()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn format(&self, value: &Temporal) -> Result<String, FieldError> {
        self.render(&Fields::from_temporal(value, self.zone.as_ref()))
    }

    /// Formats a point in time in the bound zone, UTC when none is bound
    pub fn format_instant(&self, instant: &DateTime<Utc>) -> Result<String, FieldError> {
        let zone = self.zone.unwrap_or(ResolvedZone::UTC);
        self.render(&Fields::from_instant(instant, &zone))
    }

    /// Reads text produced by this formatter's layout back into an instant.
    /// Local fields are placed in the bound zone, UTC when none is bound.
    pub fn parse_instant(&self, text: &str) -> Result<DateTime<Utc>, ValueParseError> {
        let zone = self.zone.unwrap_or(ResolvedZone::UTC);
        match &self.layout {
            Layout::Pattern(pattern) => parse_instant(text, pattern, &self.locale, &zone),
            Layout::IsoDateTime => {
                let without_region = text.split_once('[').map_or(text, |(head, _)| head);
                DateTime::parse_from_rfc3339(without_region)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|_| ValueParseError::Unparseable {
                        text: text.to_string(),
                        offset: 0,
                    })
            }
        }
    }

    fn render(&self, fields: &Fields) -> Result<String, FieldError> {
        match &self.layout {
            Layout::IsoDateTime => iso::render_iso_date_time(fields),
            Layout::Pattern(pattern) => render::render_tokens(&pattern.tokens, pattern.flavor, fields, &self.locale),
        }
    }
}
