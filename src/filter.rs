//! The `date` filter: input dispatch and the host-facing facade
//!
//! Structured temporal values go through the temporal path, which resolves a
//! zone through the fallback chain and degrades shifts for date-only values.
//! Everything else goes through the legacy path, which works on plain
//! instants and can first parse text with `existingFormat`.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use log::debug;

use crate::config::{ConfigError, FilterConfig};
use crate::error::{DateFilterError, ShiftError, SourceLocation};
use crate::formatter::DateFormatter;
use crate::input::{TemporalInput, Value};
use crate::shift::{self, ShiftSpec};
use crate::temporal::{LegacyInstant, Temporal, TemporalKind};
use crate::types::{LocaleSettings, PatternFlavor};
use crate::zone::{self, ResolvedZone};

/// Name under which the filter is registered
pub const FILTER_NAME: &str = "date";

pub const FORMAT_ARG: &str = "format";
pub const EXISTING_FORMAT_ARG: &str = "existingFormat";
pub const TIME_ZONE_ARG: &str = "timeZone";
pub const ALTER_TIME_ARG: &str = "alterTime";

const ARGUMENT_NAMES: [&str; 4] = [FORMAT_ARG, EXISTING_FORMAT_ARG, TIME_ZONE_ARG, ALTER_TIME_ARG];

/// Named arguments as bound by the host
pub type FilterArgs = HashMap<String, Value>;

/// Filter output that must not be escaped again by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeString(String);

impl SafeString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SafeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where and how the filter is being evaluated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationContext {
    /// Locale tag of the evaluation, e.g. `fr-FR`
    pub locale: Option<String>,
    pub template_name: String,
    pub line_number: usize,
}

impl EvaluationContext {
    pub fn new(template_name: impl Into<String>, line_number: usize) -> Self {
        Self {
            locale: None,
            template_name: template_name.into(),
            line_number,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.template_name.clone(), self.line_number)
    }
}

/// Named arguments of one call, validated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatOptions {
    pub pattern: Option<String>,
    /// Pattern to parse the input text with; legacy path only
    pub existing_pattern: Option<String>,
    pub zone_override: Option<String>,
    pub shift: Option<ShiftSpec>,
}

impl FormatOptions {
    /// Reads the named arguments. The shift is parsed here, so a malformed
    /// duration fails before any formatting happens.
    pub fn from_args(args: &FilterArgs, location: &SourceLocation) -> Result<Self, DateFilterError> {
        let shift = string_arg(args, ALTER_TIME_ARG, location)?
            .map(|text| {
                ShiftSpec::parse(&text).map_err(|source| DateFilterError::InvalidDurationString {
                    input: text.clone(),
                    location: location.clone(),
                    source,
                })
            })
            .transpose()?;

        Ok(Self {
            pattern: string_arg(args, FORMAT_ARG, location)?,
            existing_pattern: string_arg(args, EXISTING_FORMAT_ARG, location)?,
            zone_override: string_arg(args, TIME_ZONE_ARG, location)?,
            shift,
        })
    }
}

fn string_arg(args: &FilterArgs, name: &str, location: &SourceLocation) -> Result<Option<String>, DateFilterError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(other) => Err(DateFilterError::InvalidArgument {
            name: name.to_string(),
            type_name: other.type_name().to_string(),
            location: location.clone(),
        }),
    }
}

/// Format a classified input.
///
/// Returns `Ok(None)` only for a missing input.
pub fn format_input(
    input: Option<TemporalInput>,
    options: &FormatOptions,
    locale: &LocaleSettings,
    ambient: &ResolvedZone,
    location: &SourceLocation,
) -> Result<Option<SafeString>, DateFilterError> {
    let Some(input) = input else {
        return Ok(None);
    };

    let text = match &input {
        TemporalInput::Structured(value) => {
            debug!("formatting {} value on the temporal path", value.kind());
            format_temporal(value, options, locale, ambient, location)?
        }
        other => {
            debug!("formatting {} value on the legacy path", other.type_name());
            format_legacy(other, options, locale, ambient, location)?
        }
    };

    Ok(Some(SafeString(text)))
}

fn compile(
    pattern: Option<&str>,
    locale: &LocaleSettings,
    flavor: PatternFlavor,
    location: &SourceLocation,
) -> Result<DateFormatter, DateFilterError> {
    DateFormatter::resolve(pattern, locale.clone(), flavor).map_err(|source| DateFilterError::InvalidPattern {
        pattern: pattern.unwrap_or_default().to_string(),
        location: location.clone(),
        source,
    })
}

fn format_temporal(
    value: &Temporal,
    options: &FormatOptions,
    locale: &LocaleSettings,
    ambient: &ResolvedZone,
    location: &SourceLocation,
) -> Result<String, DateFilterError> {
    let formatter = compile(options.pattern.as_deref(), locale, PatternFlavor::Modern, location)?;

    let zone = zone::resolve(value, options.zone_override.as_deref(), ambient).map_err(|source| {
        DateFilterError::InvalidZoneId {
            zone: options.zone_override.clone().unwrap_or_default(),
            location: location.clone(),
            source,
        }
    })?;
    let formatter = formatter.with_zone(zone);

    let shifted = match &options.shift {
        Some(shift) => shift::apply(value, shift).map_err(|source| DateFilterError::OutOfRange {
            value: value.to_string(),
            location: location.clone(),
            source,
        })?,
        None => value.clone(),
    };

    formatter.format(&shifted).map_err(|source| DateFilterError::Format {
        value: shifted.to_string(),
        kind: shifted.kind(),
        location: location.clone(),
        source,
    })
}

fn format_legacy(
    input: &TemporalInput,
    options: &FormatOptions,
    locale: &LocaleSettings,
    ambient: &ResolvedZone,
    location: &SourceLocation,
) -> Result<String, DateFilterError> {
    let instant = legacy_instant(input, options, locale, ambient, location)?;

    let formatter = compile(options.pattern.as_deref(), locale, PatternFlavor::Legacy, location)?;
    let zone = match &options.zone_override {
        Some(id) => ResolvedZone::parse_or_utc(id),
        None => *ambient,
    };
    let formatter = formatter.with_zone(zone);

    let instant = match &options.shift {
        Some(shift) => instant
            .checked_add_signed(shift.duration())
            .ok_or_else(|| DateFilterError::OutOfRange {
                value: LegacyInstant::from(instant).to_string(),
                location: location.clone(),
                source: ShiftError::Overflow,
            })?,
        None => instant,
    };

    formatter.format_instant(&instant).map_err(|source| DateFilterError::Format {
        value: LegacyInstant::from(instant).to_string(),
        kind: TemporalKind::Instant,
        location: location.clone(),
        source,
    })
}

/// The instant the legacy path formats: parsed from text when an
/// `existingFormat` is given, otherwise taken from the input as is
fn legacy_instant(
    input: &TemporalInput,
    options: &FormatOptions,
    locale: &LocaleSettings,
    ambient: &ResolvedZone,
    location: &SourceLocation,
) -> Result<DateTime<Utc>, DateFilterError> {
    if let Some(existing) = options.existing_pattern.as_deref() {
        let parser = compile(Some(existing), locale, PatternFlavor::Legacy, location)?.with_zone(*ambient);
        let text = input.text();
        return parser.parse_instant(&text).map_err(|source| DateFilterError::Parse {
            input: text.clone(),
            location: location.clone(),
            source,
        });
    }

    match input {
        TemporalInput::Legacy(instant) => Ok(*instant.as_utc()),
        TemporalInput::Epoch(millis) => LegacyInstant::from_epoch_millis(*millis)
            .map(|instant| *instant.as_utc())
            .ok_or_else(|| DateFilterError::OutOfRange {
                value: millis.to_string(),
                location: location.clone(),
                source: ShiftError::Overflow,
            }),
        other => Err(DateFilterError::UnsupportedInputType {
            type_name: other.type_name(),
            value: other.text(),
            location: location.clone(),
        }),
    }
}

/// The `date` filter as registered with a template engine
#[derive(Debug, Clone, Default)]
pub struct DateFilter {
    config: FilterConfig,
    pinned_zone: Option<ResolvedZone>,
}

impl DateFilter {
    pub fn new(config: FilterConfig) -> Result<Self, ConfigError> {
        let pinned_zone = config.pinned_zone()?;
        Ok(Self { config, pinned_zone })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Named arguments the filter accepts, in positional order
    pub fn argument_names(&self) -> &'static [&'static str] {
        &ARGUMENT_NAMES
    }

    /// Format `input`. Null input gives `Ok(None)` without looking at the
    /// arguments.
    pub fn apply(
        &self,
        input: &Value,
        args: &FilterArgs,
        context: &EvaluationContext,
    ) -> Result<Option<SafeString>, DateFilterError> {
        let Some(input) = TemporalInput::classify(input) else {
            return Ok(None);
        };

        let location = context.location();
        let options = FormatOptions::from_args(args, &location)?;
        let locale = context
            .locale
            .as_deref()
            .or(self.config.default_locale.as_deref())
            .map(LocaleSettings::for_locale)
            .unwrap_or_default();
        let ambient = self.pinned_zone.unwrap_or_else(ResolvedZone::system_default);

        format_input(Some(input), &options, &locale, &ambient, &location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn location() -> SourceLocation {
        SourceLocation::new("page.html", 3)
    }

    #[test]
    fn test_options_from_args() {
        let mut args = FilterArgs::new();
        args.insert(FORMAT_ARG.to_string(), Value::from("yyyy"));
        args.insert(TIME_ZONE_ARG.to_string(), Value::Null);
        args.insert(ALTER_TIME_ARG.to_string(), Value::from("P1D"));

        let options = FormatOptions::from_args(&args, &location()).unwrap();
        assert_eq!(options.pattern.as_deref(), Some("yyyy"));
        assert_eq!(options.zone_override, None);
        assert_eq!(options.shift.map(|s| s.whole_days()), Some(1));
    }

    #[test]
    fn test_non_string_argument() {
        let mut args = FilterArgs::new();
        args.insert(FORMAT_ARG.to_string(), Value::from(12_i64));
        let error = FormatOptions::from_args(&args, &location()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        assert_eq!(error.location(), &location());
    }

    #[test]
    fn test_missing_input() {
        let result = format_input(
            None,
            &FormatOptions::default(),
            &LocaleSettings::default(),
            &ResolvedZone::UTC,
            &location(),
        );
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn test_argument_names() {
        assert_eq!(
            DateFilter::default().argument_names(),
            &["format", "existingFormat", "timeZone", "alterTime"]
        );
    }
}
