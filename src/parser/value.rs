//! Reading input text against a compiled pattern
//!
//! Fields missing from the pattern default to the epoch (1970-01-01 00:00), and
//! text after the last token is ignored. Out-of-range fields roll over into the
//! next larger unit, so `2020-02-30` reads as March 1st.

use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use winnow::error::{ContextError, ErrMode};
use winnow::token::{literal, take, take_while};
use winnow::{ModalResult, Parser};

use crate::error::ValueParseError;
use crate::parser::tokens::parse_offset_text;
use crate::types::{DatePattern, FormatToken, LocaleSettings};
use crate::zone::ResolvedZone;

/// Field values collected while walking the pattern
#[derive(Debug, Clone, Default)]
struct ParsedFields {
    /// Index into the locale's era names, 0 is before the epoch of the calendar
    era: Option<usize>,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    day_of_year: Option<u32>,
    hour_of_day: Option<u32>,
    hour_of_ampm: Option<u32>,
    pm: Option<bool>,
    minute: Option<u32>,
    second: Option<u32>,
    nanos: Option<u64>,
    offset: Option<FixedOffset>,
    zone: Option<ResolvedZone>,
}

fn backtrack<T>() -> ModalResult<T> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

/// Read a run of digits; abutting numeric fields take exactly `width` digits
fn parse_number(input: &mut &str, width: u8, abutting: bool) -> ModalResult<(u32, usize)> {
    let digits: &str = if abutting {
        take_while(usize::from(width.max(1)), '0'..='9').parse_next(input)?
    } else {
        take_while(1.., '0'..='9').parse_next(input)?
    };
    match digits.parse::<u32>() {
        Ok(value) => Ok((value, digits.len())),
        Err(_) => backtrack(),
    }
}

/// Match the longest of the given names, ignoring case
fn parse_name<'n>(input: &mut &str, names: impl IntoIterator<Item = (usize, &'n String)>) -> ModalResult<usize> {
    let mut best: Option<(usize, &str)> = None;
    for (index, name) in names {
        if name.is_empty() {
            continue;
        }
        let matches = input
            .get(..name.len())
            .is_some_and(|head| head.to_lowercase() == name.to_lowercase());
        if matches && best.is_none_or(|(_, current)| name.len() > current.len()) {
            best = Some((index, name.as_str()));
        }
    }

    match best {
        Some((index, name)) => {
            take(name.chars().count()).parse_next(input)?;
            Ok(index)
        }
        None => backtrack(),
    }
}

/// Zone identifiers or abbreviations known to the zone database
fn parse_zone_text(input: &mut &str) -> ModalResult<ResolvedZone> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '+' | '-' | ':')
    })
    .verify_map(|word: &str| ResolvedZone::parse(word).ok())
    .parse_next(input)
}

/// Two-digit years land within 80 years before and 20 years after today
fn expand_two_digit_year(two_digits: i32) -> i32 {
    let start = Utc::now().year() - 80;
    let year = start - start.rem_euclid(100) + two_digits;
    if year < start { year + 100 } else { year }
}

fn read_token(
    token: &FormatToken,
    abutting: bool,
    input: &mut &str,
    fields: &mut ParsedFields,
    locale: &LocaleSettings,
) -> ModalResult<()> {
    match token {
        FormatToken::Era(_) => {
            fields.era = Some(parse_name(input, locale.era_names.iter().enumerate())?);
        }
        FormatToken::YearOfEra(width) | FormatToken::ProlepticYear(width) => {
            let (value, len) = parse_number(input, *width, abutting)?;
            let Ok(value) = i32::try_from(value) else {
                return backtrack();
            };
            fields.year = Some(if *width <= 2 && len == 2 {
                expand_two_digit_year(value)
            } else {
                value
            });
        }
        FormatToken::Month(width) if *width >= 3 => {
            let index = parse_name(
                input,
                locale
                    .month_names
                    .iter()
                    .enumerate()
                    .chain(locale.short_month_names.iter().enumerate()),
            )?;
            fields.month = Some(index as u32 + 1);
        }
        FormatToken::Month(width) => fields.month = Some(parse_number(input, *width, abutting)?.0),
        FormatToken::DayOfMonth(width) => fields.day = Some(parse_number(input, *width, abutting)?.0),
        FormatToken::DayOfYear(width) => {
            fields.day_of_year = Some(parse_number(input, *width, abutting)?.0)
        }
        FormatToken::DayOfWeekName(_) => {
            parse_name(
                input,
                locale
                    .day_names
                    .iter()
                    .enumerate()
                    .chain(locale.short_day_names.iter().enumerate()),
            )?;
        }
        FormatToken::Quarter(width) if *width >= 3 => {
            parse_name(input, locale.quarter_names.iter().enumerate())?;
        }
        FormatToken::DayOfWeekNumber(width) | FormatToken::Quarter(width) => {
            parse_number(input, *width, abutting)?;
        }
        FormatToken::AmPm => {
            fields.pm = Some(parse_name(input, locale.ampm_markers.iter().enumerate())? == 1);
        }
        FormatToken::HourOfDay(width) => {
            fields.hour_of_day = Some(parse_number(input, *width, abutting)?.0)
        }
        FormatToken::ClockHourOfDay(width) => {
            fields.hour_of_day = Some(parse_number(input, *width, abutting)?.0 % 24)
        }
        FormatToken::ClockHourOfAmPm(width) => {
            fields.hour_of_ampm = Some(parse_number(input, *width, abutting)?.0 % 12)
        }
        FormatToken::HourOfAmPm(width) => {
            fields.hour_of_ampm = Some(parse_number(input, *width, abutting)?.0)
        }
        FormatToken::Minute(width) => fields.minute = Some(parse_number(input, *width, abutting)?.0),
        FormatToken::Second(width) => fields.second = Some(parse_number(input, *width, abutting)?.0),
        FormatToken::Millisecond(width) => {
            let (millis, _) = parse_number(input, *width, abutting)?;
            fields.nanos = Some(u64::from(millis) * 1_000_000);
        }
        FormatToken::FractionOfSecond(width) => {
            let digits: &str = take_while(1..=usize::from(*width), '0'..='9').parse_next(input)?;
            fields.nanos = format!("{digits:0<9}").parse().ok();
        }
        FormatToken::NanoOfSecond(width) => {
            fields.nanos = Some(u64::from(parse_number(input, *width, abutting)?.0))
        }
        FormatToken::ZoneName(_) | FormatToken::ZoneId => {
            fields.zone = Some(parse_zone_text(input)?);
        }
        FormatToken::OffsetBasic(_) | FormatToken::OffsetIso { .. } | FormatToken::LocalizedOffset(_) => {
            fields.offset = Some(parse_offset_text(input)?);
        }
        FormatToken::LiteralChar(c) => {
            literal(*c).parse_next(input)?;
        }
        FormatToken::QuotedText(text) => {
            literal(text.as_str()).parse_next(input)?;
        }
        FormatToken::Optional(tokens) => {
            let (mut attempt_input, mut attempt_fields) = (*input, fields.clone());
            if read_tokens(tokens, &mut attempt_input, &mut attempt_fields, locale).is_ok() {
                *input = attempt_input;
                *fields = attempt_fields;
            }
        }
    }
    Ok(())
}

/// Walk all tokens; on failure returns the remaining input at the failing token
fn read_tokens<'s>(
    tokens: &[FormatToken],
    input: &mut &'s str,
    fields: &mut ParsedFields,
    locale: &LocaleSettings,
) -> Result<(), &'s str> {
    for (i, token) in tokens.iter().enumerate() {
        let abutting = token.is_numeric() && tokens.get(i + 1).is_some_and(FormatToken::is_numeric);
        let start = *input;
        if read_token(token, abutting, input, fields, locale).is_err() {
            return Err(start);
        }
    }
    Ok(())
}

/// Shift `date` by a signed number of months
fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let count = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months < 0 {
        date.checked_sub_months(count)
    } else {
        date.checked_add_months(count)
    }
}

impl ParsedFields {
    /// Combine the fields into an instant, rolling overflow forward the way a
    /// lenient calendar does. `None` when the result leaves chrono's range.
    fn resolve(&self, default_zone: &ResolvedZone) -> Option<DateTime<Utc>> {
        let mut year = self.year.unwrap_or(1970);
        if self.era == Some(0) {
            year = 1 - year;
        }

        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let date = match (self.month, self.day, self.day_of_year) {
            (None, None, Some(day_of_year)) => {
                start.checked_add_signed(TimeDelta::try_days(i64::from(day_of_year) - 1)?)?
            }
            (month, day, _) => {
                let first = add_months(start, i64::from(month.unwrap_or(1)) - 1)?;
                first.checked_add_signed(TimeDelta::try_days(i64::from(day.unwrap_or(1)) - 1)?)?
            }
        };

        let afternoon = if self.pm == Some(true) { 12 } else { 0 };
        let hour = match (self.hour_of_day, self.hour_of_ampm) {
            (Some(hour), _) => i64::from(hour),
            (None, Some(hour)) => i64::from(hour).checked_add(afternoon)?,
            (None, None) => afternoon,
        };
        let elapsed = TimeDelta::try_hours(hour)?
            .checked_add(&TimeDelta::try_minutes(i64::from(self.minute.unwrap_or(0)))?)?
            .checked_add(&TimeDelta::try_seconds(i64::from(self.second.unwrap_or(0)))?)?
            .checked_add(&TimeDelta::nanoseconds(i64::try_from(self.nanos.unwrap_or(0)).ok()?))?;

        let local = date.and_time(NaiveTime::MIN).checked_add_signed(elapsed)?;
        match (self.offset, self.zone) {
            (Some(offset), _) => offset
                .from_local_datetime(&local)
                .single()
                .map(|dt| dt.with_timezone(&Utc)),
            (None, Some(zone)) => zone.from_local(&local),
            (None, None) => default_zone.from_local(&local),
        }
    }
}

/// Parse `text` against a compiled pattern into an instant.
///
/// Local fields are placed on the time-line in `default_zone` unless the text
/// carries its own offset or zone.
pub(crate) fn parse_instant(
    text: &str,
    pattern: &DatePattern,
    locale: &LocaleSettings,
    default_zone: &ResolvedZone,
) -> Result<DateTime<Utc>, ValueParseError> {
    let mut input = text;
    let mut fields = ParsedFields::default();

    read_tokens(&pattern.tokens, &mut input, &mut fields, locale).map_err(|remaining| {
        ValueParseError::Unparseable {
            text: text.to_string(),
            offset: text.len() - remaining.len(),
        }
    })?;

    fields
        .resolve(default_zone)
        .ok_or_else(|| ValueParseError::InvalidFields {
            text: text.to_string(),
        })
}
