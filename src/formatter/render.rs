use chrono::{Datelike, FixedOffset, Timelike};

use crate::error::FieldError;
use crate::formatter::fields::Fields;
use crate::types::{FormatToken, LocaleSettings, PatternFlavor};

/// Render a token list against the available fields.
///
/// Fails on the first token whose field is missing, except inside optional
/// sections, which are dropped as a whole.
pub(crate) fn render_tokens(
    tokens: &[FormatToken],
    flavor: PatternFlavor,
    fields: &Fields,
    locale: &LocaleSettings,
) -> Result<String, FieldError> {
    let mut result = String::new();
    for token in tokens {
        render_token(token, flavor, fields, locale, &mut result)?;
    }
    Ok(result)
}

fn render_token(
    token: &FormatToken,
    flavor: PatternFlavor,
    fields: &Fields,
    locale: &LocaleSettings,
    result: &mut String,
) -> Result<(), FieldError> {
    match token {
        // Date tokens
        FormatToken::Era(width) => {
            let index = usize::from(fields.date()?.year() > 0);
            let name = &locale.era_names[index];
            result.push_str(&text_form(name, name, *width));
        }
        FormatToken::YearOfEra(width) => {
            let year = fields.date()?.year();
            let year_of_era = if year > 0 { year } else { 1 - year };
            result.push_str(&format_year(i64::from(year_of_era), *width, flavor));
        }
        FormatToken::ProlepticYear(width) => {
            result.push_str(&format_year(i64::from(fields.date()?.year()), *width, flavor));
        }
        FormatToken::Month(width) => {
            let index = fields.date()?.month0() as usize;
            if *width <= 2 {
                result.push_str(&pad(index as i64 + 1, *width));
            } else {
                result.push_str(&text_form(
                    &locale.short_month_names[index],
                    &locale.month_names[index],
                    *width,
                ));
            }
        }
        FormatToken::DayOfMonth(width) => {
            result.push_str(&pad(i64::from(fields.date()?.day()), *width));
        }
        FormatToken::DayOfYear(width) => {
            result.push_str(&pad(i64::from(fields.date()?.ordinal()), *width));
        }
        FormatToken::DayOfWeekName(width) => {
            let index = fields.date()?.weekday().num_days_from_sunday() as usize;
            result.push_str(&text_form(
                &locale.short_day_names[index],
                &locale.day_names[index],
                *width,
            ));
        }
        FormatToken::DayOfWeekNumber(width) => {
            let number = fields.date()?.weekday().number_from_monday();
            result.push_str(&pad(i64::from(number), *width));
        }
        FormatToken::Quarter(width) => {
            let quarter = fields.date()?.month0() / 3;
            match *width {
                1 | 2 => result.push_str(&pad(i64::from(quarter) + 1, *width)),
                3 => result.push_str(&format!("Q{}", quarter + 1)),
                4 => result.push_str(&locale.quarter_names[quarter as usize]),
                _ => result.push_str(&(quarter + 1).to_string()),
            }
        }

        // Time tokens
        FormatToken::AmPm => {
            let marker = &locale.ampm_markers[usize::from(fields.time()?.hour() >= 12)];
            result.push_str(marker);
        }
        FormatToken::HourOfDay(width) => {
            result.push_str(&pad(i64::from(fields.time()?.hour()), *width));
        }
        FormatToken::ClockHourOfDay(width) => {
            let hour = match fields.time()?.hour() {
                0 => 24,
                hour => hour,
            };
            result.push_str(&pad(i64::from(hour), *width));
        }
        FormatToken::ClockHourOfAmPm(width) => {
            let hour = match fields.time()?.hour() % 12 {
                0 => 12,
                hour => hour,
            };
            result.push_str(&pad(i64::from(hour), *width));
        }
        FormatToken::HourOfAmPm(width) => {
            result.push_str(&pad(i64::from(fields.time()?.hour() % 12), *width));
        }
        FormatToken::Minute(width) => {
            result.push_str(&pad(i64::from(fields.time()?.minute()), *width));
        }
        FormatToken::Second(width) => {
            result.push_str(&pad(i64::from(fields.time()?.second()), *width));
        }
        FormatToken::FractionOfSecond(width) => {
            let nanos = format!("{:09}", nano_of_second(fields)?);
            result.push_str(&nanos[..usize::from(*width).min(9)]);
        }
        FormatToken::Millisecond(width) => {
            result.push_str(&pad(i64::from(nano_of_second(fields)? / 1_000_000), *width));
        }
        FormatToken::NanoOfSecond(width) => {
            result.push_str(&pad(i64::from(nano_of_second(fields)?), *width));
        }

        // Zone tokens
        FormatToken::ZoneName(width) => {
            let zone = fields.zone()?;
            match fields.zone_name() {
                Some(abbreviation) if *width < 4 => result.push_str(abbreviation),
                _ => result.push_str(&zone.id()),
            }
        }
        FormatToken::ZoneId => result.push_str(&fields.zone()?.id()),
        FormatToken::OffsetBasic(width) => {
            let offset = fields.offset()?;
            match *width {
                1..=3 => result.push_str(&format_offset(&offset, false, false)),
                4 => result.push_str(&format_localized_offset(&offset, true)),
                _ if offset.local_minus_utc() == 0 => result.push('Z'),
                _ => result.push_str(&format_offset(&offset, true, true)),
            }
        }
        FormatToken::OffsetIso { width, zero_as_z } => {
            let offset = fields.offset()?;
            if *zero_as_z && offset.local_minus_utc() == 0 {
                result.push('Z');
            } else {
                result.push_str(&format_iso_offset(&offset, *width, flavor));
            }
        }
        FormatToken::LocalizedOffset(width) => {
            result.push_str(&format_localized_offset(&fields.offset()?, *width == 4));
        }

        // Literal tokens
        FormatToken::LiteralChar(c) => result.push(*c),
        FormatToken::QuotedText(text) => result.push_str(text),
        FormatToken::Optional(inner) => {
            if let Ok(text) = render_tokens(inner, flavor, fields, locale) {
                result.push_str(&text);
            }
        }
    }
    Ok(())
}

/// Short form up to three letters, full form for four, narrow beyond
fn text_form(short: &str, full: &str, width: u8) -> String {
    match width {
        0..=3 => short.to_string(),
        4 => full.to_string(),
        _ => full.chars().next().map(String::from).unwrap_or_default(),
    }
}

fn pad(value: i64, width: u8) -> String {
    let digits = format!("{:0w$}", value.unsigned_abs(), w = usize::from(width));
    if value < 0 { format!("-{digits}") } else { digits }
}

/// Modern patterns of four or more letters sign years wider than the field
fn format_year(year: i64, width: u8, flavor: PatternFlavor) -> String {
    if width == 2 {
        return pad(year.rem_euclid(100), 2);
    }
    let text = pad(year, width);
    let exceeds = year > 0 && year.unsigned_abs().ilog10() >= u32::from(width);
    if flavor == PatternFlavor::Modern && width >= 4 && exceeds {
        format!("+{text}")
    } else {
        text
    }
}

fn nano_of_second(fields: &Fields) -> Result<u32, FieldError> {
    // Leap seconds are reported as nanos past one billion
    Ok(fields.time()?.nanosecond() % 1_000_000_000)
}

fn split_offset(offset: &FixedOffset) -> (char, i32, i32, i32) {
    let total = offset.local_minus_utc();
    let sign = if total < 0 { '-' } else { '+' };
    let abs = total.abs();
    (sign, abs / 3600, abs / 60 % 60, abs % 60)
}

/// `+HHMM`, or `+HH:MM[:ss]` with colons
fn format_offset(offset: &FixedOffset, colons: bool, with_seconds: bool) -> String {
    let (sign, hours, minutes, seconds) = split_offset(offset);
    let separator = if colons { ":" } else { "" };
    let mut text = format!("{sign}{hours:02}{separator}{minutes:02}");
    if with_seconds && seconds != 0 {
        text.push_str(&format!("{separator}{seconds:02}"));
    }
    text
}

fn format_iso_offset(offset: &FixedOffset, width: u8, flavor: PatternFlavor) -> String {
    let (sign, hours, minutes, _) = split_offset(offset);
    match width {
        // Modern X keeps non-zero minutes, legacy X never prints them
        1 if flavor == PatternFlavor::Legacy || minutes == 0 => format!("{sign}{hours:02}"),
        1 | 2 => format_offset(offset, false, false),
        3 => format_offset(offset, true, false),
        4 => format_offset(offset, false, true),
        _ => format_offset(offset, true, true),
    }
}

/// `GMT`, `GMT+1`, `GMT+5:30` or, in the long form, `GMT+01:00`
fn format_localized_offset(offset: &FixedOffset, long: bool) -> String {
    let (sign, hours, minutes, seconds) = split_offset(offset);
    if offset.local_minus_utc() == 0 {
        return "GMT".to_string();
    }
    let mut text = if long {
        format!("GMT{sign}{hours:02}:{minutes:02}")
    } else if minutes != 0 || seconds != 0 {
        format!("GMT{sign}{hours}:{minutes:02}")
    } else {
        format!("GMT{sign}{hours}")
    };
    if seconds != 0 {
        text.push_str(&format!(":{seconds:02}"));
    }
    text
}
