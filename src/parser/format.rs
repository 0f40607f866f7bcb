use winnow::Parser;
use winnow::combinator::repeat;

use crate::error::PatternError;
use crate::parser::combinators::parse_single_token;
use crate::parser::tokens::RawToken;
use crate::types::*;

/// Parse a date pattern
///
/// This is the main public API entry point of this module. It accepts a pattern
/// string and the letter flavor, and returns the compiled DatePattern.
///
/// # Arguments
/// * `pattern` - The pattern to compile, e.g. `yyyy-MM-dd'T'HH:mm`
/// * `flavor` - Which letter semantics apply
///
/// # Examples
/// ```
/// use date_filter::parser::parse_date_pattern;
/// use date_filter::types::PatternFlavor;
///
/// let pattern = parse_date_pattern("dd/MM/yyyy", PatternFlavor::Modern).unwrap();
/// assert_eq!(pattern.tokens.len(), 5);
/// ```
pub fn parse_date_pattern(pattern: &str, flavor: PatternFlavor) -> Result<DatePattern, PatternError> {
    let raw: Vec<RawToken> = repeat(0.., parse_single_token(flavor))
        .parse(pattern)
        .map_err(|e| PatternError::Syntax { offset: e.offset() })?;

    Ok(DatePattern {
        source: pattern.to_string(),
        flavor,
        tokens: resolve_tokens(raw, flavor)?,
    })
}

fn resolve_tokens(raw: Vec<RawToken>, flavor: PatternFlavor) -> Result<Vec<FormatToken>, PatternError> {
    raw.into_iter()
        .map(|token| match token {
            RawToken::Letters(letter, count) => resolve_letters(letter, count, flavor),
            RawToken::Literal(c) => Ok(FormatToken::LiteralChar(c)),
            RawToken::Quoted(text) => Ok(FormatToken::QuotedText(text)),
            RawToken::Optional(inner) => resolve_tokens(inner, flavor).map(FormatToken::Optional),
        })
        .collect()
}

/// Give a run of pattern letters its meaning
fn resolve_letters(letter: char, count: usize, flavor: PatternFlavor) -> Result<FormatToken, PatternError> {
    let too_many = PatternError::TooManyLetters { letter, count };
    let width = u8::try_from(count).map_err(|_| too_many.clone())?;
    let limit = |max: u8, token: FormatToken| if width <= max { Ok(token) } else { Err(too_many.clone()) };

    match flavor {
        PatternFlavor::Modern => match letter {
            'G' => limit(5, FormatToken::Era(width)),
            'y' => Ok(FormatToken::YearOfEra(width)),
            'u' => Ok(FormatToken::ProlepticYear(width)),
            'M' | 'L' => limit(5, FormatToken::Month(width)),
            'd' => limit(2, FormatToken::DayOfMonth(width)),
            'D' => limit(3, FormatToken::DayOfYear(width)),
            'E' => limit(5, FormatToken::DayOfWeekName(width)),
            'Q' | 'q' => limit(5, FormatToken::Quarter(width)),
            'a' => limit(1, FormatToken::AmPm),
            'H' => limit(2, FormatToken::HourOfDay(width)),
            'k' => limit(2, FormatToken::ClockHourOfDay(width)),
            'h' => limit(2, FormatToken::ClockHourOfAmPm(width)),
            'K' => limit(2, FormatToken::HourOfAmPm(width)),
            'm' => limit(2, FormatToken::Minute(width)),
            's' => limit(2, FormatToken::Second(width)),
            'S' => limit(9, FormatToken::FractionOfSecond(width)),
            'n' => limit(19, FormatToken::NanoOfSecond(width)),
            'z' => limit(4, FormatToken::ZoneName(width)),
            'V' if width == 2 => Ok(FormatToken::ZoneId),
            'V' => Err(too_many.clone()),
            'O' if width == 1 || width == 4 => Ok(FormatToken::LocalizedOffset(width)),
            'O' => Err(too_many.clone()),
            'X' => limit(5, FormatToken::OffsetIso { width, zero_as_z: true }),
            'x' => limit(5, FormatToken::OffsetIso { width, zero_as_z: false }),
            'Z' => limit(5, FormatToken::OffsetBasic(width)),
            _ => Err(PatternError::UnknownLetter(letter)),
        },
        // Legacy letters accept any count; text fields stop growing at the full form
        PatternFlavor::Legacy => match letter {
            'G' => Ok(FormatToken::Era(width.min(4))),
            'y' => Ok(FormatToken::YearOfEra(width)),
            'M' | 'L' => Ok(FormatToken::Month(width.min(4))),
            'd' => Ok(FormatToken::DayOfMonth(width)),
            'D' => Ok(FormatToken::DayOfYear(width)),
            'E' => Ok(FormatToken::DayOfWeekName(width.min(4))),
            'u' => Ok(FormatToken::DayOfWeekNumber(width)),
            'a' => Ok(FormatToken::AmPm),
            'H' => Ok(FormatToken::HourOfDay(width)),
            'k' => Ok(FormatToken::ClockHourOfDay(width)),
            'h' => Ok(FormatToken::ClockHourOfAmPm(width)),
            'K' => Ok(FormatToken::HourOfAmPm(width)),
            'm' => Ok(FormatToken::Minute(width)),
            's' => Ok(FormatToken::Second(width)),
            'S' => Ok(FormatToken::Millisecond(width)),
            'z' => Ok(FormatToken::ZoneName(width.min(4))),
            'Z' => Ok(FormatToken::OffsetBasic(1)),
            'X' => limit(3, FormatToken::OffsetIso { width, zero_as_z: true }),
            _ => Err(PatternError::UnknownLetter(letter)),
        },
    }
}
