use chrono::TimeDelta;
use winnow::ascii::digit1;
use winnow::combinator::{opt, preceded, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::token::{one_of, take_while};
use winnow::{ModalResult, Parser};

use crate::error::DurationError;

/// Components of a duration as written, before they are summed
#[derive(Debug, Default, PartialEq)]
struct DurationParts {
    negative: bool,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    /// Signed like the seconds component
    nanos: i64,
}

fn parse_signed_integer(input: &mut &str) -> ModalResult<i64> {
    (opt(one_of(['+', '-'])), digit1)
        .try_map(|(sign, digits): (Option<char>, &str)| {
            digits
                .parse::<i64>()
                .map(|value| if sign == Some('-') { -value } else { value })
        })
        .parse_next(input)
}

/// Seconds with an optional fraction of up to nine digits: `-1.5S`
fn parse_seconds(input: &mut &str) -> ModalResult<(i64, i64)> {
    let (sign, whole): (Option<char>, &str) = (opt(one_of(['+', '-'])), digit1).parse_next(input)?;
    let fraction: Option<&str> =
        opt(preceded(one_of(['.', ',']), take_while(0..=9, '0'..='9'))).parse_next(input)?;
    one_of(['S', 's']).parse_next(input)?;

    let seconds = whole
        .parse::<i64>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))?;
    let nanos = match fraction {
        Some(digits) if !digits.is_empty() => {
            format!("{digits:0<9}").parse::<i64>().unwrap_or(0)
        }
        _ => 0,
    };

    Ok(if sign == Some('-') {
        (-seconds, -nanos)
    } else {
        (seconds, nanos)
    })
}

/// Hours, minutes and seconds-with-nanos after the `T`
type TimePart = (Option<i64>, Option<i64>, Option<(i64, i64)>);

fn parse_time_part(input: &mut &str) -> ModalResult<TimePart> {
    (
        opt(terminated(parse_signed_integer, one_of(['H', 'h']))),
        opt(terminated(parse_signed_integer, one_of(['M', 'm']))),
        opt(parse_seconds),
    )
        .verify(|part: &TimePart| part.0.is_some() || part.1.is_some() || part.2.is_some())
        .parse_next(input)
}

fn parse_duration_parts(input: &mut &str) -> ModalResult<DurationParts> {
    let negative = opt(one_of(['+', '-'])).parse_next(input)? == Some('-');
    one_of(['P', 'p']).parse_next(input)?;
    let days = opt(terminated(parse_signed_integer, one_of(['D', 'd']))).parse_next(input)?;
    let time = opt(preceded(one_of(['T', 't']), parse_time_part)).parse_next(input)?;

    if days.is_none() && time.is_none() {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }

    let (hours, minutes, seconds) = time.unwrap_or_default();
    let (seconds, nanos) = seconds.unwrap_or_default();
    Ok(DurationParts {
        negative,
        days: days.unwrap_or(0),
        hours: hours.unwrap_or(0),
        minutes: minutes.unwrap_or(0),
        seconds,
        nanos,
    })
}

impl DurationParts {
    fn total(&self) -> Option<TimeDelta> {
        let seconds = self
            .days
            .checked_mul(86_400)?
            .checked_add(self.hours.checked_mul(3_600)?)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)?;
        let total = TimeDelta::try_seconds(seconds)?.checked_add(&TimeDelta::nanoseconds(self.nanos))?;
        if self.negative {
            TimeDelta::zero().checked_sub(&total)
        } else {
            Some(total)
        }
    }
}

/// Parse an ISO-8601 duration such as `PT36H`, `-P2DT3H4M` or `PT0.5S`
///
/// Only days and smaller units are accepted; weeks, months and years are not.
///
/// # Examples
/// ```
/// use date_filter::parser::parse_duration;
///
/// let delta = parse_duration("P1DT12H").unwrap();
/// assert_eq!(delta.num_hours(), 36);
/// ```
pub fn parse_duration(text: &str) -> Result<TimeDelta, DurationError> {
    let parts = parse_duration_parts
        .parse(text)
        .map_err(|e| DurationError::Malformed { offset: e.offset() })?;
    parts.total().ok_or(DurationError::Overflow)
}
