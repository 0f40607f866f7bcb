use chrono::FixedOffset;
use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::token::{literal, none_of, one_of, take_while};
use winnow::{ModalResult, Parser};

/// A pattern token before its letters are given meaning
#[derive(Debug, Clone, PartialEq)]
pub enum RawToken {
    /// A run of one repeated pattern letter, e.g. `yyyy`
    Letters(char, usize),
    Literal(char),
    Quoted(String),
    /// Bracketed optional section (modern patterns only)
    Optional(Vec<RawToken>),
}

// Pattern element parsers
pub fn parse_letter_run(input: &mut &str) -> ModalResult<RawToken> {
    let letter = one_of(|c: char| c.is_ascii_alphabetic()).parse_next(input)?;
    let rest: &str = take_while(0.., letter).parse_next(input)?;
    Ok(RawToken::Letters(letter, 1 + rest.len()))
}

pub fn parse_escaped_quote(input: &mut &str) -> ModalResult<RawToken> {
    literal("''")
        .value(RawToken::Literal('\''))
        .parse_next(input)
}

pub fn parse_quoted_text(input: &mut &str) -> ModalResult<RawToken> {
    let content_parser = repeat(1.., alt((literal("''").value('\''), none_of(['\'']))))
        .map(|chars: Vec<char>| chars.into_iter().collect::<String>());

    delimited('\'', content_parser, cut_err('\''))
        .map(RawToken::Quoted)
        .parse_next(input)
}

pub fn parse_modern_literal(input: &mut &str) -> ModalResult<RawToken> {
    none_of(|c: char| {
        c.is_ascii_alphabetic() || matches!(c, '\'' | '[' | ']' | '{' | '}' | '#')
    })
    .map(RawToken::Literal)
    .parse_next(input)
}

pub fn parse_legacy_literal(input: &mut &str) -> ModalResult<RawToken> {
    none_of(|c: char| c.is_ascii_alphabetic() || c == '\'')
        .map(RawToken::Literal)
        .parse_next(input)
}

// Offset parsers, shared by zone ids and parsed input text

/// Signed offset in seconds: `+h`, `+hh`, `+hhmm`, `+hh:mm`, `+hh:mm:ss`
pub fn offset_seconds(input: &mut &str) -> ModalResult<i32> {
    let sign = one_of(['+', '-']).parse_next(input)?;
    let hours: &str = take_while(1..=2, '0'..='9').parse_next(input)?;
    let minutes: Option<&str> =
        opt(preceded(opt(':'), take_while(2, '0'..='9'))).parse_next(input)?;
    let seconds: Option<&str> = if minutes.is_some() {
        opt(preceded(opt(':'), take_while(2, '0'..='9'))).parse_next(input)?
    } else {
        None
    };

    let to_num = |digits: Option<&str>| digits.and_then(|d| d.parse::<i32>().ok()).unwrap_or(0);
    let (h, m, s) = (to_num(Some(hours)), to_num(minutes), to_num(seconds));
    let total = h * 3600 + m * 60 + s;
    if h > 18 || m > 59 || s > 59 || total > 18 * 3600 {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }

    Ok(if sign == '-' { -total } else { total })
}

pub fn offset_id(input: &mut &str) -> ModalResult<FixedOffset> {
    offset_seconds
        .verify_map(FixedOffset::east_opt)
        .parse_next(input)
}

/// Custom zone id of the legacy API: `GMT` then `+h`, `+hh`, `+hh:mm` or `+hhmm`
pub fn gmt_offset_id(input: &mut &str) -> ModalResult<FixedOffset> {
    let sign = preceded(literal("GMT"), one_of(['+', '-'])).parse_next(input)?;
    let hours: &str = take_while(1..=2, '0'..='9').parse_next(input)?;
    let minutes: Option<&str> = if hours.len() == 2 {
        opt(preceded(opt(':'), take_while(2, '0'..='9'))).parse_next(input)?
    } else {
        opt(preceded(':', take_while(2, '0'..='9'))).parse_next(input)?
    };

    let h: i32 = hours.parse().unwrap_or(0);
    let m: i32 = minutes.and_then(|d| d.parse().ok()).unwrap_or(0);
    if h > 23 || m > 59 {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    let total = h * 3600 + m * 60;
    FixedOffset::east_opt(if sign == '-' { -total } else { total })
        .ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
}

/// Offset as it may appear in input text: `Z`, `+01:00`, `GMT`, `GMT+1`
pub fn parse_offset_text(input: &mut &str) -> ModalResult<FixedOffset> {
    alt((
        preceded(alt((literal("GMT"), literal("UTC"))), opt(offset_seconds))
            .map(|seconds| seconds.unwrap_or(0)),
        one_of(['Z', 'z']).value(0),
        offset_seconds,
    ))
    .verify_map(FixedOffset::east_opt)
    .parse_next(input)
}
