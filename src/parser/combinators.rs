use winnow::combinator::{alt, cut_err, delimited, repeat};
use winnow::{ModalResult, Parser};

use crate::parser::tokens::*;
use crate::types::PatternFlavor;

/// Parse a single token from the pattern string
pub fn parse_single_token(flavor: PatternFlavor) -> impl FnMut(&mut &str) -> ModalResult<RawToken> {
    move |input: &mut &str| match flavor {
        PatternFlavor::Modern => parse_modern_token(input),
        PatternFlavor::Legacy => parse_legacy_token(input),
    }
}

fn parse_modern_token(input: &mut &str) -> ModalResult<RawToken> {
    alt((
        parse_escaped_quote,
        parse_quoted_text,
        parse_optional_section,
        parse_letter_run,
        parse_modern_literal,
    ))
    .parse_next(input)
}

fn parse_legacy_token(input: &mut &str) -> ModalResult<RawToken> {
    alt((
        parse_escaped_quote,
        parse_quoted_text,
        parse_letter_run,
        parse_legacy_literal,
    ))
    .parse_next(input)
}

/// Parse an optional section in the form [tokens]
pub fn parse_optional_section(input: &mut &str) -> ModalResult<RawToken> {
    delimited('[', repeat(0.., parse_modern_token), cut_err(']'))
        .map(|tokens: Vec<RawToken>| RawToken::Optional(tokens))
        .parse_next(input)
}
