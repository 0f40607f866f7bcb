use chrono::NaiveDate;
use date_filter::error::{FieldError, PatternError, ShiftError, ValueParseError};
use date_filter::{
    ConfigError, DateFilter, DateFilterError, ErrorKind, EvaluationContext, FilterArgs, FilterConfig, SourceLocation,
    Value,
};
use std::error::Error;

fn filter() -> DateFilter {
    DateFilter::new(FilterConfig::default().with_time_zone("UTC")).unwrap()
}

fn context() -> EvaluationContext {
    EvaluationContext::new("errors.html", 21)
}

fn apply(value: Value, args: FilterArgs) -> Result<Option<String>, DateFilterError> {
    filter()
        .apply(&value, &args, &context())
        .map(|text| text.map(|s| s.into_inner()))
}

fn args(pairs: &[(&str, Value)]) -> FilterArgs {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

#[test]
fn test_null_passes_through() {
    assert_eq!(apply(Value::Null, FilterArgs::new()).unwrap(), None);
    // Arguments are not even looked at
    let broken = args(&[
        ("alterTime", Value::from("not-a-duration")),
        ("format", Value::from(3_i64)),
    ]);
    assert_eq!(apply(Value::Null, broken).unwrap(), None);
}

#[test]
fn test_every_error_carries_location() {
    let date = Value::from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    let cases = [
        (Value::from(false), args(&[]), ErrorKind::UnsupportedInputType),
        (
            Value::from("01-01"),
            args(&[("existingFormat", Value::from("yyyy-MM-dd"))]),
            ErrorKind::Parse,
        ),
        (date.clone(), args(&[]), ErrorKind::Format),
        (
            date.clone(),
            args(&[("timeZone", Value::from("Nowhere"))]),
            ErrorKind::InvalidZoneId,
        ),
        (
            date.clone(),
            args(&[("alterTime", Value::from("P1Y"))]),
            ErrorKind::InvalidDurationString,
        ),
        (
            date.clone(),
            args(&[("format", Value::from("yyyy-ww"))]),
            ErrorKind::InvalidPattern,
        ),
        (
            date.clone(),
            args(&[("timeZone", Value::from(true))]),
            ErrorKind::InvalidArgument,
        ),
        (
            Value::from(NaiveDate::MIN),
            args(&[("alterTime", Value::from("-P1D"))]),
            ErrorKind::OutOfRange,
        ),
    ];

    for (value, arguments, kind) in cases {
        let error = apply(value, arguments).unwrap_err();
        assert_eq!(error.kind(), kind, "{error}");
        assert_eq!(error.location(), &SourceLocation::new("errors.html", 21));
        assert!(error.to_string().ends_with("(errors.html:21)"), "{error}");
    }
}

#[test]
fn test_error_sources() {
    let date = Value::from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());

    let error = apply(date.clone(), args(&[("format", Value::from("HH:mm"))])).unwrap_err();
    let source = error.source().and_then(|s| s.downcast_ref::<FieldError>());
    assert_eq!(source.map(|s| s.to_string()), Some("Unsupported field: Time".to_string()));

    let error = apply(date.clone(), args(&[("format", Value::from("dddd"))])).unwrap_err();
    assert!(matches!(
        error,
        DateFilterError::InvalidPattern {
            source: PatternError::TooManyLetters { letter: 'd', count: 4 },
            ..
        }
    ));

    let error = apply(
        Value::from("9999999-01-01"),
        args(&[("existingFormat", Value::from("yyyy-MM-dd"))]),
    )
    .unwrap_err();
    assert!(matches!(
        error,
        DateFilterError::Parse {
            source: ValueParseError::InvalidFields { .. },
            ..
        }
    ));

    let error = apply(
        Value::from(NaiveDate::MAX),
        args(&[("alterTime", Value::from("P1D"))]),
    )
    .unwrap_err();
    assert!(matches!(
        error,
        DateFilterError::OutOfRange {
            source: ShiftError::Overflow,
            ..
        }
    ));
}

#[test]
fn test_invalid_argument_message() {
    let date = Value::from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    let error = apply(date, args(&[("format", Value::from(2.5))])).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Argument 'format' must be a string, got float (errors.html:21)"
    );
}

#[test]
fn test_invalid_config() {
    let result = DateFilter::new(FilterConfig::default().with_time_zone("Nowhere/Land"));
    assert!(matches!(result, Err(ConfigError::InvalidTimeZone { .. })));

    let config = FilterConfig::from_toml_str("time_zone = \"Europe/Paris\"\ndefault_locale = \"fr\"").unwrap();
    assert!(DateFilter::new(config).is_ok());
}
