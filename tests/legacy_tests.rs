use date_filter::{DateFilter, ErrorKind, EvaluationContext, FilterArgs, FilterConfig, LegacyInstant, Value};

fn filter_in(zone: &str) -> DateFilter {
    DateFilter::new(FilterConfig::default().with_time_zone(zone)).unwrap()
}

fn context() -> EvaluationContext {
    EvaluationContext::new("legacy.html", 12)
}

fn args(pairs: &[(&str, &str)]) -> FilterArgs {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), Value::from(*value)))
        .collect()
}

fn render(value: impl Into<Value>, pairs: &[(&str, &str)]) -> String {
    filter_in("UTC")
        .apply(&value.into(), &args(pairs), &context())
        .unwrap()
        .unwrap()
        .into_inner()
}

#[test]
fn test_epoch_default_pattern() {
    assert_eq!(render(0_i64, &[]), "1970-01-01T00:00:00+0000");
}

#[test]
fn test_epoch_in_ambient_zone() {
    let text = filter_in("Asia/Kolkata")
        .apply(&Value::from(0_i64), &FilterArgs::new(), &context())
        .unwrap()
        .unwrap();
    assert_eq!(text.as_str(), "1970-01-01T05:30:00+0530");
}

#[test]
fn test_zone_override() {
    assert_eq!(
        render(0_i64, &[("format", "dd MMM yyyy HH:mm z"), ("timeZone", "America/New_York")]),
        "31 Dec 1969 19:00 EST"
    );
}

#[test]
fn test_unknown_zone_falls_back_to_utc() {
    assert_eq!(
        render(0_i64, &[("format", "HH:mm X"), ("timeZone", "Mars/Olympus")]),
        "00:00 Z"
    );
}

#[test]
fn test_zone_override_uses_legacy_id_grammar() {
    assert_eq!(
        render(0_i64, &[("format", "HH:mm X"), ("timeZone", "GMT+05:30")]),
        "05:30 +05"
    );
    assert_eq!(
        render(0_i64, &[("format", "HH:mm X"), ("timeZone", "GMT-8")]),
        "16:00 -08"
    );
    for zone in ["+05:30", "Z", "UTC+01:30"] {
        assert_eq!(
            render(0_i64, &[("format", "HH:mm X"), ("timeZone", zone)]),
            "00:00 Z",
            "{zone}"
        );
    }
}

#[test]
fn test_float_epoch_truncates() {
    assert_eq!(render(1500.9_f64, &[("format", "ss.SSS")]), "01.500");
    assert_eq!(render(-1.5_f64, &[("format", "HH:mm:ss.SSS")]), "23:59:59.999");
}

#[test]
fn test_legacy_instant_input() {
    let instant = LegacyInstant::from_epoch_millis(1_577_836_800_000).unwrap();
    assert_eq!(
        render(instant, &[("format", "EEEE, MMMM d, yyyy h:mm a")]),
        "Wednesday, January 1, 2020 12:00 AM"
    );
}

#[test]
fn test_reformat_with_existing_format() {
    assert_eq!(
        render(
            "2020-01-01",
            &[("existingFormat", "yyyy-MM-dd"), ("format", "dd/MM/yyyy")]
        ),
        "01/01/2020"
    );
}

#[test]
fn test_existing_format_reads_own_offset() {
    assert_eq!(
        render(
            "2020-01-01 10:00 +0200",
            &[("existingFormat", "yyyy-MM-dd HH:mm Z"), ("format", "HH:mm")]
        ),
        "08:00"
    );
}

#[test]
fn test_existing_format_ignores_trailing_text() {
    assert_eq!(
        render(
            "2020-01-01 and then some",
            &[("existingFormat", "yyyy-MM-dd"), ("format", "yyyyMMdd")]
        ),
        "20200101"
    );
}

#[test]
fn test_existing_format_rolls_fields_over() {
    let reformat = |text: &str| render(text, &[("existingFormat", "yyyy-MM-dd"), ("format", "yyyy-MM-dd")]);
    assert_eq!(reformat("2020-02-30"), "2020-03-01");
    assert_eq!(reformat("2020-13-01"), "2021-01-01");
}

#[test]
fn test_existing_format_rejects_huge_hours() {
    let error = filter_in("UTC")
        .apply(
            &Value::from("4294967290 PM"),
            &args(&[("existingFormat", "K a"), ("format", "HH:mm")]),
            &context(),
        )
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Parse);
}

#[test]
fn test_round_trip_through_pattern() {
    let pattern = "dd.MM.yyyy HH:mm:ss.SSS Z";
    let first = render(1_234_567_890_123_i64, &[("format", pattern)]);
    assert_eq!(first, "13.02.2009 23:31:30.123 +0000");

    let second = render(
        first.as_str(),
        &[("existingFormat", pattern), ("format", pattern)],
    );
    assert_eq!(second, first);
}

#[test]
fn test_instant_text_is_parseable() {
    let instant = LegacyInstant::from_epoch_millis(86_400_000).unwrap();
    assert_eq!(
        render(
            instant,
            &[("existingFormat", "EEE MMM dd HH:mm:ss zzz yyyy"), ("format", "yyyy-MM-dd")]
        ),
        "1970-01-02"
    );
}

#[test]
fn test_localized_names() {
    let text = filter_in("UTC")
        .apply(
            &Value::from(0_i64),
            &args(&[("format", "EEEE d MMMM yyyy")]),
            &context().with_locale("es_ES"),
        )
        .unwrap()
        .unwrap();
    assert_eq!(text.as_str(), "jueves 1 enero 1970");
}

#[test]
fn test_localized_parsing() {
    let text = filter_in("UTC")
        .apply(
            &Value::from("3 février 2021"),
            &args(&[("existingFormat", "d MMMM yyyy"), ("format", "yyyy-MM-dd")]),
            &context().with_locale("fr"),
        )
        .unwrap()
        .unwrap();
    assert_eq!(text.as_str(), "2021-02-03");
}

#[test]
fn test_text_without_existing_format() {
    let error = filter_in("UTC")
        .apply(&Value::from(true), &FilterArgs::new(), &context())
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnsupportedInputType);
    assert_eq!(
        error.to_string(),
        "Unsupported argument type: boolean (value: true) (legacy.html:12)"
    );
}

#[test]
fn test_unparseable_text() {
    let error = filter_in("UTC")
        .apply(
            &Value::from("yesterday"),
            &args(&[("existingFormat", "yyyy-MM-dd")]),
            &context(),
        )
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Parse);
    assert_eq!(
        error.to_string(),
        "Could not parse the string 'yesterday' into a date. (legacy.html:12)"
    );
}
