use chrono::{NaiveDate, TimeZone, Utc};
use date_filter::error::ZoneError;
use date_filter::zone::resolve;
use date_filter::{ResolvedZone, Temporal};

fn tokyo() -> ResolvedZone {
    ResolvedZone::Region(chrono_tz::Asia::Tokyo)
}

#[test]
fn test_accepted_identifiers() {
    let cases = [
        ("Europe/Paris", "Europe/Paris"),
        ("UTC", "UTC"),
        ("Z", "Z"),
        ("+02", "+02:00"),
        ("-0330", "-03:30"),
        ("+05:45", "+05:45"),
        ("UTC+01:00", "+01:00"),
        ("GMT-8", "-08:00"),
        ("UT+3", "+03:00"),
        ("+01:00:30", "+01:00:30"),
    ];
    for (text, id) in cases {
        assert_eq!(ResolvedZone::parse(text).map(|z| z.id()), Ok(id.to_string()), "{text}");
    }
}

#[test]
fn test_rejected_identifiers() {
    for text in ["", "Europe/Atlantis", "+25:00", "UTC+", "europe/paris", "GMT+1:5"] {
        assert_eq!(
            ResolvedZone::parse(text),
            Err(ZoneError::UnknownZone(text.to_string())),
            "{text}"
        );
    }
}

#[test]
fn test_fallback_chain() {
    let zoned = chrono_tz::America::Chicago
        .with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
        .unwrap();
    let instant = Temporal::Instant(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    let date = Temporal::Date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());

    // Embedded zone first
    assert_eq!(
        resolve(&Temporal::Zoned(zoned), Some("Europe/Paris"), &tokyo()),
        Ok(ResolvedZone::Region(chrono_tz::America::Chicago))
    );
    // Instants carry no zone of their own
    assert_eq!(
        resolve(&instant, Some("Europe/Paris"), &tokyo()),
        Ok(ResolvedZone::Region(chrono_tz::Europe::Paris))
    );
    assert_eq!(resolve(&date, None, &tokyo()), Ok(tokyo()));
}

#[test]
fn test_system_default_is_usable() {
    // Whatever the host reports, the result must name a zone
    let zone = ResolvedZone::system_default();
    assert!(!zone.id().is_empty());
}
