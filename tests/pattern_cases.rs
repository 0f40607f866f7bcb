use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use date_filter::{DateFilter, EvaluationContext, FilterArgs, FilterConfig, Value};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct TestCase {
    value: String,
    zone: String,
    pattern: String,
    #[serde(default)]
    locale: Option<String>,
    expected: String,
}

#[derive(Debug, Deserialize)]
struct TestCases {
    cases: Vec<TestCase>,
}

fn run_test_case(filter: &DateFilter, case: &TestCase) -> Result<(), String> {
    let local: NaiveDateTime = case
        .value
        .parse()
        .map_err(|e| format!("Bad value {}: {e}", case.value))?;
    let zone: Tz = case
        .zone
        .parse()
        .map_err(|e| format!("Bad zone {}: {e}", case.zone))?;
    let zoned = zone
        .from_local_datetime(&local)
        .single()
        .ok_or_else(|| format!("Ambiguous local time {}", case.value))?;

    let mut args = FilterArgs::new();
    args.insert("format".to_string(), Value::from(case.pattern.as_str()));
    let mut context = EvaluationContext::new("cases.toml", 1);
    if let Some(locale) = &case.locale {
        context = context.with_locale(locale.as_str());
    }

    let result = filter
        .apply(&Value::from(zoned), &args, &context)
        .map_err(|e| format!("Pattern \"{}\" failed: {e}", case.pattern))?
        .map(|text| text.into_inner())
        .unwrap_or_default();

    if result != case.expected {
        return Err(format!(
            "\n✗ Mismatch for value: {} ({})\nPattern:    \"{}\"\nExpected:   \"{}\"\nActual:     \"{}\"",
            case.value, case.zone, case.pattern, case.expected, result
        ));
    }

    Ok(())
}

#[test]
fn test_pattern_cases() {
    let toml_path: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("pattern_cases.toml");

    let toml_content = fs::read_to_string(&toml_path)
        .unwrap_or_else(|e| panic!("Failed to read TOML file {}: {}", toml_path.display(), e));

    let test_suite: TestCases = toml::from_str(&toml_content)
        .unwrap_or_else(|e| panic!("Failed to parse TOML file {}: {}", toml_path.display(), e));

    let filter = DateFilter::new(FilterConfig::default().with_time_zone("UTC")).unwrap();
    let failures: Vec<String> = test_suite
        .cases
        .iter()
        .enumerate()
        .filter_map(|(i, case)| {
            run_test_case(&filter, case)
                .err()
                .map(|msg| format!("[Case {}] {}", i + 1, msg))
        })
        .collect();

    assert!(
        failures.is_empty(),
        "{} of {} cases failed:\n{}",
        failures.len(),
        test_suite.cases.len(),
        failures.join("\n")
    );
}
