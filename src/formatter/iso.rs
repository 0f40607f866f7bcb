use chrono::{Datelike, Timelike};

use crate::error::FieldError;
use crate::formatter::fields::Fields;
use crate::zone::{ResolvedZone, format_offset_id};

/// ISO-8601 extended date-time, e.g. `2020-01-01T10:00:00.5+01:00[Europe/Paris]`
///
/// Date and time are required. The offset is printed when known, and the
/// region id only after an offset.
pub(crate) fn render_iso_date_time(fields: &Fields) -> Result<String, FieldError> {
    let date = fields.date()?;
    let time = fields.time()?;

    let mut result = format_iso_year(date.year());
    result.push_str(&format!(
        "-{:02}-{:02}T{:02}:{:02}:{:02}",
        date.month(),
        date.day(),
        time.hour(),
        time.minute(),
        time.second()
    ));

    let nanos = time.nanosecond() % 1_000_000_000;
    if nanos > 0 {
        let digits = format!("{nanos:09}");
        result.push('.');
        result.push_str(digits.trim_end_matches('0'));
    }

    if let Ok(offset) = fields.offset() {
        result.push_str(&format_offset_id(&offset));
        if let Ok(ResolvedZone::Region(tz)) = fields.zone() {
            result.push_str(&format!("[{}]", tz.name()));
        }
    }

    Ok(result)
}

/// Four digits at least; years past 9999 get a plus sign
fn format_iso_year(year: i32) -> String {
    match year {
        10_000.. => format!("+{year}"),
        0..10_000 => format!("{year:04}"),
        _ => format!("-{:04}", year.unsigned_abs()),
    }
}
