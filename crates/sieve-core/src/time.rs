//! String to time conversion

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::FilterError;

/// Pick a chrono layout from the input length.
///
/// Returns the layout and a suffix appended to the input before parsing,
/// since chrono needs minutes whenever an hour is present.
fn infer_layout(s: &str) -> Option<(&'static str, &'static str)> {
    match s.len() {
        8 => Some(("%Y%m%d", "")),
        10 => Some(("%Y-%m-%d", "")),
        13 => Some(("%Y-%m-%d %H:%M", ":00")),
        16 => Some(("%Y-%m-%d %H:%M", "")),
        19 => Some(("%Y-%m-%d %H:%M:%S", "")),
        _ => None,
    }
}

fn has_offset(layout: &str) -> bool {
    layout.contains("%z") || layout.contains("%:z") || layout.contains("%#z")
}

fn parse_with_layout(s: &str, layout: &str) -> Result<DateTime<FixedOffset>, FilterError> {
    let time_parse = |source: chrono::ParseError| FilterError::TimeParse {
        input: s.to_string(),
        source,
    };

    if has_offset(layout) {
        return DateTime::parse_from_str(s, layout).map_err(time_parse);
    }

    let naive = match NaiveDateTime::parse_from_str(s, layout) {
        Ok(dt) => dt,
        Err(err) => match NaiveDate::parse_from_str(s, layout) {
            Ok(date) => date.and_time(NaiveTime::MIN),
            Err(_) => return Err(time_parse(err)),
        },
    };

    Ok(naive.and_utc().fixed_offset())
}

/// Convert a date string to a time value.
///
/// `layout` is a chrono format string. Without one the layout is inferred
/// from the input length: `20180927`, `2018-09-27`, `2018-09-27 15`,
/// `2018-09-27 15:34`, `2018-09-27 15:34:23`, and RFC 3339 at 20 or 25
/// characters. Inferred layouts follow the input's separators (`T` between
/// date and time, `/` between date parts). Times without an offset are UTC.
pub fn str_to_time(s: &str, layout: Option<&str>) -> Result<DateTime<FixedOffset>, FilterError> {
    if let Some(layout) = layout {
        return parse_with_layout(s, layout);
    }

    if matches!(s.len(), 20 | 25) {
        return DateTime::parse_from_rfc3339(s).map_err(|source| FilterError::TimeParse {
            input: s.to_string(),
            source,
        });
    }

    let Some((layout, suffix)) = infer_layout(s) else {
        return Err(FilterError::invalid_input(
            "strToTime",
            format!("unsupported time format '{s}'"),
        ));
    };

    let mut layout = layout.to_string();
    if s.contains('T') {
        layout = layout.replace(' ', "T");
    }
    if s.contains('/') {
        layout = layout.replace('-', "/");
    }

    parse_with_layout(&format!("{s}{suffix}"), &layout)
}
