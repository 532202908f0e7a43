use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::ParserError;

static DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d %b %Y, %H:%M:%S",
    "%d %b %Y, %H:%M",
];

/// Parses an export timestamp into wall-clock time. Offsets are dropped: sets are
/// grouped by the calendar day the lifter saw, not by UTC day.
pub(crate) fn parse_timestamp(
    value: &str,
    line_index: u64,
    column: &'static str,
) -> Result<NaiveDateTime, ParserError> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(ParserError::data_row(
        line_index,
        column,
        format!("invalid timestamp '{trimmed}'"),
    ))
}

fn is_null(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}

pub(crate) fn parse_optional_f64(
    value: &str,
    line_index: u64,
    column: &'static str,
) -> Result<Option<f64>, ParserError> {
    let trimmed = value.trim();
    if is_null(trimmed) {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
        Ok(parsed) => Err(ParserError::data_row(
            line_index,
            column,
            format!("non-finite value {parsed}"),
        )),
        Err(err) => Err(ParserError::data_row(
            line_index,
            column,
            format!("failed to parse '{trimmed}' as float: {err}"),
        )),
    }
}

/// Integer cells may arrive as `5` or, from spreadsheet round-trips, `5.0`.
pub(crate) fn parse_optional_i64(
    value: &str,
    line_index: u64,
    column: &'static str,
) -> Result<Option<i64>, ParserError> {
    let trimmed = value.trim();
    if is_null(trimmed) {
        return Ok(None);
    }
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Ok(Some(parsed));
    }

    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed.fract() == 0.0 => Ok(Some(parsed as i64)),
        _ => Err(ParserError::data_row(
            line_index,
            column,
            format!("failed to parse '{trimmed}' as integer"),
        )),
    }
}

pub(crate) fn parse_optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_accepts_hevy_and_iso_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();

        for raw in [
            "2024-01-05 18:30:00",
            "2024-01-05T18:30:00",
            "2024-01-05 18:30",
            "5 Jan 2024, 18:30",
            "05 Jan 2024, 18:30",
            "2024-01-05T18:30:00+03:00",
        ] {
            assert_eq!(parse_timestamp(raw, 2, "start_time").unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn bare_date_is_midnight() {
        let parsed = parse_timestamp("2024-02-29", 2, "start_time").unwrap();
        assert_eq!(parsed.time(), NaiveTime::MIN);
    }

    #[test]
    fn integral_floats_are_accepted_as_integers() {
        assert_eq!(parse_optional_i64("5.0", 2, "reps").unwrap(), Some(5));
        assert!(parse_optional_i64("5.5", 2, "reps").is_err());
        assert_eq!(parse_optional_i64(" ", 2, "reps").unwrap(), None);
    }

    #[test]
    fn nan_is_null() {
        assert_eq!(parse_optional_f64("NaN", 2, "rpe").unwrap(), None);
    }
}
