//! Show start-time utilities
//!
//! Start times are wall-clock timestamps without a zone, compared against
//! the local clock at query time.

use crate::{Error, Result};
use chrono::{DateTime, Local, NaiveDateTime};

/// Canonical storage and display format for show start times
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats accepted from form input, tried in order
const ACCEPTED_FORMATS: &[&str] = &[
    START_TIME_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Get current local wall-clock time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Format a start time for storage and payloads
pub fn format_start_time(start_time: &NaiveDateTime) -> String {
    start_time.format(START_TIME_FORMAT).to_string()
}

/// Serde adapter writing start times in [`START_TIME_FORMAT`]
///
/// Use as `#[serde(serialize_with = "fyyur_common::time::serialize_start_time")]`.
pub fn serialize_start_time<S>(start_time: &NaiveDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&start_time.format(START_TIME_FORMAT))
}

/// Parse a submitted start time
///
/// RFC 3339 input is converted to local wall-clock time.
pub fn parse_start_time(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();

    for format in ACCEPTED_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(parsed);
        }
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Local).naive_local())
        .map_err(|_| Error::InvalidInput(format!("Invalid start time: {}", input)))
}

/// Whether a show has already started relative to `now`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTiming {
    Past,
    Upcoming,
}

impl ShowTiming {
    /// A show starting exactly at `now` counts as upcoming
    pub fn classify(start_time: &NaiveDateTime, now: &NaiveDateTime) -> Self {
        if start_time < now {
            ShowTiming::Past
        } else {
            ShowTiming::Upcoming
        }
    }
}

/// Split items into (past, upcoming), preserving input order within each list
pub fn partition_by_start_time<T, F>(items: Vec<T>, now: &NaiveDateTime, start_time: F) -> (Vec<T>, Vec<T>)
where
    F: Fn(&T) -> &NaiveDateTime,
{
    items
        .into_iter()
        .partition(|item| ShowTiming::classify(start_time(item), now) == ShowTiming::Past)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_canonical_format() {
        let parsed = parse_start_time("2035-04-01 20:00:00").unwrap();
        assert_eq!(parsed, at(2035, 4, 1, 20, 0));
    }

    #[test]
    fn test_parse_datetime_local_input() {
        assert_eq!(parse_start_time("2035-04-01T20:00").unwrap(), at(2035, 4, 1, 20, 0));
        assert_eq!(parse_start_time("2035-04-01T20:00:00").unwrap(), at(2035, 4, 1, 20, 0));
        assert_eq!(parse_start_time(" 2035-04-01 20:00 ").unwrap(), at(2035, 4, 1, 20, 0));
    }

    #[test]
    fn test_parse_rfc3339_is_accepted() {
        assert!(parse_start_time("2035-04-01T20:00:00+02:00").is_ok());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let result = parse_start_time("next tuesday");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_format_round_trips_canonical_text() {
        let text = "2019-05-21 21:30:00";
        assert_eq!(format_start_time(&parse_start_time(text).unwrap()), text);
    }

    #[test]
    fn test_classify_boundary_is_upcoming() {
        let now = at(2024, 1, 1, 12, 0);
        assert_eq!(ShowTiming::classify(&now, &now), ShowTiming::Upcoming);
        assert_eq!(ShowTiming::classify(&at(2024, 1, 1, 11, 59), &now), ShowTiming::Past);
        assert_eq!(ShowTiming::classify(&at(2024, 1, 1, 12, 1), &now), ShowTiming::Upcoming);
    }

    #[test]
    fn test_partition_preserves_order() {
        let now = at(2024, 6, 1, 0, 0);
        let shows = vec![
            ("a", at(2025, 1, 1, 0, 0)),
            ("b", at(2023, 1, 1, 0, 0)),
            ("c", at(2022, 1, 1, 0, 0)),
            ("d", at(2030, 1, 1, 0, 0)),
        ];

        let (past, upcoming) = partition_by_start_time(shows, &now, |(_, t)| t);

        let past: Vec<_> = past.iter().map(|(name, _)| *name).collect();
        let upcoming: Vec<_> = upcoming.iter().map(|(name, _)| *name).collect();
        assert_eq!(past, vec!["b", "c"]);
        assert_eq!(upcoming, vec!["a", "d"]);
    }

    #[test]
    fn test_serialize_start_time_uses_canonical_format() {
        #[derive(serde::Serialize)]
        struct Wrapper {
            #[serde(serialize_with = "serialize_start_time")]
            start_time: NaiveDateTime,
        }

        let json = serde_json::to_string(&Wrapper { start_time: at(2019, 5, 21, 21, 30) }).unwrap();
        assert_eq!(json, r#"{"start_time":"2019-05-21 21:30:00"}"#);
    }

    #[test]
    fn test_now_is_recent() {
        assert!(now() > at(2020, 1, 1, 0, 0));
    }
}
