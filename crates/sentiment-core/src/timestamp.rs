//! Timestamp decomposition into date and time parts.
//!
//! Parsing never fails outward: anything that is not a recognized date/time
//! becomes [`TimestampParts::UNAVAILABLE`] for that row only. Values are taken
//! as wall-clock time; no timezone conversion is applied.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use sentiment_model::{CellValue, RecordSet, TIMESTAMP_COLUMN, TimestampParts};
use tracing::debug;

use crate::redact::redact_value;

/// Date-time layouts tried in order. Month-first slash dates win over
/// day-first ones when both would parse.
const DATETIME_FORMATS: [&str; 14] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%d-%b-%Y %H:%M",
    "%b %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
];

/// Date-only layouts; these get a midnight time part.
const DATE_FORMATS: [&str; 13] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%Y-%b-%d",
    "%Y%m%d",
];

/// Per-record-set timestamp policy.
///
/// Whether the `timestamp` column exists is decided once for the whole set;
/// when it is absent every row is unavailable without looking at the cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampNormalizer {
    column_present: bool,
}

impl TimestampNormalizer {
    pub fn for_record_set(set: &RecordSet) -> Self {
        Self {
            column_present: set.has_column(TIMESTAMP_COLUMN),
        }
    }

    pub fn column_present(&self) -> bool {
        self.column_present
    }

    /// Splits one raw timestamp value, degrading to unavailable on failure.
    pub fn normalize(&self, raw: Option<&CellValue>) -> TimestampParts {
        if !self.column_present {
            return TimestampParts::UNAVAILABLE;
        }
        let Some(value) = raw else {
            return TimestampParts::UNAVAILABLE;
        };
        match parse_timestamp(value) {
            Some(parsed) => TimestampParts::from(parsed),
            None => {
                if !value.is_missing() {
                    debug!(
                        value = %redact_value(&value.to_text()),
                        "unrecognized timestamp; date and time unavailable"
                    );
                }
                TimestampParts::UNAVAILABLE
            }
        }
    }
}

/// Interprets a cell as a naive date-time.
///
/// Numbers are Unix epoch seconds; text is tried against RFC 3339, RFC 2822
/// and the layouts above.
pub fn parse_timestamp(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::DateTime(parsed) => Some(*parsed),
        CellValue::Text(text) => parse_timestamp_text(text),
        CellValue::Integer(seconds) => DateTime::from_timestamp(*seconds, 0).map(|dt| dt.naive_utc()),
        CellValue::Float(seconds) => from_epoch_float(*seconds),
        CellValue::Bool(_) | CellValue::Missing => None,
    }
}

/// Parses a textual timestamp.
pub fn parse_timestamp_text(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Offsets are dropped, keeping the wall-clock reading.
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.naive_local());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Some(dt);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
}

fn from_epoch_float(seconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() || seconds.abs() > i64::MAX as f64 {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999)).map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_model::{DatePart, FileKind, TimePart};

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_common_layouts() {
        let expected = datetime(2024, 1, 15, 10, 30, 0);
        for raw in [
            "2024-01-15 10:30:00",
            "2024-01-15T10:30:00",
            "2024-01-15T10:30",
            "2024/01/15 10:30",
            "01/15/2024 10:30:00",
            "15-Jan-2024 10:30",
            "2024-01-15T10:30:00Z",
            "2024-01-15T10:30:00+05:00",
        ] {
            assert_eq!(parse_timestamp_text(raw), Some(expected), "layout {raw}");
        }
    }

    #[test]
    fn date_only_is_midnight() {
        assert_eq!(
            parse_timestamp_text("2023-12-25"),
            Some(datetime(2023, 12, 25, 0, 0, 0))
        );
        assert_eq!(
            parse_timestamp_text("25.12.2023"),
            Some(datetime(2023, 12, 25, 0, 0, 0))
        );
    }

    #[test]
    fn month_first_wins_for_ambiguous_slashes() {
        assert_eq!(
            parse_timestamp_text("01/02/2024"),
            Some(datetime(2024, 1, 2, 0, 0, 0))
        );
        // Only valid day-first.
        assert_eq!(
            parse_timestamp_text("31/01/2024"),
            Some(datetime(2024, 1, 31, 0, 0, 0))
        );
    }

    #[test]
    fn offsets_are_not_converted() {
        let parsed = parse_timestamp_text("2024-06-01T23:15:00-07:00").unwrap();
        assert_eq!(parsed, datetime(2024, 6, 1, 23, 15, 0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp_text("not-a-date"), None);
        assert_eq!(parse_timestamp_text(""), None);
        assert_eq!(parse_timestamp_text("2023-13-01"), None);
        assert_eq!(parse_timestamp(&CellValue::Bool(true)), None);
        assert_eq!(parse_timestamp(&CellValue::Float(f64::NAN)), None);
    }

    #[test]
    fn numbers_are_epoch_seconds() {
        assert_eq!(
            parse_timestamp(&CellValue::Integer(1_700_000_000)),
            Some(datetime(2023, 11, 14, 22, 13, 20))
        );
        let half = parse_timestamp(&CellValue::Float(1.5)).unwrap();
        assert_eq!(half.and_utc().timestamp_millis(), 1_500);
    }

    #[test]
    fn absent_column_is_unavailable_for_every_row() {
        let set = RecordSet::new(FileKind::Csv, vec!["text".to_string()]);
        let normalizer = TimestampNormalizer::for_record_set(&set);
        assert!(!normalizer.column_present());
        let raw = CellValue::Text("2024-01-15".to_string());
        assert_eq!(normalizer.normalize(Some(&raw)), TimestampParts::UNAVAILABLE);
    }

    #[test]
    fn present_column_splits_parts() {
        let set = RecordSet::new(
            FileKind::Csv,
            vec!["text".to_string(), "timestamp".to_string()],
        );
        let normalizer = TimestampNormalizer::for_record_set(&set);
        let parts = normalizer.normalize(Some(&CellValue::Text("2024-03-09 07:05:00".to_string())));
        assert_eq!(
            parts.date,
            DatePart::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
        );
        assert_eq!(
            parts.time,
            TimePart::Time(NaiveTime::from_hms_opt(7, 5, 0).unwrap())
        );
        assert_eq!(normalizer.normalize(Some(&CellValue::Missing)), TimestampParts::UNAVAILABLE);
        assert_eq!(normalizer.normalize(None), TimestampParts::UNAVAILABLE);
    }
}
