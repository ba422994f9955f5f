use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: [&str; 9] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// A parsed timestamp: the wall-clock reading plus the UTC offset it was
/// written in, when the encoding carried one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTimestamp {
    pub wall_clock: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

impl ParsedTimestamp {
    fn naive(wall_clock: NaiveDateTime) -> Self {
        Self {
            wall_clock,
            offset: None,
        }
    }
}

/// Parses the date-time encodings seen in transaction exports.
///
/// RFC 3339 values keep the wall-clock time of their offset, so the
/// hour-of-day is the one the cardholder saw. Wall-clock readings are only
/// comparable as instants when every row shares the same offset. A bare date
/// means midnight.
pub fn parse_timestamp(value: &str) -> Option<ParsedTimestamp> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(ParsedTimestamp::naive(timestamp));
        }
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ParsedTimestamp {
            wall_clock: timestamp.naive_local(),
            offset: Some(*timestamp.offset()),
        });
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(ParsedTimestamp::naive)
}
