//! Time-of-day parsing and interval overlap checks.
//!
//! Talk times are stored as wall-clock "HH:MM" text without a date or time
//! zone, so they are only comparable within a single day. Anything that does
//! not parse is treated as an unknown time rather than an error.

use chrono::NaiveTime;

const TIME_FORMAT: &str = "%H:%M";

/// A half-open `[start, end)` slot within one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// True if this slot shares any instant with `other`
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Parses a 24-hour "HH:MM" value, returning `None` for empty or malformed input
pub fn parse_time(value: Option<&str>) -> Option<NaiveTime> {
    let value = value?;
    if value.is_empty() {
        return None;
    }

    match NaiveTime::parse_from_str(value, TIME_FORMAT) {
        Ok(time) => Some(time),
        Err(e) => {
            tracing::warn!(value = %value, error = %e, "Unparseable time of day");
            None
        }
    }
}

/// Builds a slot from start/end text; `None` unless both ends parse
pub fn parse_range(start: Option<&str>, end: Option<&str>) -> Option<TimeRange> {
    let start = parse_time(start)?;
    let end = parse_time(end)?;
    Some(TimeRange::new(start, end))
}

/// Whether `[start, end)` intersects any of `intervals`
///
/// Back-to-back slots sharing only a boundary do not overlap.
pub fn overlaps(start: NaiveTime, end: NaiveTime, intervals: &[TimeRange]) -> bool {
    let candidate = TimeRange::new(start, end);
    intervals.iter().any(|saved| candidate.overlaps(saved))
}
