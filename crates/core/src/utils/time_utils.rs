use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::constants::MILLIS_PER_DAY;

/// Source of the current instant.
///
/// Derivations that depend on "now" take a clock instead of reading the wall
/// clock, so that countdowns and overdue checks are reproducible.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant (for testing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Returns a clock moved forward (or backward, for negative durations).
    pub fn advanced_by(&self, delta: Duration) -> Self {
        Self(self.0 + delta)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Parses a timestamp as it appears in task records.
///
/// Accepts, in order:
/// - RFC 3339 (`2025-03-01T12:00:00Z`, `2025-03-01T12:00:00.000+02:00`)
/// - naive date-time, read as UTC (`2025-03-01T12:00:00`)
/// - bare calendar date, read as UTC midnight (`2025-03-01`)
pub fn parse_record_datetime(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// Whole days from `now` until `target`, rounded up.
///
/// A fraction of a day remaining counts as a full day; once `target` has
/// passed the result is zero or negative.
pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (target - now).num_milliseconds();
    let whole = millis / MILLIS_PER_DAY;
    // Integer division truncates toward zero, which is already the ceiling
    // for negative values.
    if millis % MILLIS_PER_DAY > 0 {
        whole + 1
    } else {
        whole
    }
}
