use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use super::window::TimeSpan;

const MILLIS_IN_A_DAY: i64 = 86_400_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    #[error("Invalid interval: end {end_ms} is before start {start_ms}")]
    InvalidInterval { start_ms: i64, end_ms: i64 },

    #[error("Timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}

/// One row as handed over by a calendar provider.
///
/// `begin`/`end` are epoch milliseconds, `start_day`/`end_day` are the
/// provider's Julian day numbers for the instance boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct InstanceRow {
    pub begin: i64,
    pub end: i64,
    pub start_day: i64,
    pub end_day: i64,
    #[serde(default)]
    pub declined: bool,
}

impl InstanceRow {
    pub fn new(begin: i64, end: i64, start_day: i64, end_day: i64) -> Self {
        Self {
            begin,
            end,
            start_day,
            end_day,
            declined: false,
        }
    }

    pub fn declined(mut self) -> Self {
        self.declined = true;
        self
    }

    /// Whether the row intersects the `[start, end)` fetch window.
    pub fn overlaps(&self, window: &TimeSpan) -> bool {
        if self.begin == self.end {
            return window.contains(self.begin);
        }
        self.begin < window.end && self.end > window.start
    }
}

/// A single event occurrence, immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    all_day: bool,
    declined: bool,
}

impl EventInterval {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        all_day: bool,
    ) -> Result<Self, IntervalError> {
        if end < start {
            return Err(IntervalError::InvalidInterval {
                start_ms: start.timestamp_millis(),
                end_ms: end.timestamp_millis(),
            });
        }
        Ok(Self {
            start,
            end,
            all_day,
            declined: false,
        })
    }

    /// Build from a provider row, deriving the all-day flag.
    ///
    /// A row is all-day only when its duration is a whole number of days and
    /// that number agrees with the provider's Julian day span. A timed event
    /// lasting exactly 24h (9:00 to 9:00) spans two Julian days and stays timed.
    pub fn from_row(row: &InstanceRow) -> Result<Self, IntervalError> {
        let start = to_utc(row.begin)?;
        let end = to_utc(row.end)?;
        let all_day = is_all_day(row);
        let mut interval = Self::new(start, end, all_day)?;
        interval.declined = row.declined;
        Ok(interval)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn is_all_day(&self) -> bool {
        self.all_day
    }

    pub fn is_declined(&self) -> bool {
        self.declined
    }
}

/// Whole days whose count matches the Julian day span. Julian days come
/// straight from the provider, so a span that overflows is not all-day.
fn is_all_day(row: &InstanceRow) -> bool {
    let duration = row.end - row.begin;
    let days = row
        .end_day
        .checked_sub(row.start_day)
        .and_then(|span| span.checked_add(1));
    duration % MILLIS_IN_A_DAY == 0 && Some(duration / MILLIS_IN_A_DAY) == days
}

fn to_utc(millis: i64) -> Result<DateTime<Utc>, IntervalError> {
    DateTime::from_timestamp_millis(millis).ok_or(IntervalError::TimestampOutOfRange(millis))
}
