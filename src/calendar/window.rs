use chrono::{NaiveDate, TimeZone};

use super::date::{add_days, start_of_day_millis};

/// Days fetched on each side of today. A six-week grid shows at most two
/// weeks of the adjacent months, the rest is headroom for display lag.
pub const CALENDAR_DAYS_SPAN: i64 = 45;

/// Half-open `[start, end)` fetch window in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: i64,
    pub end: i64,
}

impl TimeSpan {
    pub fn contains(&self, millis: i64) -> bool {
        millis >= self.start && millis < self.end
    }
}

/// Local midnight of `today - 45 days` to local midnight of `today + 45 days`.
pub fn compute_window<Tz: TimeZone>(today: NaiveDate, tz: &Tz) -> TimeSpan {
    TimeSpan {
        start: start_of_day_millis(add_days(today, -CALENDAR_DAYS_SPAN), tz),
        end: start_of_day_millis(add_days(today, CALENDAR_DAYS_SPAN), tz),
    }
}
