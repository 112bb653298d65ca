use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone};

/// Julian day number of 0001-01-01 minus one, so that
/// `num_days_from_ce() + JULIAN_DAY_OFFSET` is the provider's day index.
const JULIAN_DAY_OFFSET: i64 = 1_721_425;

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

/// Julian day number as used by calendar providers to mark all-day
/// boundaries (1970-01-01 is 2440588).
pub fn julian_day(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) + JULIAN_DAY_OFFSET
}

/// First instant of `date` in `tz`.
///
/// Zones that skip midnight (DST starting at 00:00) resolve to the first
/// valid local time after the gap.
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=2)
        .find_map(|hours| {
            tz.from_local_datetime(&(midnight + Duration::hours(hours)))
                .earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

pub fn start_of_day_millis<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    start_of_day(date, tz).timestamp_millis()
}
