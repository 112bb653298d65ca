use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

use super::instance::EventInterval;

/// Taken off the end so that events closing at 00:00 (and the exclusive
/// end of all-day events) do not spill into the next day.
const END_ADJUSTMENT_MILLIS: i64 = 5;

/// How an interval's local boundary dates are compared with a grid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayMatching {
    /// Month and day-of-month compared separately, ignoring the year.
    /// Only meaningful within a couple of months around the displayed one.
    #[default]
    MonthAndDay,
    /// Full chronological comparison of the boundary dates.
    Chronological,
}

/// Whether `interval` has any part on `date`.
///
/// All-day boundaries are stored in UTC by providers; timed ones are
/// absolute instants bucketed in the viewer's zone `local`.
pub fn is_in_day<Tz: TimeZone>(interval: &EventInterval, date: NaiveDate, local: &Tz) -> bool {
    is_in_day_with(interval, date, local, DayMatching::MonthAndDay)
}

pub fn is_in_day_with<Tz: TimeZone>(
    interval: &EventInterval,
    date: NaiveDate,
    local: &Tz,
    matching: DayMatching,
) -> bool {
    let all_day = interval.is_all_day();
    let start = to_local_date(interval.start(), all_day, local);
    let end = to_local_date(
        interval.end() - Duration::milliseconds(END_ADJUSTMENT_MILLIS),
        all_day,
        local,
    );

    match matching {
        DayMatching::MonthAndDay => {
            start.month() <= date.month()
                && start.day() <= date.day()
                && end.month() >= date.month()
                && end.day() >= date.day()
        }
        DayMatching::Chronological => start <= date && end >= date,
    }
}

/// Number of intervals touching `date`.
pub fn count<'a, Tz, I>(intervals: I, date: NaiveDate, local: &Tz) -> usize
where
    Tz: TimeZone,
    I: IntoIterator<Item = &'a EventInterval>,
{
    count_with(intervals, date, local, DayMatching::MonthAndDay)
}

pub fn count_with<'a, Tz, I>(intervals: I, date: NaiveDate, local: &Tz, matching: DayMatching) -> usize
where
    Tz: TimeZone,
    I: IntoIterator<Item = &'a EventInterval>,
{
    intervals
        .into_iter()
        .filter(|interval| is_in_day_with(interval, date, local, matching))
        .count()
}

fn to_local_date<Tz: TimeZone>(instant: DateTime<Utc>, all_day: bool, local: &Tz) -> NaiveDate {
    if all_day {
        instant.date_naive()
    } else {
        instant.with_timezone(local).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;
    use crate::calendar::instance::InstanceRow;

    const HOUR: i64 = 3_600_000;
    const DAY: i64 = 24 * HOUR;
    // 2018-12-04T00:00Z
    const DEC_4: i64 = 1_543_881_600_000;
    const DEC_4_JULIAN: i64 = 2_458_457;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn interval(begin: i64, end: i64, start_day: i64, end_day: i64) -> EventInterval {
        EventInterval::from_row(&InstanceRow::new(begin, end, start_day, end_day)).expect("valid row")
    }

    fn all_day_dec_4() -> EventInterval {
        interval(DEC_4, DEC_4 + DAY, DEC_4_JULIAN, DEC_4_JULIAN)
    }

    #[test]
    fn all_day_event_covers_exactly_its_day() {
        let event = all_day_dec_4();
        assert!(event.is_all_day());
        assert!(is_in_day(&event, ymd(2018, 12, 4), &Utc));
        assert!(!is_in_day(&event, ymd(2018, 12, 3), &Utc));
        assert!(!is_in_day(&event, ymd(2018, 12, 5), &Utc));
    }

    #[test]
    fn all_day_event_ignores_viewer_offset() {
        let event = all_day_dec_4();
        for offset in [-11, -5, 0, 3, 9, 13] {
            let tz = FixedOffset::east_opt(offset * 3600).expect("valid offset");
            assert!(is_in_day(&event, ymd(2018, 12, 4), &tz), "offset {offset}");
            assert!(!is_in_day(&event, ymd(2018, 12, 3), &tz), "offset {offset}");
            assert!(!is_in_day(&event, ymd(2018, 12, 5), &tz), "offset {offset}");
        }
    }

    #[test]
    fn timed_event_across_midnight_counts_for_both_days() {
        // 22:00 to 01:00 local time at UTC+1
        let tz = FixedOffset::east_opt(3600).expect("valid offset");
        let start = DEC_4 - 2 * HOUR - HOUR;
        let event = interval(start, start + 3 * HOUR, DEC_4_JULIAN - 1, DEC_4_JULIAN);
        assert!(!event.is_all_day());
        assert!(is_in_day(&event, ymd(2018, 12, 3), &tz));
        assert!(is_in_day(&event, ymd(2018, 12, 4), &tz));
        assert!(!is_in_day(&event, ymd(2018, 12, 5), &tz));
    }

    #[test]
    fn timed_event_ending_at_midnight_stays_in_its_day() {
        // 22:00 to 00:00 UTC
        let event = interval(DEC_4 - 2 * HOUR, DEC_4, DEC_4_JULIAN - 1, DEC_4_JULIAN);
        assert!(is_in_day(&event, ymd(2018, 12, 3), &Utc));
        assert!(!is_in_day(&event, ymd(2018, 12, 4), &Utc));
    }

    #[test]
    fn timed_event_is_bucketed_in_local_zone() {
        // 02:00Z on the 4th is still the 3rd at UTC-5
        let event = interval(DEC_4 + 2 * HOUR, DEC_4 + 3 * HOUR, DEC_4_JULIAN, DEC_4_JULIAN);
        let tz = FixedOffset::west_opt(5 * 3600).expect("valid offset");
        assert!(is_in_day(&event, ymd(2018, 12, 3), &tz));
        assert!(!is_in_day(&event, ymd(2018, 12, 4), &tz));
        assert!(is_in_day(&event, ymd(2018, 12, 4), &Utc));
    }

    #[test]
    fn month_and_day_matching_misses_spans_crossing_a_month_end() {
        // 2018-11-28T00:00Z to 2018-12-02T00:00Z, all day
        let start = DEC_4 - 6 * DAY;
        let event = interval(start, start + 4 * DAY, DEC_4_JULIAN - 6, DEC_4_JULIAN - 3);
        assert!(event.is_all_day());

        let dec_1 = ymd(2018, 12, 1);
        assert!(!is_in_day(&event, dec_1, &Utc));
        assert!(is_in_day_with(&event, dec_1, &Utc, DayMatching::Chronological));
        assert!(is_in_day_with(&event, ymd(2018, 11, 30), &Utc, DayMatching::Chronological));
        assert!(!is_in_day_with(&event, ymd(2018, 12, 2), &Utc, DayMatching::Chronological));
    }

    #[test]
    fn count_over_mixed_instances() {
        let instances = vec![
            interval(DEC_4, DEC_4 + DAY - 1000, DEC_4_JULIAN, DEC_4_JULIAN),
            interval(DEC_4 + 22 * HOUR, DEC_4 + DAY, DEC_4_JULIAN, DEC_4_JULIAN + 1),
        ];
        assert_eq!(count(&instances, ymd(2018, 12, 4), &Utc), 2);
    }

    #[test]
    fn count_instances_spanning_several_days() {
        let instances = vec![
            // 12/3 00:00 - 12/5 00:00 (minus 1s)
            interval(DEC_4 - DAY, DEC_4 + DAY - 1000, DEC_4_JULIAN - 1, DEC_4_JULIAN),
            // 12/4 00:00 - 12/6 00:00
            interval(DEC_4, DEC_4 + 2 * DAY, DEC_4_JULIAN, DEC_4_JULIAN + 1),
            // 12/3 19:00 - 12/3 22:00 UTC
            interval(DEC_4 - 5 * HOUR, DEC_4 - 2 * HOUR, DEC_4_JULIAN - 1, DEC_4_JULIAN - 1),
            // 12/4 00:00 - 12/5 10:00
            interval(DEC_4, DEC_4 + 34 * HOUR, DEC_4_JULIAN, DEC_4_JULIAN + 1),
        ];
        assert_eq!(count(&instances, ymd(2018, 12, 4), &Utc), 3);
        assert_eq!(count(&instances, ymd(2018, 12, 3), &Utc), 2);
        assert_eq!(count(&instances, ymd(2018, 12, 5), &Utc), 2);
    }

    #[test]
    fn count_excludes_instances_before_and_after() {
        let instances = vec![
            interval(DEC_4 - DAY, DEC_4, DEC_4_JULIAN - 1, DEC_4_JULIAN - 1),
            interval(DEC_4 + DAY, DEC_4 + 2 * DAY, DEC_4_JULIAN + 1, DEC_4_JULIAN + 1),
            interval(DEC_4 - 2 * HOUR, DEC_4, DEC_4_JULIAN - 1, DEC_4_JULIAN),
            interval(DEC_4 + DAY, DEC_4 + 34 * HOUR, DEC_4_JULIAN + 1, DEC_4_JULIAN + 1),
        ];
        assert_eq!(count(&instances, ymd(2018, 12, 4), &Utc), 0);
    }

    #[test]
    fn count_of_nothing_is_zero() {
        let none: Vec<EventInterval> = Vec::new();
        assert_eq!(count(&none, ymd(2018, 12, 4), &Utc), 0);
    }
}
