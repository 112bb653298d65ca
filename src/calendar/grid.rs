use chrono::{Datelike, NaiveDate, Weekday};

use super::date::{add_days, first_of_month};

pub const NUM_WEEKS: usize = 6;
pub const DAYS_IN_WEEK: usize = 7;
pub const NUMBER_OF_DAYS: usize = NUM_WEEKS * DAYS_IN_WEEK;

const MONTH_FIRST_DAY: u32 = 1;
const MAXIMUM_DAYS_IN_MONTH: u32 = 31;

/// Where the first grid cell is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStart {
    /// Six weeks covering the whole month that contains today.
    #[default]
    NaturalMonth,
    /// Six weeks starting one or two weeks before the current week.
    CurrentWeek,
}

/// The 42 consecutive dates of the month grid containing `today`.
pub fn generate_grid(today: NaiveDate, first_day_of_week: Weekday) -> Vec<NaiveDate> {
    generate_grid_from(natural_month_start(today, first_day_of_week))
}

pub fn generate_grid_with(
    today: NaiveDate,
    first_day_of_week: Weekday,
    start: GridStart,
) -> Vec<NaiveDate> {
    let initial = match start {
        GridStart::NaturalMonth => natural_month_start(today, first_day_of_week),
        GridStart::CurrentWeek => current_week_start(today, first_day_of_week),
    };
    generate_grid_from(initial)
}

fn generate_grid_from(initial: NaiveDate) -> Vec<NaiveDate> {
    (0..NUMBER_OF_DAYS as i64)
        .map(|offset| add_days(initial, offset))
        .collect()
}

/// First cell of the natural month grid.
///
/// Shifting the 1st by the weekday difference can land inside the month
/// when the configured first day falls after the 1st's weekday; one week is
/// then rolled back. A correct roll-back always ends in the first half of
/// a month, hence the fixed `< 15` bound.
pub fn natural_month_start(today: NaiveDate, first_day_of_week: Weekday) -> NaiveDate {
    let first = first_of_month(today);
    let difference = i64::from(first_day_of_week.num_days_from_monday())
        - i64::from(first.weekday().number_from_monday())
        + 1;
    let candidate = add_days(first, difference);

    if candidate.day() > MONTH_FIRST_DAY && candidate.day() < MAXIMUM_DAYS_IN_MONTH / 2 {
        add_days(candidate, -(DAYS_IN_WEEK as i64))
    } else {
        candidate
    }
}

/// First cell when the grid follows the current week instead of the month.
pub fn current_week_start(today: NaiveDate, first_day_of_week: Weekday) -> NaiveDate {
    let iso_monday = add_days(today, -i64::from(today.weekday().num_days_from_monday()));
    let in_week = add_days(iso_monday, i64::from(first_day_of_week.num_days_from_monday()));
    let weeks_back = if in_week > today { 2 } else { 1 };
    add_days(in_week, -(weeks_back * DAYS_IN_WEEK as i64))
}
