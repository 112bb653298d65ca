use chrono::{Datelike, NaiveDate, Weekday};

/// Display category of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCategory {
    Today,
    InMonth,
    OutOfMonth,
}

/// A grid cell's date classified against today and the displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDate {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_in_displayed_month: bool,
    pub weekday: Weekday,
}

impl GridDate {
    pub fn category(&self) -> DayCategory {
        match (self.is_today, self.is_in_displayed_month) {
            (true, _) => DayCategory::Today,
            (false, true) => DayCategory::InMonth,
            (false, false) => DayCategory::OutOfMonth,
        }
    }

    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday, Weekday::Sat | Weekday::Sun)
    }
}

/// The displayed month is always the month containing `today`.
pub fn classify(date: NaiveDate, today: NaiveDate) -> GridDate {
    let is_in_displayed_month = date.year() == today.year() && date.month() == today.month();
    GridDate {
        date,
        is_today: is_in_displayed_month && date.ordinal() == today.ordinal(),
        is_in_displayed_month,
        weekday: date.weekday(),
    }
}
