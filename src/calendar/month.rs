use chrono::{NaiveDate, TimeZone, Weekday};

use super::day::{classify, GridDate};
use super::density::{count_with, is_in_day_with, DayMatching};
use super::grid::{generate_grid_with, GridStart, DAYS_IN_WEEK};
use super::instance::EventInterval;

/// Knobs of one render pass besides today and the instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub first_day_of_week: Weekday,
    pub start: GridStart,
    pub include_declined: bool,
    pub matching: DayMatching,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            first_day_of_week: Weekday::Mon,
            start: GridStart::NaturalMonth,
            include_declined: false,
            matching: DayMatching::MonthAndDay,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: GridDate,
    pub instances: usize,
}

/// The 42 classified cells of one render pass, with their instance counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub today: NaiveDate,
    pub first_day_of_week: Weekday,
    pub has_instances: bool,
    /// Distinct visible intervals touching at least one cell.
    pub shown_instances: usize,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn build<Tz: TimeZone>(
        today: NaiveDate,
        intervals: &[EventInterval],
        options: GridOptions,
        local: &Tz,
    ) -> Self {
        let visible: Vec<&EventInterval> = intervals
            .iter()
            .filter(|interval| options.include_declined || !interval.is_declined())
            .collect();

        let dates = generate_grid_with(today, options.first_day_of_week, options.start);
        let shown_instances = visible
            .iter()
            .filter(|interval| {
                dates
                    .iter()
                    .any(|&date| is_in_day_with(interval, date, local, options.matching))
            })
            .count();

        let cells = dates
            .into_iter()
            .map(|date| DayCell {
                day: classify(date, today),
                instances: count_with(visible.iter().copied(), date, local, options.matching),
            })
            .collect();

        Self {
            today,
            first_day_of_week: options.first_day_of_week,
            has_instances: !visible.is_empty(),
            shown_instances,
            cells,
        }
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_IN_WEEK)
    }

    pub fn total_instances(&self) -> usize {
        self.cells.iter().map(|cell| cell.instances).sum()
    }
}
