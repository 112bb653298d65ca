pub mod date;
pub mod day;
pub mod density;
pub mod grid;
pub mod instance;
pub mod month;
pub mod window;

pub use day::{classify, DayCategory, GridDate};
pub use density::{count, is_in_day, DayMatching};
pub use grid::{generate_grid, GridStart};
pub use instance::{EventInterval, InstanceRow, IntervalError};
pub use month::{DayCell, GridOptions, MonthGrid};
pub use window::{compute_window, TimeSpan};
