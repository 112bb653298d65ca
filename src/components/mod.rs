pub mod help;
pub mod month_view;
pub mod status_bar;

pub use help::HelpPopup;
pub use month_view::{MonthView, Symbols};
pub use status_bar::StatusBar;
