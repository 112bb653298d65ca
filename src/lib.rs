//! Month-grid calendar: a 42-day grid with per-day event density.

pub mod app;
pub mod calendar;
pub mod components;
pub mod config;
pub mod input;
pub mod logging;
pub mod provider;
pub mod symbols;
pub mod theme;
pub mod tui;
