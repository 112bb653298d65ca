use chrono::{Datelike, Weekday};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::grid::DAYS_IN_WEEK;
use crate::calendar::{DayCategory, DayCell, MonthGrid};
use crate::symbols::SymbolSet;
use crate::theme::Theme;

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Size class of the grid, picked from the available width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Standard,
    Reduced,
}

impl Format {
    const STANDARD_MIN_WIDTH: u16 = 36;

    pub fn for_width(width: u16) -> Self {
        if width >= Self::STANDARD_MIN_WIDTH {
            Format::Standard
        } else {
            Format::Reduced
        }
    }

    pub fn cell_width(&self) -> usize {
        match self {
            Format::Standard => 5,
            Format::Reduced => 4,
        }
    }

    pub fn day_header_label(&self, weekday: Weekday) -> &'static str {
        let name = DAY_NAMES[weekday.num_days_from_monday() as usize];
        match self {
            Format::Standard => name,
            Format::Reduced => &name[..1],
        }
    }

    pub fn month_header_label(&self, month: u32) -> &'static str {
        let name = month_name(month);
        match self {
            Format::Standard => name,
            Format::Reduced => &name[..3.min(name.len())],
        }
    }
}

/// Options the view needs besides the grid and theme.
#[derive(Debug, Clone, Copy)]
pub struct Symbols {
    pub set: SymbolSet,
    pub colour: Color,
}

pub struct MonthView;

impl MonthView {
    pub fn render(frame: &mut Frame, area: Rect, grid: &MonthGrid, theme: &Theme, symbols: Symbols) {
        let block = Block::default().borders(Borders::ALL).border_style(theme.border);
        let inner = block.inner(area);
        let format = Format::for_width(inner.width);

        let title = format!(
            " {} {} ",
            format.month_header_label(grid.today.month()),
            grid.today.year()
        );
        let block = block.title(title).title_style(theme.title);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(grid.weeks().count() as u16),
            Constraint::Min(0),
        ])
        .split(inner);

        frame.render_widget(Paragraph::new(header_line(grid, theme, format)), rows[0]);

        let show_symbols = symbols.set != SymbolSet::None && grid.has_instances;
        let weeks: Vec<Line> = grid
            .weeks()
            .map(|week| {
                Line::from(
                    week.iter()
                        .map(|cell| day_span(cell, theme, symbols, show_symbols, format))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        frame.render_widget(Paragraph::new(weeks), rows[1]);
    }
}

fn header_line(grid: &MonthGrid, theme: &Theme, format: Format) -> Line<'static> {
    let width = format.cell_width();
    let mut weekday = grid.first_day_of_week;
    let mut cells = Vec::with_capacity(DAYS_IN_WEEK);
    for _ in 0..DAYS_IN_WEEK {
        cells.push(Span::styled(
            format!("{:^width$}", format.day_header_label(weekday)),
            theme.header_cell(weekday),
        ));
        weekday = weekday.succ();
    }
    Line::from(cells)
}

fn day_span(
    cell: &DayCell,
    theme: &Theme,
    symbols: Symbols,
    show_symbols: bool,
    format: Format,
) -> Span<'static> {
    let category = cell.day.category();
    let style = theme.cell(category, cell.day.weekday);
    let symbol = if show_symbols {
        symbols.set.get(cell.instances)
    } else {
        ' '
    };

    let text = match format {
        Format::Standard => format!(" {:>2}{} ", cell.day.day_of_month(), symbol),
        Format::Reduced => format!("{:>2}{} ", cell.day.day_of_month(), symbol),
    };

    // Symbol colour only shows through on cells the theme does not invert.
    let style = match category {
        DayCategory::Today => style.fg(theme.today_instances).add_modifier(Modifier::BOLD),
        _ if cell.instances > 0 && show_symbols => style.patch(Style::new().fg(symbols.colour)),
        _ => style,
    };
    Span::styled(text, style)
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
