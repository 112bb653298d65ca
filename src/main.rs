use std::time::Duration;

use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::Paragraph,
    Frame,
};
use tracing::info;

use minical::app::{resolver_from_config, App};
use minical::components::{HelpPopup, MonthView, StatusBar, Symbols};
use minical::config::Config;
use minical::{input, logging, tui};

const TICK: Duration = Duration::from_millis(100);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let log_file = logging::init()?;
    info!(log = ?log_file, "starting minical");

    let config = Config::load()?;
    let resolver = resolver_from_config(&config)?;
    let mut app = App::new(config, resolver);
    app.refresh().await;

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app).await;
    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| draw(frame, app))?;

        if let Some(key) = input::next_key(TICK)? {
            app.status_message = None;
            if let Some(action) = input::action_for(key) {
                app.handle(action).await;
            }
        }

        if app.needs_refresh() {
            app.refresh().await;
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

    if !app.access_granted {
        let msg = Paragraph::new(
            "Calendar access not granted.\n\n\
             The grid is shown without instances.\n\
             Press 'r' to retry or 'q' to quit.",
        )
        .style(app.theme.header.text);
        let rows = Layout::vertical([Constraint::Length(4), Constraint::Min(1)]).split(layout[0]);
        frame.render_widget(msg, rows[0]);
        render_grid(frame, rows[1], app);
    } else {
        render_grid(frame, layout[0], app);
    }

    if app.show_help {
        HelpPopup::render(frame, area, &app.theme);
    }

    StatusBar::render(frame, layout[1], app);
}

fn render_grid(frame: &mut Frame, area: Rect, app: &App) {
    let symbols = Symbols {
        set: app.config.symbol_set,
        colour: app.config.symbol_colour,
    };
    MonthView::render(frame, area, &app.grid, &app.theme, symbols);
}
