use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let w = area.width as usize;
        let style = app.theme.status;

        let left = format!(
            " {} instances  [{}] ",
            app.grid.shown_instances,
            app.config.symbol_set.name()
        );

        let right = match &app.status_message {
            Some(msg) => format!(" {} ", msg),
            None if w >= 70 => " r:Refresh s:Symbols w:Week ?:Help q:Quit ".to_string(),
            None if w >= 40 => " r:Refresh ?:Help q:Quit ".to_string(),
            None => " q:Quit ".to_string(),
        };

        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, style),
            Span::styled(padding, style),
            Span::styled(right, style),
        ]);

        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}
