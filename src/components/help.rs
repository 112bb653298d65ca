use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

const BINDINGS: [(&str, &str); 6] = [
    ("q / Ctrl-C", "Quit"),
    ("r", "Refresh instances"),
    ("s", "Cycle density symbols"),
    ("w", "Toggle current-week focus"),
    ("?", "Toggle this help"),
    ("Esc", "Close help"),
];

pub struct HelpPopup;

impl HelpPopup {
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_w = area.width.clamp(20, 44).min(area.width);
        let popup_h = (BINDINGS.len() as u16 + 2).min(area.height);
        let x = area.x + area.width.saturating_sub(popup_w) / 2;
        let y = area.y + area.height.saturating_sub(popup_h) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keybindings ")
            .title_style(theme.title)
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let key_style = Style::default().add_modifier(Modifier::BOLD);
        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!(" {:<11}", key), key_style),
                    Span::raw(*desc),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
