use chrono::Weekday;
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::calendar::DayCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
    Dracula,
    Gruvbox,
    Nord,
}

/// Text style plus per-weekday backgrounds for one kind of cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStylePack {
    pub text: Style,
    pub weekday_bg: Option<Color>,
    pub saturday_bg: Option<Color>,
    pub sunday_bg: Option<Color>,
}

impl CellStylePack {
    pub fn get(&self, weekday: Weekday) -> Style {
        let bg = match weekday {
            Weekday::Sat => self.saturday_bg,
            Weekday::Sun => self.sunday_bg,
            _ => self.weekday_bg,
        };
        match bg {
            Some(color) => self.text.bg(color),
            None => self.text,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: ThemeName,
    pub title: Style,
    pub border: Style,
    pub status: Style,
    pub header: CellStylePack,
    pub today: CellStylePack,
    pub in_month: CellStylePack,
    pub out_of_month: CellStylePack,
    pub today_instances: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn preset(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
            ThemeName::Dracula => Self::dracula(),
            ThemeName::Gruvbox => Self::gruvbox(),
            ThemeName::Nord => Self::nord(),
        }
    }

    /// Style of a day cell: category picks the pack, weekday the background.
    pub fn cell(&self, category: DayCategory, weekday: Weekday) -> Style {
        let pack = match category {
            DayCategory::Today => &self.today,
            DayCategory::InMonth => &self.in_month,
            DayCategory::OutOfMonth => &self.out_of_month,
        };
        pack.get(weekday)
    }

    pub fn header_cell(&self, weekday: Weekday) -> Style {
        self.header.get(weekday)
    }

    fn dark() -> Self {
        Self {
            name: ThemeName::Dark,
            title: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            border: Style::new().fg(Color::Gray),
            status: Style::new().fg(Color::White).bg(Color::DarkGray),
            header: CellStylePack {
                text: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
                weekday_bg: None,
                saturday_bg: Some(Color::Rgb(40, 40, 40)),
                sunday_bg: Some(Color::Rgb(50, 50, 50)),
            },
            today: CellStylePack {
                text: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
                weekday_bg: Some(Color::Yellow),
                saturday_bg: Some(Color::Yellow),
                sunday_bg: Some(Color::Yellow),
            },
            in_month: CellStylePack {
                text: Style::new().fg(Color::White),
                weekday_bg: Some(Color::Rgb(25, 25, 25)),
                saturday_bg: Some(Color::Rgb(40, 40, 40)),
                sunday_bg: Some(Color::Rgb(50, 50, 50)),
            },
            out_of_month: CellStylePack {
                text: Style::new().fg(Color::DarkGray),
                weekday_bg: None,
                saturday_bg: None,
                sunday_bg: None,
            },
            today_instances: Color::Black,
        }
    }

    fn light() -> Self {
        Self {
            name: ThemeName::Light,
            title: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
            border: Style::new().fg(Color::DarkGray),
            status: Style::new().fg(Color::Black).bg(Color::Gray),
            header: CellStylePack {
                text: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
                weekday_bg: None,
                saturday_bg: Some(Color::Rgb(225, 225, 225)),
                sunday_bg: Some(Color::Rgb(210, 210, 210)),
            },
            today: CellStylePack {
                text: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
                weekday_bg: Some(Color::Rgb(33, 150, 243)),
                saturday_bg: Some(Color::Rgb(33, 150, 243)),
                sunday_bg: Some(Color::Rgb(33, 150, 243)),
            },
            in_month: CellStylePack {
                text: Style::new().fg(Color::Black),
                weekday_bg: Some(Color::Rgb(245, 245, 245)),
                saturday_bg: Some(Color::Rgb(225, 225, 225)),
                sunday_bg: Some(Color::Rgb(210, 210, 210)),
            },
            out_of_month: CellStylePack {
                text: Style::new().fg(Color::Gray),
                weekday_bg: None,
                saturday_bg: None,
                sunday_bg: None,
            },
            today_instances: Color::White,
        }
    }

    fn dracula() -> Self {
        let fg = Color::Rgb(248, 248, 242);
        let comment = Color::Rgb(98, 114, 164);
        let current_line = Color::Rgb(68, 71, 90);
        Self {
            name: ThemeName::Dracula,
            title: Style::new().fg(fg).add_modifier(Modifier::BOLD),
            border: Style::new().fg(current_line),
            status: Style::new().fg(fg).bg(current_line),
            header: CellStylePack {
                text: Style::new().fg(fg).add_modifier(Modifier::BOLD),
                weekday_bg: None,
                saturday_bg: Some(current_line),
                sunday_bg: Some(current_line),
            },
            today: CellStylePack {
                text: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
                weekday_bg: Some(Color::Rgb(189, 147, 249)), // purple
                saturday_bg: Some(Color::Rgb(189, 147, 249)),
                sunday_bg: Some(Color::Rgb(189, 147, 249)),
            },
            in_month: CellStylePack {
                text: Style::new().fg(fg),
                weekday_bg: None,
                saturday_bg: Some(current_line),
                sunday_bg: Some(current_line),
            },
            out_of_month: CellStylePack {
                text: Style::new().fg(comment),
                weekday_bg: None,
                saturday_bg: None,
                sunday_bg: None,
            },
            today_instances: Color::Black,
        }
    }

    fn gruvbox() -> Self {
        let fg = Color::Rgb(235, 219, 178);
        let bg1 = Color::Rgb(80, 73, 69);
        Self {
            name: ThemeName::Gruvbox,
            title: Style::new().fg(fg).add_modifier(Modifier::BOLD),
            border: Style::new().fg(Color::Rgb(102, 92, 84)),
            status: Style::new().fg(fg).bg(bg1),
            header: CellStylePack {
                text: Style::new().fg(fg).add_modifier(Modifier::BOLD),
                weekday_bg: None,
                saturday_bg: Some(bg1),
                sunday_bg: Some(bg1),
            },
            today: CellStylePack {
                text: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
                weekday_bg: Some(Color::Rgb(250, 189, 47)), // yellow
                saturday_bg: Some(Color::Rgb(250, 189, 47)),
                sunday_bg: Some(Color::Rgb(250, 189, 47)),
            },
            in_month: CellStylePack {
                text: Style::new().fg(fg),
                weekday_bg: None,
                saturday_bg: Some(bg1),
                sunday_bg: Some(bg1),
            },
            out_of_month: CellStylePack {
                text: Style::new().fg(Color::Rgb(146, 131, 116)),
                weekday_bg: None,
                saturday_bg: None,
                sunday_bg: None,
            },
            today_instances: Color::Black,
        }
    }

    fn nord() -> Self {
        let snow = Color::Rgb(229, 233, 240);
        let polar = Color::Rgb(67, 76, 94);
        Self {
            name: ThemeName::Nord,
            title: Style::new().fg(snow).add_modifier(Modifier::BOLD),
            border: Style::new().fg(polar),
            status: Style::new().fg(snow).bg(polar),
            header: CellStylePack {
                text: Style::new().fg(snow).add_modifier(Modifier::BOLD),
                weekday_bg: None,
                saturday_bg: Some(polar),
                sunday_bg: Some(polar),
            },
            today: CellStylePack {
                text: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
                weekday_bg: Some(Color::Rgb(235, 203, 139)), // yellow
                saturday_bg: Some(Color::Rgb(235, 203, 139)),
                sunday_bg: Some(Color::Rgb(235, 203, 139)),
            },
            in_month: CellStylePack {
                text: Style::new().fg(snow),
                weekday_bg: None,
                saturday_bg: Some(polar),
                sunday_bg: Some(polar),
            },
            out_of_month: CellStylePack {
                text: Style::new().fg(Color::Rgb(76, 86, 106)),
                weekday_bg: None,
                saturday_bg: None,
                sunday_bg: None,
            },
            today_instances: Color::Black,
        }
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "mint" => Some(Color::Rgb(62, 180, 137)),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_wins_over_weekday_background() {
        let theme = Theme::default();
        assert_eq!(theme.cell(DayCategory::Today, Weekday::Sun).bg, Some(Color::Yellow));
        assert_eq!(theme.cell(DayCategory::Today, Weekday::Tue).bg, Some(Color::Yellow));
    }

    #[test]
    fn weekend_backgrounds_differ_in_month() {
        let theme = Theme::default();
        let weekday = theme.cell(DayCategory::InMonth, Weekday::Wed);
        let saturday = theme.cell(DayCategory::InMonth, Weekday::Sat);
        let sunday = theme.cell(DayCategory::InMonth, Weekday::Sun);
        assert_ne!(weekday.bg, saturday.bg);
        assert_ne!(saturday.bg, sunday.bg);
        assert_eq!(weekday.fg, saturday.fg);
    }

    #[test]
    fn out_of_month_cells_have_no_background() {
        for name in [
            ThemeName::Dark,
            ThemeName::Light,
            ThemeName::Dracula,
            ThemeName::Gruvbox,
            ThemeName::Nord,
        ] {
            let theme = Theme::preset(name);
            for weekday in [Weekday::Mon, Weekday::Sat, Weekday::Sun] {
                assert_eq!(theme.cell(DayCategory::OutOfMonth, weekday).bg, None, "{name:?}");
            }
        }
    }

    #[test]
    fn multibyte_hex_is_rejected() {
        assert_eq!(parse_color("#a€bc"), None);
        assert_eq!(parse_color("#ééé"), None);
    }

    #[test]
    fn header_uses_weekend_backgrounds() {
        let theme = Theme::preset(ThemeName::Gruvbox);
        assert_eq!(theme.header_cell(Weekday::Mon).bg, None);
        assert!(theme.header_cell(Weekday::Sat).bg.is_some());
    }

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(parse_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_color(" Cyan "), Some(Color::Cyan));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#12345g"), None);
        assert_eq!(parse_color("plaid"), None);
    }
}
