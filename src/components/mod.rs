pub mod detail_screen;
pub mod list_screen;
pub mod tile;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_screen::{DetailScreen, DetailScreenProps};
pub use list_screen::{ListScreen, ListScreenProps};
pub use tile::{tile_line, TileCache};

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

pub(crate) const TEXT_MAIN: Color = Color::Rgb(232, 240, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(170, 188, 200);
pub(crate) const ACCENT: Color = Color::Rgb(240, 80, 80);
pub(crate) const SELECTION_BG: Color = Color::Rgb(30, 88, 106);
pub(crate) const HIGHLIGHT_BG: Color = Color::Rgb(150, 116, 30);

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// First letter upper-cased, rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

pub(crate) fn render_loading(frame: &mut Frame, area: Rect, tick: u64, message: &str) {
    let spinner = SPINNER[(tick % SPINNER.len() as u64) as usize];
    let lines = vec![
        Line::from(""),
        Line::from(format!("{spinner} {message}")),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_DIM));
    frame.render_widget(paragraph, area);
}

pub(crate) fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(ERROR_ICON),
        Line::styled(
            "Oops! Something went wrong",
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        ),
        Line::from(message.to_string()),
        Line::from(""),
        Line::styled("press r to Try Again", Style::default().fg(TEXT_DIM)),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
