//! Detail view: one entry's card, keyed by the route name.

use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{capitalize, render_error, render_loading, Component, ACCENT, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::api;
use crate::state::{AppState, PokemonDetails};

/// Reference scale for the stat bars; values at or above it fill the bar.
const STAT_SCALE: u16 = 150;
const STAT_BAR_WIDTH: usize = 30;

/// The three key stats shown on the card, by exact API name.
const KEY_STATS: [(&str, &str); 3] = [("HP", "hp"), ("Attack", "attack"), ("Defense", "defense")];

pub struct DetailScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

pub struct DetailScreen {
    status_bar: StatusBar,
}

impl Default for DetailScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailScreen {
    pub fn new() -> Self {
        Self {
            status_bar: StatusBar::new(),
        }
    }
}

impl Component<Action> for DetailScreen {
    type Props<'a> = DetailScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                    Some(Action::NavigateBack)
                }
                KeyCode::Char('r') => Some(Action::DetailFetch),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DetailScreenProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(1), // back hint
            Constraint::Min(1),    // card
            Constraint::Length(1), // hints
        ])
        .split(area);

        let back = Paragraph::new("← Back to Pokédex")
            .style(Style::default().fg(TEXT_DIM));
        frame.render_widget(back, chunks[0]);

        match state.detail.as_ref().map(|detail| &detail.details) {
            Some(DataResource::Loaded(details)) => render_card(frame, chunks[1], details),
            Some(DataResource::Failed(message)) => render_error(frame, chunks[1], message),
            _ => render_loading(frame, chunks[1], state.tick, "Loading Pokémon details..."),
        }

        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("esc", "back"),
                    StatusBarHint::new("r", "retry"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_card(frame: &mut Frame, area: Rect, details: &PokemonDetails) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(capitalize(&details.name))
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                capitalize(&details.name),
                Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format_id(details.id), Style::default().fg(TEXT_DIM)),
        ]),
        Line::styled(
            api::sprite_url(details.id),
            Style::default().fg(TEXT_DIM),
        ),
        Line::from(""),
        Line::from(format!(
            "Height: {}    Weight: {}",
            format_height(details.height),
            format_weight(details.weight)
        )),
    ];

    if !details.types.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_header("Types"));
        lines.push(Line::from(badge_row(&details.types)));
    }

    if !details.abilities.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_header("Abilities"));
        lines.push(Line::from(badge_row(&details.abilities)));
    }

    let stats: Vec<Line<'static>> = KEY_STATS
        .iter()
        .filter_map(|(label, stat_name)| {
            details
                .stat(stat_name)
                .map(|value| stat_line(label, value))
        })
        .collect();
    if !stats.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_header("Key Stats"));
        lines.extend(stats);
    }

    frame.render_widget(
        Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true }),
        inner,
    );
}

fn section_header(title: &str) -> Line<'static> {
    Line::styled(
        title.to_string(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )
}

fn badge_row(names: &[String]) -> String {
    names
        .iter()
        .map(|name| capitalize(name))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Proportional bar against the reference scale, clamped to full width.
fn stat_line(label: &str, value: u16) -> Line<'static> {
    let filled = (value.min(STAT_SCALE) as usize * STAT_BAR_WIDTH) / STAT_SCALE as usize;
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        ".".repeat(STAT_BAR_WIDTH - filled)
    );
    Line::from(format!("{label:>7} {value:>3} {bar}"))
}

pub fn format_id(id: u32) -> String {
    format!("#{id:03}")
}

/// Decimeters to meters, one decimal.
pub fn format_height(height: u32) -> String {
    format!("{:.1} m", height as f64 / 10.0)
}

/// Hectograms to kilograms, one decimal.
pub fn format_weight(weight: u32) -> String {
    format!("{:.1} kg", weight as f64 / 10.0)
}
