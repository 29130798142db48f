//! List view: the catalog page with selection, scroll and highlight.

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::tile::TileCache;
use super::{render_error, render_loading, Component, ACCENT, SELECTION_BG, TEXT_DIM};
use crate::action::Action;
use crate::state::AppState;

pub struct ListScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

pub struct ListScreen {
    tiles: TileCache,
    status_bar: StatusBar,
}

impl Default for ListScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ListScreen {
    pub fn new() -> Self {
        Self {
            tiles: TileCache::new(),
            status_bar: StatusBar::new(),
        }
    }

    /// All rows for the current entries, one per entry, memoized.
    pub fn tile_lines(&mut self, state: &AppState) -> Vec<Line<'static>> {
        state
            .entries()
            .iter()
            .map(|entry| {
                let highlighted =
                    state.list.highlighted.as_deref() == Some(entry.name.as_str());
                self.tiles.line(entry, highlighted)
            })
            .collect()
    }

    fn render_entries(&mut self, frame: &mut Frame, area: Rect, state: &AppState, focused: bool) {
        let total = state.entries().len();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("DEX {}/{}", state.list.selected + 1, total))
            .border_style(if focused {
                Style::default().fg(ACCENT)
            } else {
                Style::default().fg(TEXT_DIM)
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = self.tile_lines(state);
        let rows = inner.height as usize;
        let scroll = state.list.scroll.min(lines.len().saturating_sub(1));
        let selection = Style::default()
            .bg(SELECTION_BG)
            .add_modifier(Modifier::BOLD);
        let visible: Vec<Line<'static>> = lines
            .into_iter()
            .enumerate()
            .skip(scroll)
            .take(rows)
            .map(|(index, line)| {
                if index == state.list.selected {
                    line.style(selection)
                } else {
                    line
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(Text::from(visible)), inner);
    }
}

impl Component<Action> for ListScreen {
    type Props<'a> = ListScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => vec![Action::SelectionMove(-1)],
                KeyCode::Down | KeyCode::Char('j') => vec![Action::SelectionMove(1)],
                KeyCode::PageUp => vec![Action::SelectionPage(-1)],
                KeyCode::PageDown => vec![Action::SelectionPage(1)],
                KeyCode::Home => vec![Action::SelectionJumpTop],
                KeyCode::End => vec![Action::SelectionJumpBottom],
                KeyCode::Enter => open_selected(props.state),
                KeyCode::Char('r') => vec![Action::ListFetch],
                _ => Vec::new(),
            },
            EventKind::Scroll { delta, .. } => vec![Action::SelectionMove((*delta * 3) as i16)],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ListScreenProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(2), // title
            Constraint::Min(1),    // catalog
            Constraint::Length(1), // hints
        ])
        .split(area);

        let title = Paragraph::new("POKEMON POKEDEX")
            .alignment(Alignment::Center)
            .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
        frame.render_widget(title, chunks[0]);

        match &state.list.entries {
            DataResource::Loaded(_) => {
                self.render_entries(frame, chunks[1], state, props.is_focused)
            }
            DataResource::Failed(message) => render_error(frame, chunks[1], message),
            DataResource::Loading | DataResource::Empty => {
                render_loading(frame, chunks[1], state.tick, "Loading Pokémon...")
            }
        }

        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("↑↓", "move"),
                    StatusBarHint::new("enter", "open"),
                    StatusBarHint::new("r", "refresh"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

/// Enter on a row opens its detail view, capturing the current offset.
fn open_selected(state: &AppState) -> Vec<Action> {
    match state.selected_entry() {
        Some(entry) => vec![Action::OpenDetail {
            name: entry.name.clone(),
            scroll: state.list.scroll,
        }],
        None => Vec::new(),
    }
}
