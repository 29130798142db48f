//! One catalog row and its memo cache.

use std::collections::HashMap;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::{capitalize, HIGHLIGHT_BG, TEXT_MAIN};
use crate::state::ListEntry;

/// Render one entry row. Pure: the output depends only on the arguments.
pub fn tile_line(entry: &ListEntry, highlighted: bool) -> Line<'static> {
    let id = entry.sprite_id().unwrap_or("?");
    let text = format!(" #{id:0>3} {}", capitalize(&entry.name));
    if highlighted {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(TEXT_MAIN)
                .bg(HIGHLIGHT_BG)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(text)
    }
}

/// Shallow-equality memo over rendered rows. The screen repaints when the
/// highlight timer expires or the viewport moves; rows whose inputs did not
/// change reuse their previously built lines.
#[derive(Default)]
pub struct TileCache {
    lines: HashMap<String, (bool, Line<'static>)>,
    rebuilds: usize,
}

impl TileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, entry: &ListEntry, highlighted: bool) -> Line<'static> {
        if let Some((cached, line)) = self.lines.get(&entry.name) {
            if *cached == highlighted {
                return line.clone();
            }
        }
        self.rebuilds += 1;
        let line = tile_line(entry, highlighted);
        self.lines
            .insert(entry.name.clone(), (highlighted, line.clone()));
        line
    }

    /// Rows built since creation. A stable count across repaints with
    /// unchanged inputs is the memoization contract.
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }
}
