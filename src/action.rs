//! Actions - everything that can happen to the app

use serde::{Deserialize, Serialize};

use crate::state::{ListEntry, PokemonDetails};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,
    UiTerminalResize(u16, u16),
    Tick,

    // ===== List view =====
    /// Intent: fetch the catalog page (initial load, refresh, retry)
    ListFetch,
    /// Result: catalog page loaded
    ListDidLoad(Vec<ListEntry>),
    /// Result: catalog fetch failed
    ListDidError(String),

    // ===== Selection =====
    SelectionMove(i16),
    SelectionPage(i16),
    SelectionJumpTop,
    SelectionJumpBottom,

    // ===== Navigation =====
    /// Open the detail view for an entry, capturing the current offset
    OpenDetail { name: String, scroll: usize },
    /// Return from the detail view to the list
    NavigateBack,

    /// The highlight-clear timer fired
    HighlightExpired,

    // ===== Detail view =====
    /// Intent: (re)fetch details for the current route name
    DetailFetch,
    /// Result: details loaded; tagged with the requested name
    DetailDidLoad { name: String, details: PokemonDetails },
    /// Result: detail fetch failed; tagged with the requested name
    DetailDidError { name: String, error: String },

    Quit,
}
