//! Application state - single source of truth

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

/// How long a restored highlight stays on screen before clearing itself.
pub const HIGHLIGHT_CLEAR_MS: u64 = 3000;

/// Spinner cadence while a fetch is in flight.
pub const LOADING_TICK_MS: u64 = 120;

/// The single catalog page this app requests.
pub const LIST_LIMIT: u32 = 50;
pub const LIST_OFFSET: u32 = 0;

/// Rows of the list screen that are not catalog rows
/// (title, panel borders, hint bar). Keep in sync with the list layout.
pub const LIST_CHROME_ROWS: u16 = 5;

/// One entry of the catalog page. The name is the identity key; the url is
/// only used to derive a numeric sprite id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListEntry {
    pub name: String,
    pub url: String,
}

impl ListEntry {
    /// Numeric sprite id: the second-to-last slash-delimited segment of the
    /// resource url (`.../pokemon/25/` -> `25`).
    pub fn sprite_id(&self) -> Option<&str> {
        let segments: Vec<&str> = self.url.split('/').collect();
        if segments.len() < 2 {
            return None;
        }
        let id = segments[segments.len() - 2];
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub name: String,
    pub value: u16,
}

/// Loaded details for one entry. The collections tolerate absence in the
/// wire response; missing sections simply render nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetails {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub abilities: Vec<String>,
}

impl PokemonDetails {
    /// Base value of a stat, looked up by its exact API name.
    pub fn stat(&self, name: &str) -> Option<u16> {
        self.stats
            .iter()
            .find(|stat| stat.name == name)
            .map(|stat| stat.value)
    }
}

/// Ephemeral payload attached to a route transition. Written once by the
/// outgoing view, consumed once by the incoming one, never persisted - a
/// restart loses it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavState {
    pub from_details: bool,
    pub from_list: bool,
    pub scroll_position: usize,
    pub pokemon_name: Option<String>,
}

impl NavState {
    /// Outgoing list -> detail transition, carrying the captured offset.
    pub fn to_details(scroll: usize) -> Self {
        Self {
            from_list: true,
            scroll_position: scroll,
            ..Self::default()
        }
    }

    /// Outgoing detail -> list transition.
    pub fn back_to_list(scroll: usize, name: String) -> Self {
        Self {
            from_details: true,
            scroll_position: scroll,
            pokemon_name: Some(name),
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    List,
    Detail,
}

/// List view state. Rebuilt from scratch every time the route is entered,
/// which is what resets the one-shot restoration guard.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListViewState {
    pub entries: DataResource<Vec<ListEntry>>,
    pub selected: usize,
    /// First visible catalog row.
    pub scroll: usize,
    pub highlighted: Option<String>,
    /// Restoration runs at most once per mount of this view.
    pub restored: bool,
}

impl Default for ListViewState {
    fn default() -> Self {
        Self {
            entries: DataResource::Empty,
            selected: 0,
            scroll: 0,
            highlighted: None,
            restored: false,
        }
    }
}

/// Detail view state, keyed by the route's name parameter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetailViewState {
    pub name: String,
    pub details: DataResource<PokemonDetails>,
    /// Offset received when entering; echoed back on back-navigation.
    pub entry_scroll: usize,
}

impl DetailViewState {
    pub fn enter(name: String, nav: &NavState) -> Self {
        Self {
            name,
            details: DataResource::Loading,
            entry_scroll: nav.scroll_position,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub route: Route,
    pub list: ListViewState,
    pub detail: Option<DetailViewState>,
    /// Payload for the route transition currently underway.
    pub nav: Option<NavState>,
    /// Last offset captured before an outward navigation; survives remounts.
    pub remembered_scroll: usize,
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            terminal_size: (80, 24),
            route: Route::List,
            list: ListViewState::default(),
            detail: None,
            nav: None,
            remembered_scroll: 0,
            tick: 0,
        }
    }

    pub fn entries(&self) -> &[ListEntry] {
        self.list
            .entries
            .data()
            .map(|entries| entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn selected_entry(&self) -> Option<&ListEntry> {
        self.entries().get(self.list.selected)
    }

    /// Clamp and apply a selection index; reports whether it moved.
    pub fn set_selected(&mut self, index: usize) -> bool {
        let len = self.entries().len();
        if len == 0 {
            self.list.selected = 0;
            return false;
        }
        let bounded = index.min(len - 1);
        if bounded != self.list.selected {
            self.list.selected = bounded;
            return true;
        }
        false
    }

    /// Keep the selected row inside the visible window.
    pub fn scroll_selected_into_view(&mut self) {
        let rows = self.list_viewport_rows();
        if self.list.selected < self.list.scroll {
            self.list.scroll = self.list.selected;
        } else if self.list.selected >= self.list.scroll + rows {
            self.list.scroll = self.list.selected + 1 - rows;
        }
        self.list.scroll = self.list.scroll.min(self.max_scroll());
    }

    /// Visible catalog rows for the current terminal size.
    pub fn list_viewport_rows(&self) -> usize {
        self.terminal_size.1.saturating_sub(LIST_CHROME_ROWS).max(1) as usize
    }

    /// Last paintable offset.
    pub fn max_scroll(&self) -> usize {
        self.entries().len().saturating_sub(self.list_viewport_rows())
    }

    pub fn fetch_in_flight(&self) -> bool {
        match self.route {
            Route::List => self.list.entries.is_loading(),
            Route::Detail => self
                .detail
                .as_ref()
                .map(|detail| detail.details.is_loading())
                .unwrap_or(false),
        }
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        let mut sections = vec![
            DebugSection::new("Route")
                .entry("route", ron_string(&self.route))
                .entry("nav", ron_string(&self.nav)),
            DebugSection::new("List")
                .entry("entries", ron_string(&self.entries().len()))
                .entry("selected", ron_string(&self.list.selected))
                .entry("scroll", ron_string(&self.list.scroll))
                .entry("highlighted", ron_string(&self.list.highlighted))
                .entry("restored", ron_string(&self.list.restored))
                .entry("remembered", ron_string(&self.remembered_scroll)),
        ];

        if let Some(detail) = &self.detail {
            sections.push(
                DebugSection::new("Detail")
                    .entry("name", ron_string(&detail.name))
                    .entry("loading", ron_string(&detail.details.is_loading()))
                    .entry("entry_scroll", ron_string(&detail.entry_scroll)),
            );
        }

        sections
    }
}
