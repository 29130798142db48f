//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{
    AppState, DetailViewState, ListViewState, NavState, Route, LIST_LIMIT, LIST_OFFSET,
};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.route = Route::List;
            state.list = ListViewState::default();
            state.list.entries = DataResource::Loading;
            DispatchResult::changed_with(fetch_list_effect())
        }

        // ===== List view =====
        Action::ListFetch => {
            state.list.entries = DataResource::Loading;
            DispatchResult::changed_with(fetch_list_effect())
        }

        Action::ListDidLoad(entries) => {
            state.list.entries = DataResource::Loaded(entries);
            let len = state.entries().len();
            state.list.selected = state.list.selected.min(len.saturating_sub(1));
            let effects = apply_restoration(state);
            if effects.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::ListDidError(message) => {
            state.list.entries = DataResource::Failed(message);
            DispatchResult::changed()
        }

        // ===== Selection =====
        Action::SelectionMove(delta) => move_selection(state, delta as i64),

        Action::SelectionPage(delta) => {
            let page = state.list_viewport_rows() as i64;
            move_selection(state, delta as i64 * page)
        }

        Action::SelectionJumpTop => set_selection(state, 0),

        Action::SelectionJumpBottom => {
            let last = state.entries().len().saturating_sub(1);
            set_selection(state, last)
        }

        // ===== Navigation =====
        Action::OpenDetail { name, scroll } => {
            if state.route != Route::List {
                return DispatchResult::unchanged();
            }
            state.remembered_scroll = scroll;
            state.nav = Some(NavState::to_details(scroll));
            enter_detail(state, name)
        }

        Action::NavigateBack => {
            if state.route != Route::Detail {
                return DispatchResult::unchanged();
            }
            let Some(detail) = state.detail.take() else {
                return DispatchResult::unchanged();
            };
            // Prefer the loaded identity; fall back to the route parameter
            // if the fetch never settled.
            let name = detail
                .details
                .data()
                .map(|details| details.name.clone())
                .unwrap_or_else(|| detail.name.clone());
            state.nav = Some(NavState::back_to_list(detail.entry_scroll, name));
            state.route = Route::List;
            state.list = ListViewState::default();
            state.list.entries = DataResource::Loading;
            DispatchResult::changed_with(fetch_list_effect())
        }

        Action::HighlightExpired => {
            if state.list.highlighted.is_none() {
                return DispatchResult::unchanged();
            }
            state.list.highlighted = None;
            DispatchResult::changed()
        }

        // ===== Detail view =====
        Action::DetailFetch => {
            let Some(detail) = state.detail.as_mut() else {
                return DispatchResult::unchanged();
            };
            detail.details = DataResource::Loading;
            let name = detail.name.clone();
            DispatchResult::changed_with(Effect::FetchDetails { name })
        }

        Action::DetailDidLoad { name, details } => {
            let Some(detail) = state.detail.as_mut() else {
                return DispatchResult::unchanged();
            };
            // A superseded fetch may still settle; drop the stale result.
            if detail.name != name {
                return DispatchResult::unchanged();
            }
            detail.details = DataResource::Loaded(details);
            DispatchResult::changed()
        }

        Action::DetailDidError { name, error } => {
            let Some(detail) = state.detail.as_mut() else {
                return DispatchResult::unchanged();
            };
            if detail.name != name {
                return DispatchResult::unchanged();
            }
            detail.details = DataResource::Failed(error);
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            state.list.scroll = state.list.scroll.min(state.max_scroll());
            DispatchResult::changed()
        }

        Action::Tick => {
            if state.fetch_in_flight() {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn fetch_list_effect() -> Effect {
    Effect::FetchList {
        limit: LIST_LIMIT,
        offset: LIST_OFFSET,
    }
}

/// Switch to the detail route, consuming the pending transition payload.
/// Leaving the list releases its highlight-clear timer.
fn enter_detail(state: &mut AppState, name: String) -> DispatchResult<Effect> {
    let nav = state.nav.take().unwrap_or_default();
    state.detail = Some(DetailViewState::enter(name.clone(), &nav));
    state.route = Route::Detail;
    DispatchResult::changed_with_many(vec![
        Effect::CancelHighlightClear,
        Effect::FetchDetails { name },
    ])
}

/// One-shot restoration at fetch settlement: only when the incoming mount
/// carries a detail-origin payload, the entries are non-empty, and the
/// guard has not fired for this mount.
fn apply_restoration(state: &mut AppState) -> Vec<Effect> {
    if state.list.restored || state.entries().is_empty() {
        return Vec::new();
    }
    let Some(nav) = state.nav.take() else {
        return Vec::new();
    };
    if !nav.from_details {
        return Vec::new();
    }
    state.list.restored = true;

    let mut effects = Vec::new();
    if let Some(name) = nav.pokemon_name {
        if let Some(index) = state
            .entries()
            .iter()
            .position(|entry| entry.name == name)
        {
            state.list.selected = index;
        }
        state.list.highlighted = Some(name);
        effects.push(Effect::ScheduleHighlightClear);
    }

    // Zero means the offset never reached the detail view; fall back to the
    // last locally remembered one.
    let target = if nav.scroll_position > 0 {
        nav.scroll_position
    } else {
        state.remembered_scroll
    };
    state.list.scroll = target.min(state.max_scroll());

    effects
}

fn move_selection(state: &mut AppState, delta: i64) -> DispatchResult<Effect> {
    if state.entries().is_empty() {
        return DispatchResult::unchanged();
    }
    let target = (state.list.selected as i64 + delta).max(0) as usize;
    set_selection(state, target)
}

fn set_selection(state: &mut AppState, index: usize) -> DispatchResult<Effect> {
    if !state.set_selected(index) {
        return DispatchResult::unchanged();
    }
    state.scroll_selected_into_view();
    DispatchResult::changed()
}
