//! Flow tests using EffectStoreTestHarness
//!
//! These cover the dispatch -> effect -> async settlement loops, including
//! the restoration behavior on back-navigation.

use tui_dispatch::testing::*;
use tui_dispatch::NumericComponentId;
use dexview::{
    action::Action,
    components::{Component, ListScreen, ListScreenProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, ListEntry, PokemonDetails, PokemonStat},
};

fn entry(name: &str, id: u32) -> ListEntry {
    ListEntry {
        name: name.into(),
        url: format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
    }
}

fn page() -> Vec<ListEntry> {
    (1..=50).map(|id| entry(&format!("pokemon-{id}"), id)).collect()
}

fn pikachu_details() -> PokemonDetails {
    PokemonDetails {
        id: 25,
        name: "pikachu".into(),
        height: 4,
        weight: 60,
        stats: vec![PokemonStat {
            name: "hp".into(),
            value: 35,
        }],
        types: vec!["electric".into()],
        abilities: vec!["static".into()],
    }
}

#[test]
fn test_list_fetch_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.list.entries.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchList { limit: 50, offset: 0 }));

    harness.complete_action(Action::ListDidLoad(page()));
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.list.entries.is_loaded());
    harness.assert_state(|s| s.entries().len() == 50);
}

#[test]
fn test_list_error_flow_and_retry() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.drain_effects();

    harness.complete_action(Action::ListDidError(
        "Failed to fetch Pokemon list: Not Found".into(),
    ));
    harness.process_emitted();

    harness.assert_state(|s| s.list.entries.is_failed());
    harness.assert_state(|s| {
        s.list
            .entries
            .error()
            .map(|message| message.contains("Not Found"))
            .unwrap_or(false)
    });

    // The retry re-issues the identical request.
    harness.dispatch_collect(Action::ListFetch);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchList { limit: 50, offset: 0 }));
}

#[test]
fn test_back_navigation_restores_and_highlights_once() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Initial mount and load.
    harness.dispatch_collect(Action::Init);
    harness.drain_effects();
    harness.complete_action(Action::ListDidLoad(page()));
    harness.process_emitted();

    // Open an entry with the viewport scrolled down.
    harness.dispatch_collect(Action::OpenDetail {
        name: "pokemon-30".into(),
        scroll: 12,
    });
    let effects = harness.drain_effects();
    effects.effects_count(2);
    effects.effects_first_matches(|e| matches!(e, Effect::CancelHighlightClear));

    harness.complete_action(Action::DetailDidLoad {
        name: "pokemon-30".into(),
        details: PokemonDetails {
            id: 30,
            name: "pokemon-30".into(),
            height: 7,
            weight: 690,
            stats: Vec::new(),
            types: Vec::new(),
            abilities: Vec::new(),
        },
    });
    harness.process_emitted();

    // Back to the list: a fresh mount refetches.
    harness.dispatch_collect(Action::NavigateBack);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchList { .. }));
    harness.assert_state(|s| !s.list.restored);

    // Settlement applies the restoration exactly once.
    harness.complete_action(Action::ListDidLoad(page()));
    harness.process_emitted();
    harness.assert_state(|s| s.list.restored);
    harness.assert_state(|s| s.list.highlighted.as_deref() == Some("pokemon-30"));
    harness.assert_state(|s| s.list.scroll == 12);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::ScheduleHighlightClear));

    // The timer fires and clears the highlight.
    harness.complete_action(Action::HighlightExpired);
    harness.process_emitted();
    harness.assert_state(|s| s.list.highlighted.is_none());

    // A later settlement in the same mount must not restore again.
    harness.dispatch_collect(Action::ListFetch);
    harness.drain_effects();
    harness.complete_action(Action::ListDidLoad(page()));
    harness.process_emitted();
    harness.assert_state(|s| s.list.highlighted.is_none());
    harness.assert_state(|s| s.list.scroll == 12);
    let effects = harness.drain_effects();
    effects.effects_empty();
}

#[test]
fn test_detail_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.drain_effects();
    harness.complete_action(Action::ListDidLoad(vec![entry("pikachu", 25)]));
    harness.process_emitted();

    harness.dispatch_collect(Action::OpenDetail {
        name: "pikachu".into(),
        scroll: 0,
    });
    let effects = harness.drain_effects();
    effects.effects_count(2);

    harness.complete_action(Action::DetailDidLoad {
        name: "pikachu".into(),
        details: pikachu_details(),
    });
    harness.process_emitted();

    harness.assert_state(|s| {
        s.detail
            .as_ref()
            .map(|detail| detail.details.is_loaded())
            .unwrap_or(false)
    });
}

#[test]
fn test_keyboard_triggers_refresh() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = ListScreen::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        let props = ListScreenProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::ListFetch);

    harness.dispatch_collect(Action::ListFetch);
    harness.assert_state(|s| s.list.entries.is_loading());

    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::FetchList { .. }));
}
