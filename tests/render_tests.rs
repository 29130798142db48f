//! Render snapshot tests using RenderHarness

use tui_dispatch::{testing::*, DataResource};
use dexview::{
    components::{Component, DetailScreen, DetailScreenProps, ListScreen, ListScreenProps},
    state::{
        AppState, DetailViewState, ListEntry, NavState, PokemonDetails, PokemonStat, Route,
    },
};

fn entry(name: &str, id: u32) -> ListEntry {
    ListEntry {
        name: name.into(),
        url: format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
    }
}

fn list_state(entries: Vec<ListEntry>) -> AppState {
    let mut state = AppState::default();
    state.list.entries = DataResource::Loaded(entries);
    state
}

fn detail_state(details: PokemonDetails) -> AppState {
    let mut state = AppState::default();
    state.route = Route::Detail;
    let mut detail = DetailViewState::enter(details.name.clone(), &NavState::to_details(0));
    detail.details = DataResource::Loaded(details);
    state.detail = Some(detail);
    state
}

fn render_list(state: &AppState) -> String {
    let mut render = RenderHarness::new(60, 24);
    let mut component = ListScreen::new();
    render.render_to_string_plain(|frame| {
        let props = ListScreenProps {
            state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    })
}

fn render_detail(state: &AppState) -> String {
    let mut render = RenderHarness::new(60, 24);
    let mut component = DetailScreen::new();
    render.render_to_string_plain(|frame| {
        let props = DetailScreenProps {
            state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    })
}

#[test]
fn test_render_list_loading() {
    let mut state = AppState::default();
    state.list.entries = DataResource::Loading;

    let output = render_list(&state);

    assert!(output.contains("POKEMON POKEDEX"));
    assert!(output.contains("Loading Pokémon..."));
}

#[test]
fn test_render_list_error_with_retry() {
    let mut state = AppState::default();
    state.list.entries =
        DataResource::Failed("Failed to fetch Pokemon list: Not Found".into());

    let output = render_list(&state);

    assert!(output.contains("Oops! Something went wrong"));
    assert!(output.contains("Failed to fetch Pokemon list: Not Found"));
    assert!(output.contains("Try Again"));
}

#[test]
fn test_render_list_shows_every_entry() {
    let state = list_state(vec![
        entry("bulbasaur", 1),
        entry("charmander", 4),
        entry("squirtle", 7),
    ]);

    let output = render_list(&state);

    assert!(output.contains("#001 Bulbasaur"));
    assert!(output.contains("#004 Charmander"));
    assert!(output.contains("#007 Squirtle"));
}

#[test]
fn test_render_list_windows_to_scroll_offset() {
    let entries: Vec<ListEntry> = (1..=50)
        .map(|id| entry(&format!("pokemon-{id}"), id))
        .collect();
    let mut state = list_state(entries);
    state.list.scroll = 30;
    state.list.selected = 30;

    let output = render_list(&state);

    assert!(output.contains("Pokemon-31"));
    assert!(!output.contains("Pokemon-1 "));
}

#[test]
fn test_render_detail_loading() {
    let mut state = AppState::default();
    state.route = Route::Detail;
    state.detail = Some(DetailViewState::enter(
        "pikachu".into(),
        &NavState::to_details(0),
    ));

    let output = render_detail(&state);

    assert!(output.contains("Loading Pokémon details..."));
    assert!(output.contains("Back to Pokédex"));
}

#[test]
fn test_render_detail_card() {
    let state = detail_state(PokemonDetails {
        id: 25,
        name: "pikachu".into(),
        height: 4,
        weight: 60,
        stats: vec![
            PokemonStat {
                name: "hp".into(),
                value: 35,
            },
            PokemonStat {
                name: "attack".into(),
                value: 55,
            },
            PokemonStat {
                name: "defense".into(),
                value: 40,
            },
        ],
        types: vec!["electric".into()],
        abilities: vec!["static".into(), "lightning-rod".into()],
    });

    let output = render_detail(&state);

    assert!(output.contains("Pikachu"));
    assert!(output.contains("#025"));
    assert!(output.contains("Height: 0.4 m"));
    assert!(output.contains("Weight: 6.0 kg"));
    assert!(output.contains("Electric"));
    assert!(output.contains("Static"));
    assert!(output.contains("HP"));
    assert!(output.contains("Attack"));
    assert!(output.contains("Defense"));
    assert!(output.contains("sprites/pokemon/25.png"));
}

#[test]
fn test_render_detail_omits_missing_stat_rows() {
    let state = detail_state(PokemonDetails {
        id: 1,
        name: "bulbasaur".into(),
        height: 7,
        weight: 69,
        stats: vec![
            PokemonStat {
                name: "attack".into(),
                value: 49,
            },
            PokemonStat {
                name: "defense".into(),
                value: 49,
            },
        ],
        types: Vec::new(),
        abilities: Vec::new(),
    });

    let output = render_detail(&state);

    assert!(output.contains("Attack"));
    assert!(output.contains("Defense"));
    assert!(!output.contains("HP"));
    assert!(!output.contains("Types"));
    assert!(!output.contains("Abilities"));
}

#[test]
fn test_render_detail_error() {
    let mut state = AppState::default();
    state.route = Route::Detail;
    let mut detail = DetailViewState::enter("missingno".into(), &NavState::to_details(0));
    detail.details =
        DataResource::Failed("Failed to fetch Pokemon details: Not Found".into());
    state.detail = Some(detail);

    let output = render_detail(&state);

    assert!(output.contains("Oops! Something went wrong"));
    assert!(output.contains("Failed to fetch Pokemon details: Not Found"));
    assert!(output.contains("Try Again"));
}

#[test]
fn test_render_hint_bars() {
    let state = list_state(vec![entry("bulbasaur", 1)]);
    let output = render_list(&state);
    assert!(output.contains("open"));
    assert!(output.contains("refresh"));
    assert!(output.contains("quit"));

    let state = detail_state(PokemonDetails {
        id: 1,
        name: "bulbasaur".into(),
        height: 7,
        weight: 69,
        stats: Vec::new(),
        types: Vec::new(),
        abilities: Vec::new(),
    });
    let output = render_detail(&state);
    assert!(output.contains("back"));
    assert!(output.contains("retry"));
}
