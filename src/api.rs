//! PokeAPI client

use std::sync::OnceLock;

use serde::Deserialize;

use crate::state::{ListEntry, PokemonDetails, PokemonStat};

pub const API_BASE: &str = "https://pokeapi.co/api/v2";
const SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Single error kind at the client boundary: non-2xx responses carry the
/// status, transport and decode failures do not.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
}

impl ApiError {
    fn http(what: &str, status: reqwest::StatusCode) -> Self {
        let text = status.canonical_reason().unwrap_or("unknown error");
        Self {
            message: format!("Failed to fetch {what}: {text}"),
            status: Some(status.as_u16()),
        }
    }

    fn network(cause: impl std::fmt::Display) -> Self {
        Self {
            message: format!("Network error: {cause}"),
            status: None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<ListEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    #[serde(default)]
    stats: Vec<PokemonStatSlot>,
    #[serde(default)]
    types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    abilities: Vec<PokemonAbilitySlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
}

/// Fetch one page of the catalog.
pub async fn fetch_list(limit: u32, offset: u32) -> Result<Vec<ListEntry>, ApiError> {
    fetch_list_from(API_BASE, limit, offset).await
}

pub async fn fetch_list_from(
    base: &str,
    limit: u32,
    offset: u32,
) -> Result<Vec<ListEntry>, ApiError> {
    let url = format!("{base}/pokemon?limit={limit}&offset={offset}");
    let response: ListResponse = get_json(&url, "Pokemon list").await?;
    Ok(response.results)
}

/// Fetch details for one entry. The name is lower-cased before use.
pub async fn fetch_details(name: &str) -> Result<PokemonDetails, ApiError> {
    fetch_details_from(API_BASE, name).await
}

pub async fn fetch_details_from(base: &str, name: &str) -> Result<PokemonDetails, ApiError> {
    let url = format!("{base}/pokemon/{}", name.to_lowercase());
    let response: PokemonResponse = get_json(&url, "Pokemon details").await?;

    Ok(PokemonDetails {
        id: response.id,
        name: response.name,
        height: response.height,
        weight: response.weight,
        stats: response
            .stats
            .into_iter()
            .map(|slot| PokemonStat {
                name: slot.stat.name,
                value: slot.base_stat,
            })
            .collect(),
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        abilities: response
            .abilities
            .into_iter()
            .map(|slot| slot.ability.name)
            .collect(),
    })
}

/// Sprite image reference for a numeric id.
pub fn sprite_url(id: impl std::fmt::Display) -> String {
    format!("{SPRITE_BASE}/{id}.png")
}

async fn get_json<T: serde::de::DeserializeOwned>(url: &str, what: &str) -> Result<T, ApiError> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(ApiError::network)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::http(what, status));
    }
    response.json().await.map_err(ApiError::network)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
