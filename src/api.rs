//! PokéAPI client

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use futures_util::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::dex::RANDOM_MOVE_LIMIT;
use crate::state::{Entry, Move, RandomPick, Stat};

pub const API_BASE: &str = "https://pokeapi.co/api/v2";

// ============================================================================
// Errors and transport
// ============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("response parse error: {0}")]
    Parse(String),
}

/// Fetches raw response bodies. The HTTP implementation is the only one used at
/// runtime; tests swap in fixtures.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: http_client().clone(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ApiError::Request(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Request(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

// ============================================================================
// Response shapes
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    #[serde(default)]
    sprites: Sprites,
    #[serde(default)]
    types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    stats: Vec<PokemonStatSlot>,
    #[serde(default)]
    moves: Vec<PokemonMoveSlot>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonMoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct MoveResponse {
    name: String,
    #[serde(default)]
    effect_entries: Vec<EffectEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct EffectEntry {
    effect: String,
    language: NamedResource,
}

impl PokemonResponse {
    fn move_urls(&self, limit: usize) -> Vec<String> {
        self.moves
            .iter()
            .take(limit)
            .map(|slot| slot.move_info.url.clone())
            .collect()
    }

    fn into_entry(self) -> Entry {
        Entry {
            id: self.id,
            name: self.name,
            sprite: self.sprites.front_default,
            types: self
                .types
                .into_iter()
                .map(|slot| slot.type_info.name)
                .collect(),
            stats: self
                .stats
                .into_iter()
                .map(|slot| Stat {
                    name: slot.stat.name,
                    value: slot.base_stat,
                })
                .collect(),
        }
    }
}

impl MoveResponse {
    fn into_move(self) -> Move {
        let description = english_effect(&self.effect_entries);
        Move {
            name: self.name,
            description,
        }
    }
}

fn english_effect(entries: &[EffectEntry]) -> Option<String> {
    entries
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| sanitize_text(&entry.effect))
        .filter(|text| !text.is_empty())
}

fn sanitize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// Catalogue
// ============================================================================

/// Read-only client for the four request shapes the app uses.
pub struct Catalogue<T: Transport = HttpTransport> {
    base: String,
    transport: Arc<T>,
}

impl<T: Transport> Clone for Catalogue<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl Catalogue<HttpTransport> {
    pub fn http(base: impl Into<String>) -> Self {
        Self::new(base, HttpTransport::new())
    }
}

impl<T: Transport> Catalogue<T> {
    pub fn new(base: impl Into<String>, transport: T) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self {
            base,
            transport: Arc::new(transport),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    async fn get_json<D: DeserializeOwned>(&self, url: &str) -> Result<D, ApiError> {
        let bytes = self.transport.get(url).await?;
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Parse(format!("{url}: {err}")))
    }

    async fn pokemon_at(&self, url: &str) -> Result<PokemonResponse, ApiError> {
        self.get_json(url).await
    }

    /// Detail URLs of the first `limit` entries.
    async fn list_urls(&self, limit: usize) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/pokemon?limit={limit}", self.base);
        let response: ListResponse = self.get_json(&url).await?;
        Ok(response
            .results
            .into_iter()
            .map(|resource| resource.url)
            .collect())
    }

    pub async fn entry_by_name(&self, name: &str) -> Result<Entry, ApiError> {
        let url = format!("{}/pokemon/{}", self.base, urlencoding::encode(name));
        Ok(self.pokemon_at(&url).await?.into_entry())
    }

    pub async fn entry_by_id(&self, id: u16) -> Result<Entry, ApiError> {
        let url = format!("{}/pokemon/{id}", self.base);
        Ok(self.pokemon_at(&url).await?.into_entry())
    }

    pub async fn move_at(&self, url: &str) -> Result<Move, ApiError> {
        let response: MoveResponse = self.get_json(url).await?;
        Ok(response.into_move())
    }

    /// The listing: every detail fetch runs concurrently and the first failure
    /// fails the whole batch.
    pub async fn load_listing(&self, limit: usize) -> Result<Vec<Entry>, ApiError> {
        let urls = self.list_urls(limit).await?;
        let responses = try_join_all(urls.iter().map(|url| self.pokemon_at(url))).await?;
        Ok(responses
            .into_iter()
            .map(PokemonResponse::into_entry)
            .collect())
    }

    pub async fn random_pick(&self, id: u16) -> Result<RandomPick, ApiError> {
        let url = format!("{}/pokemon/{id}", self.base);
        let response = self.pokemon_at(&url).await?;
        let move_urls = response.move_urls(RANDOM_MOVE_LIMIT);
        let moves = try_join_all(move_urls.iter().map(|url| self.move_at(url))).await?;
        Ok(RandomPick {
            entry: response.into_entry(),
            moves,
        })
    }

    /// Both battle entries, fetched independently even when the ids match.
    pub async fn battle_pair(&self, left: u16, right: u16) -> Result<(Entry, Entry), ApiError> {
        futures_util::future::try_join(self.entry_by_id(left), self.entry_by_id(right)).await
    }
}
