//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::dex;

/// Default number of entries requested by the listing loader.
pub const DEFAULT_LISTING_LIMIT: usize = 150;

/// Spinner timing for the header while requests are in flight.
pub const LOADING_TICK_MS: u64 = 120;

/// One stat line of an entry, e.g. `attack: 49`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Stat {
    pub name: String,
    pub value: u32,
}

/// A catalogued Pokémon record, immutable once fetched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Entry {
    pub id: u32,
    pub name: String,
    pub sprite: Option<String>,
    pub types: Vec<String>,
    pub stats: Vec<Stat>,
}

impl Entry {
    /// Sum of every stat value.
    pub fn total(&self) -> u32 {
        dex::stat_total(&self.stats)
    }

    pub fn display_name(&self) -> String {
        self.name.to_uppercase()
    }
}

/// A move with its English effect text, if the catalogue has one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Move {
    pub name: String,
    pub description: Option<String>,
}

/// Random pick: the entry plus details for its first moves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RandomPick {
    pub entry: Entry,
    pub moves: Vec<Move>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum BattleOutcome {
    Winner(String),
    Tie,
}

impl BattleOutcome {
    pub fn label(&self) -> String {
        match self {
            BattleOutcome::Winner(name) => name.to_uppercase(),
            BattleOutcome::Tie => "TIE".to_string(),
        }
    }
}

/// A drawn pair and the outcome computed from that same pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Battle {
    pub left: Entry,
    pub right: Entry,
    pub outcome: BattleOutcome,
}

impl Battle {
    pub fn new(left: Entry, right: Entry) -> Self {
        let outcome = dex::battle_outcome(&left, &right);
        Self {
            left,
            right,
            outcome,
        }
    }
}

/// Which of the four mutually exclusive views is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum View {
    #[default]
    Listing,
    Search,
    Random,
    Battle,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Listing => "Listing",
            View::Search => "Search",
            View::Random => "Random",
            View::Battle => "Battle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum RequestKind {
    Listing,
    Search,
    Random,
    Battle,
}

/// Latest token issued per request kind. A completion is applied only when
/// its token matches the latest one for its kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RequestTokens {
    pub listing: u64,
    pub search: u64,
    pub random: u64,
    pub battle: u64,
}

impl RequestTokens {
    fn slot(&mut self, kind: RequestKind) -> &mut u64 {
        match kind {
            RequestKind::Listing => &mut self.listing,
            RequestKind::Search => &mut self.search,
            RequestKind::Random => &mut self.random,
            RequestKind::Battle => &mut self.battle,
        }
    }

    pub fn latest(&self, kind: RequestKind) -> u64 {
        match kind {
            RequestKind::Listing => self.listing,
            RequestKind::Search => self.search,
            RequestKind::Random => self.random,
            RequestKind::Battle => self.battle,
        }
    }

    /// Issue the next token for `kind`.
    pub fn issue(&mut self, kind: RequestKind) -> u64 {
        let slot = self.slot(kind);
        *slot += 1;
        *slot
    }

    pub fn is_current(&self, kind: RequestKind, token: u64) -> bool {
        token != 0 && self.latest(kind) == token
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Active view tag
    #[debug(section = "View", label = "Active", debug_fmt)]
    pub view: View,

    /// Loaded listing, in fetch order (or shuffled)
    #[debug(section = "Listing", label = "Entries", debug_fmt)]
    pub listing: Vec<Entry>,

    #[debug(section = "Listing", label = "Loading")]
    pub listing_loading: bool,

    /// How many entries the listing loader asks for
    #[debug(section = "Listing", label = "Limit")]
    pub listing_limit: usize,

    /// First visible card row
    #[debug(skip)]
    pub listing_scroll: usize,

    /// Search lifecycle: Empty → Loading → Loaded/Failed (not found)
    #[debug(section = "Search", label = "Result", debug_fmt)]
    pub search: DataResource<Entry>,

    #[debug(section = "Search", label = "Input")]
    pub search_input: String,

    #[debug(skip)]
    pub search_mode: bool,

    #[debug(section = "Random", label = "Pick", debug_fmt)]
    pub random: Option<RandomPick>,

    #[debug(section = "Random", label = "Loading")]
    pub random_loading: bool,

    #[debug(section = "Battle", label = "Pair", debug_fmt)]
    pub battle: Option<Battle>,

    #[debug(section = "Battle", label = "Loading")]
    pub battle_loading: bool,

    #[debug(section = "Requests", label = "Tokens", debug_fmt)]
    pub tokens: RequestTokens,

    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(listing_limit: usize) -> Self {
        Self {
            view: View::Listing,
            listing: Vec::new(),
            listing_loading: false,
            listing_limit: listing_limit.max(1),
            listing_scroll: 0,
            search: DataResource::Empty,
            search_input: String::new(),
            search_mode: false,
            random: None,
            random_loading: false,
            battle: None,
            battle_loading: false,
            tokens: RequestTokens::default(),
            tick_count: 0,
        }
    }

    /// Whether any request is still in flight.
    pub fn is_busy(&self) -> bool {
        self.listing_loading || self.search.is_loading() || self.random_loading || self.battle_loading
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_LISTING_LIMIT)
    }
}
