//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Entry, RandomPick};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: load the listing
    Init,

    // ===== Listing category =====
    /// Intent: fetch the listing again and show it
    ListingReload,

    /// Result: every detail fetch of the batch succeeded
    ListingDidLoad { token: u64, entries: Vec<Entry> },

    /// Result: the batch failed; the previous listing stays
    ListingDidError { token: u64, error: String },

    /// Keep a random ten of the current listing
    ListingShuffle { seed: u64 },

    /// Show the card grid from this row (already clamped to the grid)
    ListingScrollTo(usize),

    // ===== Search category =====
    /// Open the search overlay
    SearchOpen,

    /// Close the search overlay
    SearchClose,

    /// Search input text changed
    SearchInputChange(String),

    /// Submit the search input
    SearchSubmit(String),

    /// Result: entry found by name
    SearchDidLoad { token: u64, entry: Entry },

    /// Result: no such entry, or the request failed
    SearchDidError { token: u64, error: String },

    // ===== Random category =====
    /// Intent: show the entry with this id and its first moves
    RandomFetch { id: u16 },

    RandomDidLoad { token: u64, pick: RandomPick },

    RandomDidError { token: u64, error: String },

    // ===== Battle category =====
    /// Intent: battle the two drawn ids
    BattleFetch { left: u16, right: u16 },

    /// Result: both entries of the pair, fetched independently
    BattleDidLoad { token: u64, left: Entry, right: Entry },

    BattleDidError { token: u64, error: String },

    // ===== Uncategorized (global) =====
    /// Force a re-render (cursor movement)
    Render,

    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
