//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::dex;
use crate::effect::Effect;
use crate::state::{AppState, Battle, RequestKind, View};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Listing actions =====
        Action::Init | Action::ListingReload => {
            state.view = View::Listing;
            state.listing_loading = true;
            let token = state.tokens.issue(RequestKind::Listing);
            DispatchResult::changed_with(Effect::LoadListing {
                token,
                limit: state.listing_limit,
            })
        }

        Action::ListingDidLoad { token, entries } => {
            if !accept(state, RequestKind::Listing, token) {
                return DispatchResult::unchanged();
            }
            tracing::info!(count = entries.len(), "listing loaded");
            state.listing = entries;
            state.listing_loading = false;
            state.listing_scroll = 0;
            DispatchResult::changed()
        }

        Action::ListingDidError { token, error } => {
            if !accept(state, RequestKind::Listing, token) {
                return DispatchResult::unchanged();
            }
            tracing::warn!(%error, kept = state.listing.len(), "keeping previous listing");
            state.listing_loading = false;
            DispatchResult::changed()
        }

        Action::ListingShuffle { seed } => {
            state.view = View::Listing;
            state.listing = dex::shuffle_listing(&state.listing, seed);
            state.listing_scroll = 0;
            DispatchResult::changed()
        }

        Action::ListingScrollTo(row) => {
            let row = row.min(state.listing.len().saturating_sub(1));
            if row == state.listing_scroll || state.view != View::Listing {
                return DispatchResult::unchanged();
            }
            state.listing_scroll = row;
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchOpen => {
            if state.search_mode {
                return DispatchResult::unchanged();
            }
            state.search_mode = true;
            DispatchResult::changed()
        }

        Action::SearchClose => {
            if !state.search_mode {
                return DispatchResult::unchanged();
            }
            state.search_mode = false;
            DispatchResult::changed()
        }

        Action::SearchInputChange(input) => {
            state.search_input = input;
            DispatchResult::changed()
        }

        Action::SearchSubmit(input) => {
            let Some(name) = dex::normalize_query(&input) else {
                return DispatchResult::unchanged();
            };
            state.search_input = input;
            state.search_mode = false;
            state.view = View::Search;
            state.search = DataResource::Loading;
            let token = state.tokens.issue(RequestKind::Search);
            DispatchResult::changed_with(Effect::SearchEntry { token, name })
        }

        Action::SearchDidLoad { token, entry } => {
            if !accept(state, RequestKind::Search, token) {
                return DispatchResult::unchanged();
            }
            state.search = DataResource::Loaded(entry);
            state.search_input.clear();
            DispatchResult::changed()
        }

        Action::SearchDidError { token, error } => {
            if !accept(state, RequestKind::Search, token) {
                return DispatchResult::unchanged();
            }
            state.search = DataResource::Failed(error);
            DispatchResult::changed()
        }

        // ===== Random actions =====
        Action::RandomFetch { id } => {
            state.view = View::Random;
            state.random_loading = true;
            let token = state.tokens.issue(RequestKind::Random);
            DispatchResult::changed_with(Effect::LoadRandom { token, id })
        }

        Action::RandomDidLoad { token, pick } => {
            if !accept(state, RequestKind::Random, token) {
                return DispatchResult::unchanged();
            }
            state.random = Some(pick);
            state.random_loading = false;
            DispatchResult::changed()
        }

        Action::RandomDidError { token, .. } => {
            if !accept(state, RequestKind::Random, token) {
                return DispatchResult::unchanged();
            }
            state.random_loading = false;
            DispatchResult::changed()
        }

        // ===== Battle actions =====
        Action::BattleFetch { left, right } => {
            state.view = View::Battle;
            state.battle_loading = true;
            let token = state.tokens.issue(RequestKind::Battle);
            DispatchResult::changed_with(Effect::LoadBattle { token, left, right })
        }

        Action::BattleDidLoad { token, left, right } => {
            if !accept(state, RequestKind::Battle, token) {
                return DispatchResult::unchanged();
            }
            let battle = Battle::new(left, right);
            tracing::info!(
                left = %battle.left.name,
                right = %battle.right.name,
                winner = %battle.outcome.label(),
                "battle decided"
            );
            state.battle = Some(battle);
            state.battle_loading = false;
            DispatchResult::changed()
        }

        Action::BattleDidError { token, .. } => {
            if !accept(state, RequestKind::Battle, token) {
                return DispatchResult::unchanged();
            }
            state.battle_loading = false;
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.is_busy() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Completions only apply when they answer the latest request of their kind.
fn accept(state: &AppState, kind: RequestKind, token: u64) -> bool {
    let current = state.tokens.is_current(kind, token);
    if !current {
        tracing::debug!(
            ?kind,
            token,
            latest = state.tokens.latest(kind),
            "dropping stale result"
        );
    }
    current
}
