//! Catalogue rules: query normalization, random draws, shuffle, battle scoring.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::state::{Battle, BattleOutcome, Entry, Stat};

/// Highest id drawn for random picks and battles.
pub const MAX_ENTRY_ID: u16 = 898;
/// Listing length kept after a shuffle.
pub const SHUFFLE_KEEP: usize = 10;
/// Move references resolved for a random pick.
pub const RANDOM_MOVE_LIMIT: usize = 10;

pub const CHART_CATEGORY: &str = "Total Stats";

/// Trim and lower-case a search query. `None` for blank input.
pub fn normalize_query(raw: &str) -> Option<String> {
    let query = raw.trim().to_lowercase();
    if query.is_empty() {
        None
    } else {
        Some(query)
    }
}

/// Uniform id in `[1, MAX_ENTRY_ID]`.
pub fn draw_entry_id<R: Rng>(rng: &mut R) -> u16 {
    rng.gen_range(1..=MAX_ENTRY_ID)
}

/// Two independent draws; equal ids are allowed.
pub fn draw_battle_ids<R: Rng>(rng: &mut R) -> (u16, u16) {
    (draw_entry_id(rng), draw_entry_id(rng))
}

/// Permute `listing` with `seed` and keep the first [`SHUFFLE_KEEP`] entries.
pub fn shuffle_listing(listing: &[Entry], seed: u64) -> Vec<Entry> {
    let mut shuffled = listing.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);
    shuffled.truncate(SHUFFLE_KEEP);
    shuffled
}

pub fn stat_total(stats: &[Stat]) -> u32 {
    stats.iter().map(|stat| stat.value).sum()
}

pub fn battle_outcome(left: &Entry, right: &Entry) -> BattleOutcome {
    let (left_total, right_total) = (left.total(), right.total());
    if left_total > right_total {
        BattleOutcome::Winner(left.name.clone())
    } else if right_total > left_total {
        BattleOutcome::Winner(right.name.clone())
    } else {
        BattleOutcome::Tie
    }
}

/// Which fighter a chart dataset belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartSide {
    Left,
    Right,
}

/// One labeled dataset of the battle chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartDataset {
    pub label: String,
    pub value: u64,
    pub side: ChartSide,
}

/// Chart data: a single category with two datasets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleChart {
    pub category: &'static str,
    pub datasets: [ChartDataset; 2],
}

impl BattleChart {
    pub fn from_battle(battle: &Battle) -> Self {
        Self {
            category: CHART_CATEGORY,
            datasets: [
                ChartDataset {
                    label: battle.left.display_name(),
                    value: u64::from(battle.left.total()),
                    side: ChartSide::Left,
                },
                ChartDataset {
                    label: battle.right.display_name(),
                    value: u64::from(battle.right.total()),
                    side: ChartSide::Right,
                },
            ],
        }
    }

    /// Upper bound for the value axis, which always starts at zero.
    pub fn axis_max(&self) -> u64 {
        self.datasets
            .iter()
            .map(|dataset| dataset.value)
            .max()
            .unwrap_or(0)
            .max(1)
    }
}
