pub mod battle_view;
pub mod dex_display;
pub mod entry_detail;
pub mod listing_view;
pub mod random_view;
pub mod search_overlay;
pub mod search_view;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use battle_view::{BattleView, BattleViewProps};
pub use dex_display::{DexDisplay, DexDisplayProps};
pub use entry_detail::{EntryDetail, EntryDetailProps};
pub use listing_view::{ListingGrid, ListingView, ListingViewProps};
pub use random_view::{RandomView, RandomViewProps};
pub use search_overlay::{SearchOverlay, SearchOverlayProps};
pub use search_view::{SearchView, SearchViewProps, NOT_FOUND_MESSAGE};
