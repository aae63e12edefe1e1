//! Effects - side effects declared by the reducer

/// Catalogue requests; each carries the token issued for its kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// List `limit` entries, then fetch every detail as one batch
    LoadListing { token: u64, limit: usize },
    /// Look up one entry by normalized name
    SearchEntry { token: u64, name: String },
    /// Fetch an entry by id plus its first move details
    LoadRandom { token: u64, id: u16 },
    /// Fetch both battle entries concurrently
    LoadBattle { token: u64, left: u16, right: u16 },
}
