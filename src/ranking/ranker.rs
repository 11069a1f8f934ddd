//! Order scored entries and expose a bounded top view.

use super::scorer::ScoredEntry;
use std::cmp::Ordering;

/// The full scored collection, sorted descending by score.
///
/// The sort is stable, so entries with equal scores keep their resolution
/// order: for a fixed sitemap tree and configuration the output is
/// deterministic. `top(n)` is a view — the complete ranked set stays
/// available through `all()`.
#[derive(Debug)]
pub struct Ranking {
    entries: Vec<ScoredEntry>,
}

impl Ranking {
    pub fn new(mut entries: Vec<ScoredEntry>) -> Self {
        entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        Self { entries }
    }

    /// The highest-scored `n` entries (fewer when the set is smaller).
    pub fn top(&self, n: usize) -> &[ScoredEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Every entry, ranked.
    pub fn all(&self) -> &[ScoredEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
