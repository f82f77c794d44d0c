// Rust guideline compliant 2026-10-19

//! Diversity-Constrained Selector.
//!
//! Ranks scored candidates, keeps a top window, shuffles it, then greedily
//! picks up to `top_k` items with no repeated name and no repeated category.
//! Returning fewer than `top_k` items is a normal outcome when the window is
//! short or homogeneous; constraints are never relaxed to fill the list.

use std::collections::HashSet;

use catalog::Catalog;
use domain::ScoredCandidate;
use rand::Rng;
use rand::seq::SliceRandom as _;

/// Default number of recommendations per request.
pub const DEFAULT_TOP_K: usize = 3;

/// Default size of the shuffled candidate window.
pub const DEFAULT_WINDOW: usize = 50;

/// Greedy diversity selector with a fixed result size and window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    top_k: usize,
    window: usize,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K, DEFAULT_WINDOW)
    }
}

impl Selector {
    /// Create a selector returning at most `top_k` items drawn from the best `window`.
    #[must_use]
    pub fn new(top_k: usize, window: usize) -> Self {
        Self { top_k, window }
    }

    /// Maximum number of selected items.
    #[must_use]
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Size of the candidate window.
    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Select up to `top_k` candidates.
    ///
    /// 1. Sort by score, descending (NaN ranks first, as under a total order).
    /// 2. Keep the best `window` candidates and shuffle them with `rng`.
    /// 3. Walk the shuffled window, skipping names in `recent_names` or already
    ///    picked, and categories already picked.
    ///
    /// Candidates whose index is outside `catalog` are skipped.
    #[must_use]
    pub fn select<R: Rng>(
        &self,
        catalog: &Catalog,
        candidates: &[ScoredCandidate],
        recent_names: &[String],
        rng: &mut R,
    ) -> Vec<ScoredCandidate> {
        let mut ranked = candidates.to_vec();
        ranked.sort_unstable_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(self.window);
        ranked.shuffle(rng);

        let mut excluded_names: HashSet<&str> = recent_names.iter().map(String::as_str).collect();
        let mut used_categories: HashSet<&str> = HashSet::new();
        let mut selected = Vec::with_capacity(self.top_k);

        for candidate in ranked {
            if selected.len() >= self.top_k {
                break;
            }
            let Some(item) = catalog.get(candidate.index) else {
                continue;
            };
            if excluded_names.contains(item.name.as_str())
                || used_categories.contains(item.category.as_str())
            {
                continue;
            }
            excluded_names.insert(&item.name);
            used_categories.insert(&item.category);
            selected.push(candidate);
        }

        if selected.len() < self.top_k {
            tracing::debug!(
                selected = selected.len(),
                top_k = self.top_k,
                "selector.shortfall"
            );
        }
        selected
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
