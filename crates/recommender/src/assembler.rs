// Rust guideline compliant 2026-10-19

//! Recommendation Assembler: selected candidates -> user-facing records.

use catalog::Catalog;
use domain::{RecommendationResult, ScoredCandidate};

/// Human-readable reason embedding `score` to one decimal place.
#[must_use]
pub fn reason_for(score: f64) -> String {
    format!("AI nutrition score {score:.1}!")
}

/// Build one [`RecommendationResult`] per selected candidate, in selection order.
///
/// Calories are the item's resolved energy (`0.0` when the catalog had no
/// energy column). Candidates outside `catalog` are dropped.
///
/// A NaN or infinite score is reported as `0.0` rather than passed through:
/// JSON has no encoding for non-finite numbers and `serde_json` would emit
/// `null`, breaking the numeric `score` field of the response.
#[must_use]
pub fn assemble(catalog: &Catalog, selected: &[ScoredCandidate]) -> Vec<RecommendationResult> {
    selected
        .iter()
        .filter_map(|c| {
            let item = catalog.get(c.index)?;
            let score = if c.score.is_finite() { c.score } else { 0.0 };
            Some(RecommendationResult {
                menu: item.name.clone(),
                calorie: item.nutrients.energy,
                score,
                reason: reason_for(score),
            })
        })
        .collect()
}
