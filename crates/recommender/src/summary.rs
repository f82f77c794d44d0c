// Rust guideline compliant 2026-10-19

//! Single-card summary of a recommendation list, for clients that show one
//! title and one text block.

use domain::RecommendationResult;
use serde::Serialize;

/// Title used when nothing could be recommended.
pub const EMPTY_MENU_NAME: &str = "No recommendation";

/// Reason used when nothing could be recommended.
pub const EMPTY_REASON: &str = "No menu matches the current conditions.";

/// Ranked results folded into one title, one calorie value and one reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    /// `"1. A / 2. B / 3. C"`.
    pub menu_name: String,
    /// Calories of the first-ranked item.
    pub calories: f64,
    /// One `"[rank] name (kcal)\n-> reason"` block per item, blank-line separated.
    pub reason: String,
}

/// Fold `results` into a [`RecommendationSummary`].
#[must_use]
pub fn summarize(results: &[RecommendationResult]) -> RecommendationSummary {
    let Some(first) = results.first() else {
        return RecommendationSummary {
            menu_name: EMPTY_MENU_NAME.to_owned(),
            calories: 0.0,
            reason: EMPTY_REASON.to_owned(),
        };
    };

    let menu_name = results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {}", i + 1, r.menu))
        .collect::<Vec<_>>()
        .join(" / ");
    let reason = results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("[{}] {} ({}kcal)\n-> {}", i + 1, r.menu, r.calorie, r.reason))
        .collect::<Vec<_>>()
        .join("\n\n");

    RecommendationSummary { menu_name, calories: first.calorie, reason }
}
