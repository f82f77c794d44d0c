// Rust guideline compliant 2026-10-19

//! Feature Vector Builder.
//!
//! Maps every catalog row plus one broadcast [`UserState`] into the fixed
//! 18-column model input. Alias resolution already happened when the catalog
//! was loaded, so this stage is a total, allocation-only transform.

use catalog::Catalog;
use domain::{FeatureVector, UserState};

/// Build one [`FeatureVector`] per catalog row, in catalog order.
///
/// Columns are the row's 6 nutrients, then the 6 `rec_*` targets, then the
/// 6 `cur_*` values. The same user state is repeated on every row.
#[must_use]
pub fn build_matrix(catalog: &Catalog, user: &UserState) -> Vec<FeatureVector> {
    tracing::debug!(rows = catalog.len(), "features.build_matrix");
    catalog
        .items()
        .iter()
        .map(|item| FeatureVector::new(&item.nutrients, user))
        .collect()
}
