// Rust guideline compliant 2026-10-19

//! Standardizing adapter for the `Scaler` port.
//!
//! Stores a per-column mean and standard deviation fixed at load time and
//! maps each value to `(x - mean) / std`. Zero-variance columns use a unit
//! scale, so constant columns are only centered.

use domain::{FEATURE_LEN, FeatureVector, Scaler, ScoringError};

/// `Scaler` adapter performing per-column standardization.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_LEN],
    scale: [f64; FEATURE_LEN],
}

impl StandardScaler {
    /// Build a scaler from known column statistics.
    #[must_use]
    pub fn new(mean: [f64; FEATURE_LEN], scale: [f64; FEATURE_LEN]) -> Self {
        let scale = scale.map(|s| if s == 0.0 || !s.is_finite() { 1.0 } else { s });
        Self { mean, scale }
    }

    /// Fit column statistics (population standard deviation) on `rows`.
    ///
    /// An empty fit set yields the identity transform.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "catalog row counts are far below 2^52")]
    pub fn fit(rows: &[FeatureVector]) -> Self {
        if rows.is_empty() {
            return Self::new([0.0; FEATURE_LEN], [1.0; FEATURE_LEN]);
        }
        let n = rows.len() as f64;
        let mut mean = [0.0; FEATURE_LEN];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row.values()) {
                *m += v / n;
            }
        }
        let mut var = [0.0; FEATURE_LEN];
        for row in rows {
            for ((acc, v), m) in var.iter_mut().zip(row.values()).zip(&mean) {
                *acc += (v - m).powi(2) / n;
            }
        }
        Self::new(mean, var.map(f64::sqrt))
    }
}

impl Scaler for StandardScaler {
    /// Standardize every row.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::TransformFailed` if any input value is not finite.
    fn transform(&self, rows: &[FeatureVector]) -> Result<Vec<FeatureVector>, ScoringError> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                if row.values().iter().any(|v| !v.is_finite()) {
                    return Err(ScoringError::TransformFailed {
                        reason: format!("non-finite value in row {i}"),
                    });
                }
                let mut out = [0.0; FEATURE_LEN];
                for (j, o) in out.iter_mut().enumerate() {
                    *o = (row.values()[j] - self.mean[j]) / self.scale[j];
                }
                Ok(FeatureVector(out))
            })
            .collect()
    }
}
