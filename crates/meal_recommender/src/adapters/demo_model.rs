// Rust guideline compliant 2026-10-19

//! DEMO model adapter for the `Model` port.
//!
//! A fixed-weight logistic model over standardized features: protein is
//! rewarded, sodium, sugar and fat are penalized. Output is a probability in
//! `(0, 1)`, so the Scoring Adapter rescales it onto the 45-100 range.
//! Stands in for the pre-trained artifact, which this binary does not load.

use domain::{FEATURE_LEN, FeatureVector, Model, ScoringError};

/// Weights for the 6 food columns; user-state columns carry no weight.
const FOOD_WEIGHTS: [f64; 6] = [0.2, -0.1, 0.6, -0.3, -0.5, -0.6];

/// Concrete adapter for the `domain::Model` port.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoModel {
    weights: [f64; FEATURE_LEN],
    bias: f64,
}

impl DemoModel {
    /// Create the DEMO model with its built-in weights.
    #[must_use]
    pub fn new() -> Self {
        let mut weights = [0.0; FEATURE_LEN];
        weights[..FOOD_WEIGHTS.len()].copy_from_slice(&FOOD_WEIGHTS);
        Self { weights, bias: 0.5 }
    }
}

impl Default for DemoModel {
    fn default() -> Self {
        Self::new()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Model for DemoModel {
    /// Logistic score per row.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::PredictionFailed` if a row yields a non-finite score.
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ScoringError> {
        rows.iter()
            .map(|row| {
                let z = row.values().iter().zip(&self.weights).map(|(x, w)| x * w).sum::<f64>() + self.bias;
                let p = sigmoid(z);
                if p.is_finite() {
                    Ok(p)
                } else {
                    Err(ScoringError::PredictionFailed { reason: format!("non-finite logit {z}") })
                }
            })
            .collect()
    }

    /// Returns `"DEMO"`.
    fn name(&self) -> &'static str {
        "DEMO"
    }
}
