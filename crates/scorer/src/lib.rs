// Rust guideline compliant 2026-10-19

//! Scoring Adapter for the meal-recommendation pipeline.
//!
//! [`Scorer`] runs a feature batch through an injected `domain::Scaler` and
//! `domain::Model`, maps probability-like output onto the user-facing score
//! range, and substitutes a uniform fallback distribution when either port
//! fails. It owns no model logic; inference lives entirely in the adapters.

use std::ops::Range;

use domain::{FeatureVector, Model, ScoreSource, ScoredCandidate, Scaler, ScoringError};
use rand::Rng;

/// Raw outputs whose maximum is at or below this value are treated as probabilities.
pub const PROBABILITY_CEILING: f64 = 1.0;

/// Multiplier applied to probability-like predictions.
pub const RESCALE_FACTOR: f64 = 50.0;

/// Offset added to probability-like predictions.
pub const RESCALE_OFFSET: f64 = 45.0;

/// Per-item jitter is drawn uniformly from `[0, JITTER_MAX)`.
pub const JITTER_MAX: f64 = 5.0;

/// Scores used when the scaler or the model fails.
pub const FALLBACK_RANGE: Range<f64> = 85.0..99.0;

// ---------------------------------------------------------------------------
// ScoredBatch
// ---------------------------------------------------------------------------

/// One score per input row, in row order, plus the path that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredBatch {
    /// User-facing scores, index-aligned with the feature batch.
    pub scores: Vec<f64>,
    /// Whether the scores came from the model or from the fallback.
    pub source: ScoreSource,
}

impl ScoredBatch {
    /// Pair every score with its catalog row index.
    #[must_use]
    pub fn candidates(&self) -> Vec<ScoredCandidate> {
        self.scores
            .iter()
            .enumerate()
            .map(|(index, &score)| ScoredCandidate { index, score })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// Pipeline component that scores feature batches.
///
/// Generic over any `Scaler` and `Model` adapter for zero-cost static dispatch.
/// Randomness is injected per call so concurrent requests can each use their
/// own source.
#[derive(Debug)]
pub struct Scorer<S: Scaler, M: Model> {
    scaler: S,
    model: M,
}

impl<S: Scaler, M: Model> Scorer<S, M> {
    /// Create a new scorer wrapping `scaler` and `model`.
    #[must_use]
    pub fn new(scaler: S, model: M) -> Self {
        Self { scaler, model }
    }

    /// Name of the wrapped model.
    #[must_use]
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Score every row of `rows`.
    ///
    /// Never fails: a scaler or model error is logged and replaced by
    /// [`FALLBACK_RANGE`] scores for the whole batch. The model/fallback choice
    /// is made once per call, so a batch never mixes both sources.
    pub fn score<R: Rng>(&self, rows: &[FeatureVector], rng: &mut R) -> ScoredBatch {
        if rows.is_empty() {
            return ScoredBatch { scores: Vec::new(), source: ScoreSource::Model };
        }

        match self.predict(rows) {
            Ok(raw) => {
                tracing::debug!(model = self.model.name(), rows = rows.len(), "scorer.predicted");
                ScoredBatch { scores: normalize(raw, rng), source: ScoreSource::Model }
            }
            Err(e) => {
                tracing::warn!(model = self.model.name(), error = %e, "scorer.fallback");
                let scores = (0..rows.len()).map(|_| rng.random_range(FALLBACK_RANGE)).collect();
                ScoredBatch { scores, source: ScoreSource::Fallback }
            }
        }
    }

    /// Scaler, then model. Either port returning the wrong row count is a failure.
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ScoringError> {
        let scaled = self.scaler.transform(rows)?;
        check_len(rows.len(), scaled.len())?;
        let raw = self.model.predict(&scaled)?;
        check_len(rows.len(), raw.len())?;
        Ok(raw)
    }
}

fn check_len(expected: usize, actual: usize) -> Result<(), ScoringError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ScoringError::ShapeMismatch { expected, actual })
    }
}

/// Map probability-like predictions to `raw * 50 + 45 + jitter`.
///
/// Applies only when every prediction is `<= 1.0` (a NaN disables it, as a
/// NaN maximum would); otherwise predictions pass through unchanged.
#[must_use]
pub fn normalize<R: Rng>(raw: Vec<f64>, rng: &mut R) -> Vec<f64> {
    if !raw.iter().all(|&p| p <= PROBABILITY_CEILING) {
        return raw;
    }
    raw.into_iter()
        .map(|p| p * RESCALE_FACTOR + RESCALE_OFFSET + rng.random_range(0.0..JITTER_MAX))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
