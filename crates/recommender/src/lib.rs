// Rust guideline compliant 2026-10-19

//! Recommender component -- wires the Feature Vector Builder, the Scoring
//! Adapter, the Diversity-Constrained Selector and the Assembler into one
//! per-request pipeline over an immutable catalog.
//!
//! Entry points: [`Recommender::recommend`], [`Recommender::recommend_json`],
//! [`Recommender::next_rng`]. Configuration via [`RecommenderConfig::builder`].

pub mod assembler;
pub mod summary;

use std::sync::atomic::{AtomicU64, Ordering};

use catalog::Catalog;
use domain::{IntakeRequest, Model, RecommendationRequest, RecommendationResult, Scaler};
use rand::{Rng, SeedableRng, rngs::StdRng};
use scorer::Scorer;
use selector::{DEFAULT_TOP_K, DEFAULT_WINDOW, Selector};
use serde::Deserialize;

pub use assembler::{assemble, reason_for};
pub use summary::{RecommendationSummary, summarize};

// ---------------------------------------------------------------------------
// RecommendError
// ---------------------------------------------------------------------------

/// Request-level failures. Scoring failures are recovered internally and
/// never appear here.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// The supplied configuration is invalid.
    #[error("invalid recommender configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// The request payload could not be decoded.
    #[error("invalid request payload: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// RecommenderConfig + builder
// ---------------------------------------------------------------------------

/// Runtime configuration for a [`Recommender`].
///
/// Construct via [`RecommenderConfig::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommenderConfig {
    /// Maximum number of recommendations per request.
    pub top_k: usize,
    /// Size of the shuffled candidate window.
    pub window: usize,
    /// Optional base seed for per-request random sources. `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Builder for [`RecommenderConfig`].
///
/// Obtain via [`RecommenderConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct RecommenderConfigBuilder {
    top_k: usize,
    window: usize,
    seed: Option<u64>,
}

impl RecommenderConfig {
    /// Create a builder.
    ///
    /// Default values: `top_k = 3`, `window = 50`, `seed = None`.
    #[must_use]
    pub fn builder() -> RecommenderConfigBuilder {
        RecommenderConfigBuilder { top_k: DEFAULT_TOP_K, window: DEFAULT_WINDOW, seed: None }
    }
}

impl RecommenderConfigBuilder {
    /// Override the number of recommendations per request.
    #[must_use]
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Override the candidate window size.
    #[must_use]
    pub fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Fix the base seed for reproducible recommendations (useful in tests).
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::InvalidConfig`] when `top_k` or `window` is zero.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<RecommenderConfig, RecommendError> {
        if self.top_k == 0 {
            return Err(RecommendError::InvalidConfig { reason: "top_k must be >= 1".to_owned() });
        }
        if self.window == 0 {
            return Err(RecommendError::InvalidConfig { reason: "window must be >= 1".to_owned() });
        }
        Ok(RecommenderConfig { top_k: self.top_k, window: self.window, seed: self.seed })
    }
}

// ---------------------------------------------------------------------------
// Payload decoding
// ---------------------------------------------------------------------------

/// Top-level keys that mark a payload as the intake shape.
const INTAKE_MARKERS: [&str; 4] = ["sex", "gender", "currentIntake", "foodList"];

/// Decode a JSON request in either the direct (`user_state`) or the intake
/// (`sex` + `currentIntake`) shape.
///
/// An object carrying any intake key is decoded strictly as the intake shape;
/// everything else is decoded as the direct shape.
///
/// # Errors
///
/// Returns [`RecommendError::InvalidRequest`] when `payload` is not valid JSON
/// or does not decode into the shape it was dispatched to.
pub fn parse_request(payload: &str) -> Result<RecommendationRequest, RecommendError> {
    let value: serde_json::Value = serde_json::from_str(payload)?;
    let is_intake = value
        .as_object()
        .is_some_and(|obj| INTAKE_MARKERS.iter().any(|k| obj.contains_key(*k)));
    if is_intake {
        Ok(IntakeRequest::deserialize(value)?.into())
    } else {
        Ok(RecommendationRequest::deserialize(value)?)
    }
}

// ---------------------------------------------------------------------------
// Recommender
// ---------------------------------------------------------------------------

/// Per-request recommendation pipeline over a shared, read-only catalog.
///
/// Generic over the `Scaler` and `Model` ports. Holds no per-request state:
/// every call gets its random source injected, so one instance can be shared
/// across workers (behind `Arc`) when the ports are `Sync`.
#[derive(Debug)]
pub struct Recommender<S: Scaler, M: Model> {
    config: RecommenderConfig,
    catalog: Catalog,
    scorer: Scorer<S, M>,
    selector: Selector,
    /// Per-request counter mixed into the configured seed.
    sequence: AtomicU64,
}

impl<S: Scaler, M: Model> Recommender<S, M> {
    /// Create a recommender over `catalog` using the given ports.
    #[must_use]
    pub fn new(config: RecommenderConfig, catalog: Catalog, scaler: S, model: M) -> Self {
        let selector = Selector::new(config.top_k, config.window);
        Self { config, catalog, scorer: Scorer::new(scaler, model), selector, sequence: AtomicU64::new(0) }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// The catalog recommendations are drawn from.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// A fresh random source for one request.
    ///
    /// With a configured seed, the n-th call is seeded with `seed + n`, so a
    /// run is reproducible while concurrent requests stay uncorrelated.
    /// Without one, every source is seeded from the OS.
    #[must_use]
    pub fn next_rng(&self) -> StdRng {
        let n = self.sequence.fetch_add(1, Ordering::Relaxed);
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(n)),
            None => StdRng::from_os_rng(),
        }
    }

    /// Recommend up to `top_k` items for `request`.
    ///
    /// Build features -> score (with fallback) -> diversity selection ->
    /// assemble. Never fails; a shorter list is a valid outcome.
    pub fn recommend<R: Rng>(
        &self,
        request: &RecommendationRequest,
        rng: &mut R,
    ) -> Vec<RecommendationResult> {
        let request_id = uuid::Uuid::new_v4();
        let _span = tracing::info_span!("recommend", %request_id).entered();

        let matrix = features::build_matrix(&self.catalog, &request.user_state);
        let batch = self.scorer.score(&matrix, rng);
        let selected =
            self.selector.select(&self.catalog, &batch.candidates(), &request.recent_food_names, rng);
        let results = assemble(&self.catalog, &selected);

        tracing::info!(
            candidates = matrix.len(),
            source = ?batch.source,
            results = results.len(),
            "recommender.request.completed"
        );
        results
    }

    /// Decode `payload` and recommend for it.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::InvalidRequest`] for a malformed payload.
    pub fn recommend_json<R: Rng>(
        &self,
        payload: &str,
        rng: &mut R,
    ) -> Result<Vec<RecommendationResult>, RecommendError> {
        let request = parse_request(payload)?;
        Ok(self.recommend(&request, rng))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
