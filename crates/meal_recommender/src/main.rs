// Rust guideline compliant 2026-10-19

//! Meal-recommendation demo entry point.
//!
//! Wires the recommender to the built-in demo catalog, a `StandardScaler`
//! fitted on that catalog and the DEMO model, then answers one request or a
//! JSON array of requests. Each request runs on its own blocking worker with
//! its own random source; one JSON response line is printed per request.
//!
//! # Usage
//!
//! ```text
//! # Request from a file (a single object or an array of objects)
//! RUST_LOG=info cargo run -- request.json
//!
//! # Request from stdin, reproducible run
//! echo '{"sex":"female","currentIntake":{"calories":900}}' \
//!     | MEAL_RECOMMENDER_SEED=7 cargo run
//! ```

mod adapters;

use std::sync::Arc;

use adapters::demo_catalog;
use adapters::demo_model::DemoModel;
use adapters::standard_scaler::StandardScaler;
use anyhow::Context as _;
use catalog::Catalog;
use domain::{Model, RecommendationResult, Scaler, UserState};
use recommender::{RecommendationSummary, Recommender, RecommenderConfig, summarize};
use serde::Serialize;
use tokio::io::AsyncReadExt as _;

/// Environment variable holding an optional base seed.
const SEED_VAR: &str = "MEAL_RECOMMENDER_SEED";

/// One output line.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response {
    Ok {
        recommendations: Vec<RecommendationResult>,
        summary: RecommendationSummary,
    },
    Err {
        error: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only JSON responses.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut builder = RecommenderConfig::builder();
    if let Some(seed) = read_seed()? {
        builder = builder.seed(seed);
    }
    let config = builder.build().context("failed to build recommender config")?;

    // Artifacts are loaded once and shared read-only by every worker.
    let catalog = Catalog::from_table(&demo_catalog::table());
    let scaler = StandardScaler::fit(&features::build_matrix(&catalog, &UserState::default()));
    let recommender = Arc::new(Recommender::new(config, catalog, scaler, DemoModel::new()));

    let input = read_input(std::env::args().nth(1)).await?;
    let payloads = split_payloads(&input)?;
    tracing::info!(requests = payloads.len(), "main.requests.read");

    for response in run_all(&recommender, payloads).await? {
        println!("{}", serde_json::to_string(&response).context("failed to encode response")?);
    }
    Ok(())
}

/// Parse the optional seed variable.
fn read_seed() -> anyhow::Result<Option<u64>> {
    match std::env::var(SEED_VAR) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{SEED_VAR} must be an unsigned integer, got {raw:?}")),
        Err(_) => Ok(None),
    }
}

/// Read the request file, or stdin when no path is given.
async fn read_input(path: Option<String>) -> anyhow::Result<String> {
    if let Some(path) = path {
        return tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read request file {path}"));
    }
    let mut buf = String::new();
    tokio::io::stdin().read_to_string(&mut buf).await.context("failed to read stdin")?;
    Ok(buf)
}

/// Split a top-level JSON array into one payload per element; anything else
/// is a single payload.
fn split_payloads(input: &str) -> anyhow::Result<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(input).context("input is not valid JSON")?;
    Ok(match value {
        serde_json::Value::Array(items) => items.iter().map(ToString::to_string).collect(),
        other => vec![other.to_string()],
    })
}

/// Answer every payload on its own blocking worker, preserving input order.
///
/// Random sources are drawn before spawning, so a seeded run is reproducible
/// regardless of worker scheduling. A malformed payload yields an error
/// response without affecting the others.
async fn run_all<S, M>(
    recommender: &Arc<Recommender<S, M>>,
    payloads: Vec<String>,
) -> anyhow::Result<Vec<Response>>
where
    S: Scaler + Send + Sync + 'static,
    M: Model + Send + Sync + 'static,
{
    let handles: Vec<_> = payloads
        .into_iter()
        .map(|payload| {
            let recommender = Arc::clone(recommender);
            let mut rng = recommender.next_rng();
            tokio::task::spawn_blocking(move || recommender.recommend_json(&payload, &mut rng))
        })
        .collect();

    let mut responses = Vec::with_capacity(handles.len());
    for handle in handles {
        let response = match handle.await.context("recommendation worker panicked")? {
            Ok(recommendations) => {
                let summary = summarize(&recommendations);
                Response::Ok { recommendations, summary }
            }
            Err(e) => {
                tracing::warn!(error = %e, "main.request.rejected");
                Response::Err { error: e.to_string() }
            }
        };
        responses.push(response);
    }
    Ok(responses)
}
