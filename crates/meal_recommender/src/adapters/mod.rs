// Rust guideline compliant 2026-10-19

//! Adapters (secondary ports) for the meal-recommender binary.
//!
//! Each sub-module implements a port from the `domain` crate or stands in for
//! an external artifact loader. Adapters are isolated from pipeline logic.

pub mod demo_catalog;
pub mod demo_model;
pub mod standard_scaler;
