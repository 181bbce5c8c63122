//! Name enrichment for Namesake.
//!
//! [`PredictionClient`] asks one public inference service (agify, genderize,
//! nationalize) about a name. [`Enricher`] fans the three lookups out
//! concurrently and joins them into a single all-or-nothing
//! [`Enrichment`](namesake_core::Enrichment).

pub mod client;
pub mod enricher;
pub mod error;
pub mod prediction;

pub use client::{Endpoints, PredictionClient};
pub use enricher::Enricher;
pub use error::{EnrichError, PredictionError};
pub use prediction::{Prediction, PredictionKind, Predictor};
