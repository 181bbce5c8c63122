//! Error types for `namesake-enrich`.

use reqwest::StatusCode;
use thiserror::Error;

use crate::PredictionKind;

/// Why a single prediction call failed.
#[derive(Debug, Error)]
pub enum PredictionError {
  /// The service answered with `count == 0`.
  #[error("{kind} service does not recognise the name")]
  NameNotRecognized { kind: PredictionKind },

  #[error("{kind} service responded with {status}")]
  Upstream { kind: PredictionKind, status: StatusCode },

  #[error("{kind} request failed: {source}")]
  Transport {
    kind:   PredictionKind,
    #[source]
    source: reqwest::Error,
  },

  #[error("{kind} response could not be decoded: {source}")]
  Decode {
    kind:   PredictionKind,
    #[source]
    source: serde_json::Error,
  },
}

impl PredictionError {
  pub fn kind(&self) -> PredictionKind {
    match self {
      PredictionError::NameNotRecognized { kind }
      | PredictionError::Upstream { kind, .. }
      | PredictionError::Transport { kind, .. }
      | PredictionError::Decode { kind, .. } => *kind,
    }
  }
}

/// Why an enrichment was abandoned.
#[derive(Debug, Error)]
pub enum EnrichError {
  /// The first prediction failure observed; later ones are dropped.
  #[error(transparent)]
  Prediction(#[from] PredictionError),

  /// A worker went away without reporting (e.g. it panicked).
  #[error("enrichment interrupted after {received} of 3 predictions")]
  Interrupted { received: usize },

  /// Every worker reported success but one kind never arrived.
  #[error("no {0} prediction was reported")]
  Missing(PredictionKind),
}
