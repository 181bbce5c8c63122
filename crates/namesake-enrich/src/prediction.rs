//! Prediction kinds, values, and the [`Predictor`] seam.

use std::{fmt, future::Future};

use crate::PredictionError;

/// Which attribute a prediction service infers from a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionKind {
  Age,
  Gender,
  Nationality,
}

impl PredictionKind {
  /// Every kind, in the order the enricher launches them.
  pub const ALL: [PredictionKind; 3] =
    [PredictionKind::Age, PredictionKind::Gender, PredictionKind::Nationality];

  pub fn as_str(self) -> &'static str {
    match self {
      PredictionKind::Age => "age",
      PredictionKind::Gender => "gender",
      PredictionKind::Nationality => "nationality",
    }
  }
}

impl fmt::Display for PredictionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One successful prediction. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
  Age(i32),
  Gender(String),
  /// ISO 3166-1 alpha-2 code; empty when the service gave no breakdown.
  Nationality(String),
}

impl Prediction {
  pub fn kind(&self) -> PredictionKind {
    match self {
      Prediction::Age(_) => PredictionKind::Age,
      Prediction::Gender(_) => PredictionKind::Gender,
      Prediction::Nationality(_) => PredictionKind::Nationality,
    }
  }
}

/// Something that can predict one attribute of a name.
///
/// [`PredictionClient`](crate::PredictionClient) is the production
/// implementation; tests substitute scripted ones.
pub trait Predictor: Send + Sync + 'static {
  fn predict<'a>(
    &'a self,
    kind: PredictionKind,
    name: &'a str,
  ) -> impl Future<Output = Result<Prediction, PredictionError>> + Send + 'a;
}
