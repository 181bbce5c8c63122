//! [`Enricher`]: concurrent fan-out of the three predictions for a name.
//!
//! Each prediction runs on its own task and reports exactly once on a bounded
//! channel sized to the number of tasks. The enricher drains every report
//! before deciding, so no task or connection outlives the call. The first
//! failure received decides the outcome; any later failure is dropped.

use std::sync::Arc;

use namesake_core::Enrichment;
use tokio::sync::mpsc;

use crate::{EnrichError, Prediction, PredictionError, PredictionKind, Predictor};

type Report = (PredictionKind, Result<Prediction, PredictionError>);

/// Runs age, gender and nationality predictions concurrently and merges them.
pub struct Enricher<P> {
  predictor: Arc<P>,
}

impl<P> Clone for Enricher<P> {
  fn clone(&self) -> Self {
    Self { predictor: Arc::clone(&self.predictor) }
  }
}

impl<P: Predictor> Enricher<P> {
  pub fn new(predictor: P) -> Self {
    Self { predictor: Arc::new(predictor) }
  }

  /// Predict all three attributes of `name`.
  ///
  /// Returns an [`Enrichment`] only if every prediction succeeded. Always
  /// waits for all three reports, even after a failure has been seen.
  pub async fn enrich(&self, name: &str) -> Result<Enrichment, EnrichError> {
    let expected = PredictionKind::ALL.len();
    let (tx, mut rx) = mpsc::channel::<Report>(expected);

    for kind in PredictionKind::ALL {
      let tx        = tx.clone();
      let predictor = Arc::clone(&self.predictor);
      let name      = name.to_owned();
      tokio::spawn(async move {
        let outcome = predictor.predict(kind, &name).await;
        if tx.send((kind, outcome)).await.is_err() {
          tracing::debug!(%kind, "enrichment dropped before prediction was collected");
        }
      });
    }
    drop(tx);

    let mut merged        = Merged::default();
    let mut first_failure = None;
    let mut received      = 0;

    while received < expected {
      let Some((kind, outcome)) = rx.recv().await else {
        break;
      };
      received += 1;

      match outcome {
        Ok(prediction) => merged.insert(prediction),
        Err(error) if first_failure.is_none() => {
          tracing::debug!(%kind, %error, received, "first prediction failure");
          first_failure = Some(error);
        }
        Err(error) => {
          tracing::debug!(%kind, %error, received, "discarding later prediction failure");
        }
      }
    }

    if let Some(error) = first_failure {
      return Err(error.into());
    }
    if received < expected {
      return Err(EnrichError::Interrupted { received });
    }
    merged.finish()
  }
}

/// Result slots, one per kind.
#[derive(Default)]
struct Merged {
  age:         Option<i32>,
  gender:      Option<String>,
  nationality: Option<String>,
}

impl Merged {
  fn insert(&mut self, prediction: Prediction) {
    match prediction {
      Prediction::Age(v) => self.age = Some(v),
      Prediction::Gender(v) => self.gender = Some(v),
      Prediction::Nationality(v) => self.nationality = Some(v),
    }
  }

  fn finish(self) -> Result<Enrichment, EnrichError> {
    Ok(Enrichment {
      age:         self.age.ok_or(EnrichError::Missing(PredictionKind::Age))?,
      gender:      self.gender.ok_or(EnrichError::Missing(PredictionKind::Gender))?,
      nationality: self
        .nationality
        .ok_or(EnrichError::Missing(PredictionKind::Nationality))?,
    })
  }
}
