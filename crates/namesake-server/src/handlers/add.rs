//! `POST /add`: enrich a name and store the person.
//!
//! Enrichment is all-or-nothing: if any of the three predictions fails the
//! person is not stored. The response is the same confirmation either way;
//! the failure only shows up in the server log.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use namesake_core::{NewPerson, PersonStore};
use namesake_enrich::Predictor;
use serde_json::Value;

use crate::{AppState, error::ApiError, handlers::message};

pub async fn handler<S, P>(
  State(state): State<AppState<S, P>>,
  body: Result<Json<NewPerson>, JsonRejection>,
) -> Result<Json<Value>, ApiError>
where
  S: PersonStore,
  P: Predictor,
{
  let Json(person) = body?;

  match state.enricher.enrich(&person.name).await {
    Ok(enrichment) => {
      let id = state
        .store
        .create(person.enriched_with(enrichment))
        .await
        .map_err(|e| ApiError::Store(Box::new(e)))?;
      tracing::info!(id, "person enriched and created");
    }
    Err(error) => {
      tracing::error!(name = %person.name, %error, "enrichment failed; person not created");
    }
  }

  Ok(message("Person enriched and created"))
}
