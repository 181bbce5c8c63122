//! Handler for `POST /people/filter`.
//!
//! The body maps directly to [`PersonFilter`]; every key is optional.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use namesake_core::{Person, PersonFilter, PersonStore};
use namesake_enrich::Predictor;

use crate::{AppState, error::ApiError};

/// `POST /people/filter`, body: `{"gender":"Male","minAge":20,"page":1,"pageSize":10}`
pub async fn handler<S, P>(
  State(state): State<AppState<S, P>>,
  body: Result<Json<PersonFilter>, JsonRejection>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore,
  P: Predictor,
{
  let Json(filter) = body?;

  let people = state
    .store
    .filter(&filter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(people))
}
