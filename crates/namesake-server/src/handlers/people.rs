//! Handlers for single-person endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/getperson/{id}` | 404 if not found |
//! | `PUT`    | `/person/{id}` | Body: [`PersonPatch`]; empty fields are left alone |
//! | `DELETE` | `/person/{id}` | 404 if not found |

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
};
use namesake_core::{Person, PersonPatch, PersonStore};
use namesake_enrich::Predictor;
use serde_json::Value;

use crate::{AppState, error::ApiError, handlers::message};

fn not_found(id: i64) -> ApiError {
  ApiError::NotFound(format!("person {id} not found"))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /getperson/{id}`
pub async fn get_one<S, P>(
  State(state): State<AppState<S, P>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Person>, ApiError>
where
  S: PersonStore,
  P: Predictor,
{
  let Path(id) = id?;
  let person = state
    .store
    .get(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(person))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /person/{id}`
pub async fn update<S, P>(
  State(state): State<AppState<S, P>>,
  id: Result<Path<i64>, PathRejection>,
  body: Result<Json<PersonPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError>
where
  S: PersonStore,
  P: Predictor,
{
  let Path(id) = id?;
  let Json(patch) = body?;

  state
    .store
    .update(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| not_found(id))?;
  Ok(message("Person updated successfully"))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /person/{id}`
pub async fn delete<S, P>(
  State(state): State<AppState<S, P>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError>
where
  S: PersonStore,
  P: Predictor,
{
  let Path(id) = id?;

  let deleted = state
    .store
    .delete(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(not_found(id));
  }
  Ok(message("Person deleted successfully"))
}
