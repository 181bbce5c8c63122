pub mod add;
pub mod filter;
pub mod people;

use axum::Json;
use serde_json::{Value, json};

/// `{"message": "..."}` confirmation body.
pub(crate) fn message(text: &str) -> Json<Value> {
  Json(json!({ "message": text }))
}
