//! HTTP layer for Namesake.
//!
//! Exposes an axum [`Router`] backed by any [`PersonStore`] and any
//! [`Predictor`]. Tracing middleware, TLS and listening are the caller's
//! responsibility.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/add`, `/api/add` | Enrich a name and store the person |
//! | `GET`  | `/getperson/{id}` | 404 if not found |
//! | `PUT`  | `/person/{id}` | Partial update |
//! | `DELETE` | `/person/{id}` | |
//! | `POST` | `/people/filter` | Body: `PersonFilter` |

pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
  Router,
  routing::{get, post, put},
};
use namesake_core::PersonStore;
use namesake_enrich::{Endpoints, Enricher, Predictor};
use serde::Deserialize;

use handlers::{add, filter, people};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `NAMESAKE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                   String,
  pub port:                   u16,
  pub store_path:             PathBuf,
  pub agify_url:              String,
  pub genderize_url:          String,
  pub nationalize_url:        String,
  /// Upper bound on each outbound prediction request.
  pub request_timeout_secs:   u64,
  pub store_open_attempts:    u32,
  pub store_retry_delay_secs: u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    let endpoints = Endpoints::default();
    Self {
      host:                   "0.0.0.0".to_string(),
      port:                   8080,
      store_path:             PathBuf::from("namesake.db"),
      agify_url:              endpoints.age,
      genderize_url:          endpoints.gender,
      nationalize_url:        endpoints.nationality,
      request_timeout_secs:   10,
      store_open_attempts:    5,
      store_retry_delay_secs: 5,
    }
  }
}

impl ServerConfig {
  pub fn endpoints(&self) -> Endpoints {
    Endpoints {
      age:         self.agify_url.clone(),
      gender:      self.genderize_url.clone(),
      nationality: self.nationalize_url.clone(),
    }
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }

  pub fn store_retry_delay(&self) -> Duration {
    Duration::from_secs(self.store_retry_delay_secs)
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, P> {
  pub store:    Arc<S>,
  pub enricher: Enricher<P>,
}

impl<S, P> Clone for AppState<S, P> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      enricher: self.enricher.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the person API.
pub fn router<S, P>(state: AppState<S, P>) -> Router
where
  S: PersonStore + 'static,
  P: Predictor,
{
  Router::new()
    .route("/add", post(add::handler::<S, P>))
    .route("/api/add", post(add::handler::<S, P>))
    .route("/getperson/{id}", get(people::get_one::<S, P>))
    .route(
      "/person/{id}",
      put(people::update::<S, P>).delete(people::delete::<S, P>),
    )
    .route("/people/filter", post(filter::handler::<S, P>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
