//! HTTP client for the agify / genderize / nationalize family of services.
//!
//! Every service takes `GET <base>?name=<name>` and answers with a JSON body
//! carrying a `count` of samples plus kind-specific fields:
//!
//! | Kind | Body |
//! |------|------|
//! | age | `{"count": 3800, "age": 43}` |
//! | gender | `{"count": 1094417, "gender": "male"}` |
//! | nationality | `{"count": 2, "country": [{"country_id": "UA", "probability": 0.49}]}` |

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{Prediction, PredictionError, PredictionKind, Predictor};

// ─── Endpoints ───────────────────────────────────────────────────────────────

/// Base URL of each prediction service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
  pub age:         String,
  pub gender:      String,
  pub nationality: String,
}

impl Default for Endpoints {
  fn default() -> Self {
    Self {
      age:         "https://api.agify.io/".to_string(),
      gender:      "https://api.genderize.io/".to_string(),
      nationality: "https://api.nationalize.io/".to_string(),
    }
  }
}

impl Endpoints {
  pub fn url(&self, kind: PredictionKind) -> &str {
    match kind {
      PredictionKind::Age => &self.age,
      PredictionKind::Gender => &self.gender,
      PredictionKind::Nationality => &self.nationality,
    }
  }
}

// ─── Response bodies ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AgeBody {
  #[serde(default)]
  count: u64,
  age:   Option<i32>,
}

#[derive(Debug, Deserialize)]
struct GenderBody {
  #[serde(default)]
  count:  u64,
  gender: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NationalityBody {
  #[serde(default)]
  count:   u64,
  #[serde(default)]
  country: Vec<CountryProbability>,
}

/// One entry of a nationalize breakdown.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountryProbability {
  pub country_id:  String,
  pub probability: f64,
}

/// Pick the country with the strictly greatest probability.
///
/// Ties keep the first maximum seen. An empty breakdown, or one where every
/// probability is zero, yields an empty string.
pub fn most_probable_country(countries: &[CountryProbability]) -> String {
  let mut best = 0.0;
  let mut country = "";
  for c in countries {
    if c.probability > best {
      best = c.probability;
      country = c.country_id.as_str();
    }
  }
  country.to_owned()
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async client for the three prediction services.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct PredictionClient {
  http:      Client,
  endpoints: Endpoints,
}

impl PredictionClient {
  /// Build a client whose every request is bounded by `timeout`.
  pub fn new(endpoints: Endpoints, timeout: Duration) -> reqwest::Result<Self> {
    let http = Client::builder().timeout(timeout).build()?;
    Ok(Self { http, endpoints })
  }

  async fn fetch<T: DeserializeOwned>(
    &self,
    kind: PredictionKind,
    name: &str,
  ) -> Result<T, PredictionError> {
    let transport = |source| PredictionError::Transport { kind, source };

    let resp = self
      .http
      .get(self.endpoints.url(kind))
      .query(&[("name", name)])
      .send()
      .await
      .map_err(transport)?;

    let status = resp.status();
    if status != StatusCode::OK {
      return Err(PredictionError::Upstream { kind, status });
    }

    let body = resp.bytes().await.map_err(transport)?;
    serde_json::from_slice(&body)
      .map_err(|source| PredictionError::Decode { kind, source })
  }
}

impl Predictor for PredictionClient {
  async fn predict(
    &self,
    kind: PredictionKind,
    name: &str,
  ) -> Result<Prediction, PredictionError> {
    let unrecognized = PredictionError::NameNotRecognized { kind };

    let prediction = match kind {
      PredictionKind::Age => {
        let body: AgeBody = self.fetch(kind, name).await?;
        if body.count == 0 {
          return Err(unrecognized);
        }
        Prediction::Age(body.age.unwrap_or_default())
      }
      PredictionKind::Gender => {
        let body: GenderBody = self.fetch(kind, name).await?;
        if body.count == 0 {
          return Err(unrecognized);
        }
        Prediction::Gender(body.gender.unwrap_or_default())
      }
      PredictionKind::Nationality => {
        let body: NationalityBody = self.fetch(kind, name).await?;
        if body.count == 0 {
          return Err(unrecognized);
        }
        Prediction::Nationality(most_probable_country(&body.country))
      }
    };

    tracing::debug!(%kind, name, ?prediction, "prediction received");
    Ok(prediction)
  }
}
