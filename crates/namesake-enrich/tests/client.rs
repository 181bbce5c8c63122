//! `PredictionClient` and `Enricher` against mock prediction services.

use std::time::Duration;

use namesake_core::Enrichment;
use namesake_enrich::{
  EnrichError, Endpoints, Enricher, Prediction, PredictionClient, PredictionError,
  PredictionKind, Predictor,
};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PredictionClient {
  let endpoints = Endpoints {
    age:         format!("{}/age", server.uri()),
    gender:      format!("{}/gender", server.uri()),
    nationality: format!("{}/nationality", server.uri()),
  };
  PredictionClient::new(endpoints, Duration::from_secs(5)).expect("client")
}

async fn mount(server: &MockServer, route: &str, status: u16, body: serde_json::Value) {
  Mock::given(method("GET"))
    .and(path(route))
    .respond_with(ResponseTemplate::new(status).set_body_json(body))
    .mount(server)
    .await;
}

async fn mount_all_ok(server: &MockServer) {
  mount(server, "/age", 200, json!({"count": 3800, "name": "Dmitriy", "age": 43})).await;
  mount(
    server,
    "/gender",
    200,
    json!({"count": 1094, "name": "Dmitriy", "gender": "male", "probability": 1.0}),
  )
  .await;
  mount(
    server,
    "/nationality",
    200,
    json!({
      "count": 2,
      "name": "Dmitriy",
      "country": [
        {"country_id": "RU", "probability": 0.31},
        {"country_id": "UA", "probability": 0.49},
      ]
    }),
  )
  .await;
}

// ─── PredictionClient ────────────────────────────────────────────────────────

#[tokio::test]
async fn predicts_each_kind() {
  let server = MockServer::start().await;
  mount_all_ok(&server).await;
  let client = client_for(&server);

  assert_eq!(
    client.predict(PredictionKind::Age, "Dmitriy").await.unwrap(),
    Prediction::Age(43)
  );
  assert_eq!(
    client.predict(PredictionKind::Gender, "Dmitriy").await.unwrap(),
    Prediction::Gender("male".into())
  );
  assert_eq!(
    client.predict(PredictionKind::Nationality, "Dmitriy").await.unwrap(),
    Prediction::Nationality("UA".into())
  );
}

#[tokio::test]
async fn name_is_sent_url_encoded() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/age"))
    .and(query_param("name", "Anne Marie&co"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 1, "age": 30})))
    .expect(1)
    .mount(&server)
    .await;

  let prediction = client_for(&server)
    .predict(PredictionKind::Age, "Anne Marie&co")
    .await
    .unwrap();
  assert_eq!(prediction, Prediction::Age(30));
}

#[tokio::test]
async fn zero_count_is_unrecognized_despite_200() {
  let server = MockServer::start().await;
  mount(&server, "/gender", 200, json!({"count": 0, "gender": null, "probability": 0.0}))
    .await;

  let err = client_for(&server)
    .predict(PredictionKind::Gender, "Xyzzy")
    .await
    .unwrap_err();
  assert!(
    matches!(err, PredictionError::NameNotRecognized { kind: PredictionKind::Gender }),
    "{err}"
  );
}

#[tokio::test]
async fn empty_breakdown_with_nonzero_count_is_empty_nationality() {
  let server = MockServer::start().await;
  mount(&server, "/nationality", 200, json!({"count": 12, "country": []})).await;

  let prediction = client_for(&server)
    .predict(PredictionKind::Nationality, "Kim")
    .await
    .unwrap();
  assert_eq!(prediction, Prediction::Nationality(String::new()));
}

#[tokio::test]
async fn non_200_is_upstream_error() {
  let server = MockServer::start().await;
  mount(&server, "/age", 429, json!({"error": "Request limit reached"})).await;

  let err = client_for(&server)
    .predict(PredictionKind::Age, "Dmitriy")
    .await
    .unwrap_err();
  match err {
    PredictionError::Upstream { kind, status } => {
      assert_eq!(kind, PredictionKind::Age);
      assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/age"))
    .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
    .mount(&server)
    .await;

  let err = client_for(&server)
    .predict(PredictionKind::Age, "Dmitriy")
    .await
    .unwrap_err();
  assert!(matches!(err, PredictionError::Decode { kind: PredictionKind::Age, .. }), "{err}");
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
  // Reserve a port, then free it so nothing is listening there.
  let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
  let port = listener.local_addr().unwrap().port();
  drop(listener);

  let endpoints = Endpoints {
    age: format!("http://127.0.0.1:{port}/age"),
    ..Endpoints::default()
  };

  let client = PredictionClient::new(endpoints, Duration::from_secs(2)).unwrap();
  let err = client.predict(PredictionKind::Age, "Dmitriy").await.unwrap_err();
  assert!(matches!(err, PredictionError::Transport { kind: PredictionKind::Age, .. }), "{err}");
}

#[tokio::test]
async fn slow_service_times_out_as_transport_error() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/age"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!({"count": 1, "age": 30}))
        .set_delay(Duration::from_secs(5)),
    )
    .mount(&server)
    .await;

  let endpoints = Endpoints { age: format!("{}/age", server.uri()), ..Endpoints::default() };
  let client = PredictionClient::new(endpoints, Duration::from_millis(200)).unwrap();

  let err = client.predict(PredictionKind::Age, "Dmitriy").await.unwrap_err();
  assert!(matches!(err, PredictionError::Transport { .. }), "{err}");
}

// ─── Enricher over HTTP ──────────────────────────────────────────────────────

#[tokio::test]
async fn enricher_merges_three_services() {
  let server = MockServer::start().await;
  mount_all_ok(&server).await;

  let enrichment = Enricher::new(client_for(&server)).enrich("Dmitriy").await.unwrap();
  assert_eq!(
    enrichment,
    Enrichment { age: 43, gender: "male".into(), nationality: "UA".into() }
  );
}

#[tokio::test]
async fn enricher_fails_when_one_service_errors_and_still_calls_all() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/age"))
    .respond_with(ResponseTemplate::new(500))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/gender"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!({"count": 5, "gender": "female"}))
        .set_delay(Duration::from_millis(200)),
    )
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/nationality"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!({"count": 5, "country": [{"country_id": "GB", "probability": 0.7}]}))
        .set_delay(Duration::from_millis(300)),
    )
    .expect(1)
    .mount(&server)
    .await;

  let err = Enricher::new(client_for(&server)).enrich("Anna").await.unwrap_err();
  match err {
    EnrichError::Prediction(e) => assert_eq!(e.kind(), PredictionKind::Age),
    other => panic!("unexpected error: {other}"),
  }
  server.verify().await;
}
