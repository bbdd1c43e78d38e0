//! HTTP client tests against an in-process API server.
//!
//! A small axum router on `127.0.0.1:0` imitates the readings API so the
//! client's query strings, envelope decoding and error mapping can be
//! checked without the real service.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::{Value, json};
use time::Month;

use climadash_core::{ApiClient, Error, ReadingSource};

#[derive(Clone, Default)]
struct Recorded {
    queries: Arc<Mutex<Vec<String>>>,
}

impl Recorded {
    fn push(&self, query: Option<String>) {
        self.queries
            .lock()
            .unwrap()
            .push(query.unwrap_or_default());
    }

    fn all(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

fn record(id: &str, date: &str, temp: f64) -> Value {
    json!({
        "_id": id,
        "date": date,
        "internalTemperature": temp,
        "externalTemperature": temp - 4.0,
        "internalHumidity": 45.0,
        "externalHumidity": 70.0,
    })
}

async fn temps(State(recorded): State<Recorded>, RawQuery(query): RawQuery) -> Response {
    recorded.push(query);
    axum::Json(json!({
        "data": {
            "count": 31,
            "temps": [
                record("a", "2024-05-01T10:00:00.000Z", 20.0),
                record("b", "2024-05-01T11:00:00.000Z", 21.0),
                { "_id": "broken", "date": "2024-05-01T12:00:00.000Z" },
            ]
        }
    }))
    .into_response()
}

async fn temps_by_date(State(recorded): State<Recorded>, RawQuery(query): RawQuery) -> Response {
    recorded.push(query);
    axum::Json(json!({
        "data": {
            "temps": [
                record("m1", "2024-05-02T08:00:00Z", 10.0),
                record("m2", "2024-05-02T20:00:00Z", 20.0),
            ]
        }
    }))
    .into_response()
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_api() -> (String, Recorded) {
    let recorded = Recorded::default();
    let router = Router::new()
        .route("/temp", get(temps))
        .route("/temp/dates", get(temps_by_date))
        .with_state(recorded.clone());
    (spawn(router).await, recorded)
}

#[tokio::test]
async fn test_fetch_page_sends_limit_and_skip() {
    let (url, recorded) = spawn_api().await;
    let client = ApiClient::new(&url).unwrap();

    client.fetch_page(3, 15).await.unwrap();
    client.fetch_page(1, 15).await.unwrap();

    assert_eq!(recorded.all(), vec!["limit=15&skip=30", "limit=15&skip=0"]);
}

#[tokio::test]
async fn test_fetch_page_decodes_envelope_and_skips_incomplete() {
    let (url, _) = spawn_api().await;
    let client = ApiClient::new(&url).unwrap();

    let page = client.fetch_page(1, 15).await.unwrap();
    assert_eq!(page.total_count, 31);
    assert_eq!(page.readings.len(), 2);
    assert_eq!(page.skipped, 1);
    assert_eq!(page.readings[0].id, "a");
    assert_eq!(page.readings[1].internal_temperature, 21.0);
}

#[tokio::test]
async fn test_mistyped_record_is_skipped_not_fatal() {
    let router = Router::new().route(
        "/temp",
        get(|| async {
            let mut mistyped = record("c", "2024-05-01T12:00:00.000Z", 22.0);
            mistyped["internalTemperature"] = json!("21.5");
            let mut numeric_id = record("d", "2024-05-01T13:00:00.000Z", 23.0);
            numeric_id["_id"] = json!(42);
            axum::Json(json!({
                "data": {
                    "count": 3,
                    "temps": [record("a", "2024-05-01T10:00:00.000Z", 20.0), mistyped, numeric_id]
                }
            }))
        }),
    );
    let url = spawn(router).await;
    let client = ApiClient::new(&url).unwrap();

    let page = client.fetch_page(1, 15).await.unwrap();
    assert_eq!(page.readings.len(), 1);
    assert_eq!(page.readings[0].id, "a");
    assert_eq!(page.skipped, 2);
    assert_eq!(page.total_count, 3);
}

#[tokio::test]
async fn test_fetch_month_sends_one_based_month() {
    let (url, recorded) = spawn_api().await;
    let client = ApiClient::new(&url).unwrap();

    let readings = client.fetch_month(Month::May, 2024).await.unwrap();
    assert_eq!(readings.len(), 2);
    assert_eq!(recorded.all(), vec!["month=5&year=2024"]);
}

#[tokio::test]
async fn test_trait_object_dispatch() {
    let (url, _) = spawn_api().await;
    let client = ApiClient::new(&format!("{url}/temp/")).unwrap();
    let source: &dyn ReadingSource = &client;

    assert_eq!(source.describe(), url);
    assert_eq!(source.fetch_page(1, 15).await.unwrap().readings.len(), 2);
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let router = Router::new().route(
        "/temp",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(json!({ "error": "database offline" })),
            )
        }),
    );
    let url = spawn(router).await;
    let client = ApiClient::new(&url).unwrap();

    let err = client.fetch_page(1, 15).await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database offline");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_error_body_uses_status_text() {
    let router = Router::new().route(
        "/temp/dates",
        get(|| async { (StatusCode::NOT_FOUND, "nope") }),
    );
    let url = spawn(router).await;
    let client = ApiClient::new(&url).unwrap();

    let err = client.fetch_month(Month::January, 2024).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let router = Router::new().route(
        "/temp",
        get(|| async { axum::Json(json!({ "rows": [] })) }),
    );
    let url = spawn(router).await;
    let client = ApiClient::new(&url).unwrap();

    let err = client.fetch_page(1, 15).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_unreachable_server() {
    // Bind and drop to get a port with nothing listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{addr}")).unwrap();
    let err = client.fetch_page(1, 15).await.unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(err, Error::NotReachable { .. }));
}
