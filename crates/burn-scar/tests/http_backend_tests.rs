//! HTTP backend client against a local mock server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use burn_scar::{BackendError, BurnScarBackend, DateWindow, HttpBurnScarBackend, MonthRef};
use geojson::Geometry;
use serde_json::{json, Value};
use test_utils::{assert_approx_eq, geometry, urls};

type Seen = Arc<Mutex<Vec<(String, Value)>>>;

async fn image_count(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
    seen.lock().unwrap().push(("image-count".to_string(), body));
    Json(json!({ "count": 7 }))
}

async fn burn_scar(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
    seen.lock().unwrap().push(("burn-scar".to_string(), body));
    Json(json!({
        "area": 42.125,
        "tile_url": urls::TILE,
        "geometry": serde_json::from_str::<Value>(geometry::SCAR).unwrap(),
    }))
}

/// Start a mock backend under `/api` and return its base URL.
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn region() -> Geometry {
    serde_json::from_str(geometry::POLYGON).unwrap()
}

fn march_2024() -> DateWindow {
    DateWindow::month(MonthRef { year: 2024, month: 3 }).unwrap()
}

fn march_2023() -> DateWindow {
    DateWindow::month(MonthRef { year: 2023, month: 3 }).unwrap()
}

// ============================================================================
// Wire contract
// ============================================================================

#[tokio::test]
async fn test_image_count_request() {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route("/api/image-count", post(image_count))
        .with_state(seen.clone());
    let base = spawn_backend(router).await;

    let backend = HttpBurnScarBackend::new(&base, Duration::from_secs(5)).unwrap();
    let count = backend.image_count(&region(), &march_2024()).await.unwrap();

    assert_eq!(count, 7);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (path, body) = &seen[0];
    assert_eq!(path, "image-count");
    assert_eq!(body["start"], "2024-03-01");
    assert_eq!(body["end"], "2024-04-01");
    assert_eq!(body["region"]["type"], "Polygon");
}

#[tokio::test]
async fn test_burn_scar_request() {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route("/api/burn-scar", post(burn_scar))
        .with_state(seen.clone());
    let base = spawn_backend(router).await;

    let backend = HttpBurnScarBackend::new(&base, Duration::from_secs(5)).unwrap();
    let result = backend
        .analyze_burn_scar(&region(), &march_2023(), &march_2024())
        .await
        .unwrap();

    assert_approx_eq!(result.area, 42.125, 1e-9);
    assert_eq!(result.tile_url, urls::TILE);
    assert_eq!(result.geometry["type"], "MultiPolygon");

    let seen = seen.lock().unwrap();
    let (_, body) = &seen[0];
    assert_eq!(body["pre"]["start"], "2023-03-01");
    assert_eq!(body["post"]["end"], "2024-04-01");
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_non_success_status() {
    let router = Router::new().route(
        "/api/image-count",
        post(|| async { (StatusCode::BAD_GATEWAY, "quota exceeded") }),
    );
    let base = spawn_backend(router).await;

    let backend = HttpBurnScarBackend::new(&base, Duration::from_secs(5)).unwrap();
    let err = backend.image_count(&region(), &march_2024()).await.unwrap_err();

    assert!(matches!(err, BackendError::Status(502)));
}

#[tokio::test]
async fn test_undecodable_body() {
    let router = Router::new().route(
        "/api/image-count",
        post(|| async { Json(json!({ "images": "many" })) }),
    );
    let base = spawn_backend(router).await;

    let backend = HttpBurnScarBackend::new(&base, Duration::from_secs(5)).unwrap();
    let err = backend.image_count(&region(), &march_2024()).await.unwrap_err();

    assert!(matches!(err, BackendError::Decode(_)));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let router = Router::new().route(
        "/api/image-count",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "count": 1 }))
        }),
    );
    let base = spawn_backend(router).await;

    let backend = HttpBurnScarBackend::new(&base, Duration::from_millis(200)).unwrap();
    let err = backend.image_count(&region(), &march_2024()).await.unwrap_err();

    assert!(matches!(err, BackendError::Timeout(_)));
}

#[tokio::test]
async fn test_unreachable_backend() {
    let backend = HttpBurnScarBackend::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
    let err = backend.image_count(&region(), &march_2024()).await.unwrap_err();

    assert!(matches!(err, BackendError::Transport(_) | BackendError::Timeout(_)));
}
