//! HTTP surface tests against the real router with in-process collaborators.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use burn_scar::{AnalysisRelay, BackendError, BurnScarBackend, BurnScarResult, DateWindow};
use geojson::Geometry;
use hotspot_api::{create_router, AppState};
use hotspot_source::{FetchError, HotspotSource, HttpConfig, RemoteSource, SourceConfig};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use test_utils::{directory_index_html, filenames, geometry, hotspot_csv, urls};
use tower::ServiceExt;

/// File server stand-in: canned bodies per URL, every request recorded.
#[derive(Default)]
struct StubRemote {
    pages: HashMap<String, Result<String, FetchError>>,
    calls: Mutex<Vec<String>>,
}

impl StubRemote {
    fn with_page(mut self, url: &str, body: String) -> Self {
        self.pages.insert(url.to_string(), Ok(body));
        self
    }

    fn with_error(mut self, url: &str, err: FetchError) -> Self {
        self.pages.insert(url.to_string(), Err(err));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSource for StubRemote {
    async fn get_text(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)))
    }
}

/// Analysis backend stand-in with one image count for every window.
struct StubBackend {
    count: u64,
    result: Result<BurnScarResult, BackendError>,
    burn_scar_calls: Mutex<usize>,
}

impl StubBackend {
    fn new(count: u64, result: Result<BurnScarResult, BackendError>) -> Self {
        Self {
            count,
            result,
            burn_scar_calls: Mutex::new(0),
        }
    }

    fn burn_scar_calls(&self) -> usize {
        *self.burn_scar_calls.lock().unwrap()
    }
}

#[async_trait]
impl BurnScarBackend for StubBackend {
    async fn image_count(&self, _region: &Geometry, _window: &DateWindow) -> Result<u64, BackendError> {
        Ok(self.count)
    }

    async fn analyze_burn_scar(
        &self,
        _region: &Geometry,
        _pre: &DateWindow,
        _post: &DateWindow,
    ) -> Result<BurnScarResult, BackendError> {
        *self.burn_scar_calls.lock().unwrap() += 1;
        self.result.clone()
    }
}

fn dir(sub: &str) -> String {
    format!("{}{}", urls::BASE, sub)
}

fn scar_result(area: f64) -> BurnScarResult {
    BurnScarResult {
        area,
        tile_url: urls::TILE.to_string(),
        geometry: serde_json::from_str(geometry::SCAR).unwrap(),
    }
}

fn app_with(remote: Arc<StubRemote>, backend: Arc<StubBackend>, static_dir: &std::path::Path) -> Router {
    let source = HotspotSource::new(remote, SourceConfig::default(), HttpConfig::default());
    let state = Arc::new(AppState::new(source, AnalysisRelay::new(backend)));
    let prometheus = PrometheusBuilder::new().build_recorder().handle();
    create_router(state, prometheus, static_dir)
}

fn app(remote: Arc<StubRemote>) -> Router {
    let backend = Arc::new(StubBackend::new(1, Ok(scar_result(1.0))));
    app_with(remote, backend, std::path::Path::new("static"))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    read(response).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Option<String>, String) {
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

fn error_message(body: &str) -> String {
    let value: Value = serde_json::from_str(body).unwrap();
    value["error"].as_str().unwrap().to_string()
}

// ============================================================================
// GET /list-files
// ============================================================================

#[tokio::test]
async fn test_list_files_newest_first() {
    let remote = Arc::new(
        StubRemote::default()
            .with_page(&dir("mensal/Brasil/"), directory_index_html(&["a.csv", "b.csv", "c.csv"])),
    );
    let (status, content_type, body) = get(app(remote), "/list-files?period=monthly").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let files: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(files, vec!["c.csv", "b.csv", "a.csv"]);
}

#[tokio::test]
async fn test_list_files_invalid_period_makes_no_calls() {
    for uri in [
        "/list-files?period=10min",
        "/list-files?period=weekly",
        "/list-files?period=mensal",
        "/list-files",
    ] {
        let remote = Arc::new(StubRemote::default());
        let (status, _, body) = get(app(remote.clone()), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(error_message(&body).starts_with("Invalid period"));
        assert!(remote.calls().is_empty(), "{}", uri);
    }
}

#[tokio::test]
async fn test_list_files_failure_is_generic() {
    let remote = Arc::new(StubRemote::default().with_error(
        &dir("anual/"),
        FetchError::Connect("tcp connect error: 200.18.1.1:443".to_string()),
    ));
    let (status, _, body) = get(app(remote), "/list-files?period=yearly").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(&body), "Could not list files.");
    assert!(!body.contains("200.18.1.1"));
}

// ============================================================================
// GET /wildfire-data
// ============================================================================

#[tokio::test]
async fn test_wildfire_data_monthly() {
    let csv = hotspot_csv(3);
    let remote = Arc::new(
        StubRemote::default().with_page(&dir("mensal/Brasil/focos_mensal_br_202403.csv"), csv.clone()),
    );
    let uri = format!("/wildfire-data?period=monthly&file={}", filenames::MONTHLY_2024_03);
    let (status, content_type, body) = get(app(remote), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/csv; charset=utf-8"));
    assert_eq!(body, csv);
}

#[tokio::test]
async fn test_wildfire_data_ten_minute_picks_latest() {
    let remote = Arc::new(
        StubRemote::default()
            .with_page(
                &dir("10min/"),
                directory_index_html(&[filenames::TEN_MINUTE_1200, filenames::TEN_MINUTE_1210]),
            )
            .with_page(&dir(&format!("10min/{}", filenames::TEN_MINUTE_1210)), hotspot_csv(1)),
    );
    let (status, _, _) = get(app(remote.clone()), "/wildfire-data?period=10min").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        remote.calls(),
        vec![dir("10min/"), dir(&format!("10min/{}", filenames::TEN_MINUTE_1210))]
    );
}

#[tokio::test]
async fn test_wildfire_data_period_defaults_to_ten_minute() {
    let remote = Arc::new(
        StubRemote::default()
            .with_page(&dir("10min/"), directory_index_html(&["x.csv"]))
            .with_page(&dir("10min/x.csv"), hotspot_csv(1)),
    );
    let (status, _, _) = get(app(remote.clone()), "/wildfire-data").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(remote.calls()[0], dir("10min/"));
}

#[tokio::test]
async fn test_wildfire_data_client_errors_are_plain_text() {
    for uri in [
        "/wildfire-data?period=daily",
        "/wildfire-data?period=monthly",
        "/wildfire-data?period=yearly&file=",
        "/wildfire-data?period=monthly&file=..%2F..%2Fetc%2Fpasswd",
    ] {
        let remote = Arc::new(StubRemote::default());
        let (status, content_type, body) = get(app(remote.clone()), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
        assert!(!body.is_empty());
        assert!(remote.calls().is_empty(), "{}", uri);
    }
}

#[tokio::test]
async fn test_wildfire_data_upstream_failures_are_503() {
    let cases = [
        FetchError::Timeout(Duration::from_secs(30)),
        FetchError::Connect("connection refused (os error 111)".to_string()),
        FetchError::Status(500),
    ];
    for err in cases {
        let remote = Arc::new(StubRemote::default().with_error(
            &dir(&format!("anual/{}", filenames::YEARLY_2023)),
            err,
        ));
        let uri = format!("/wildfire-data?period=yearly&file={}", filenames::YEARLY_2023);
        let (status, _, body) = get(app(remote), &uri).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, "Could not fetch data from INPE.");
        assert!(!body.contains("os error"));
    }
}

#[tokio::test]
async fn test_wildfire_data_empty_ten_minute_listing_is_503() {
    let remote = Arc::new(StubRemote::default().with_page(&dir("10min/"), directory_index_html(&[])));
    let (status, _, body) = get(app(remote.clone()), "/wildfire-data?period=10min").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, "Could not fetch data from INPE.");
    assert_eq!(remote.calls().len(), 1);
}

// ============================================================================
// Legacy routes
// ============================================================================

#[tokio::test]
async fn test_legacy_list_route() {
    let remote = Arc::new(
        StubRemote::default().with_page(&dir("anual/"), directory_index_html(&["a.csv", "b.csv"])),
    );
    let (status, _, body) = get(app(remote), "/listar-arquivos?periodo=anual").await;

    assert_eq!(status, StatusCode::OK);
    let files: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(files, vec!["b.csv", "a.csv"]);
}

#[tokio::test]
async fn test_legacy_data_route() {
    let remote = Arc::new(
        StubRemote::default().with_page(&dir("mensal/Brasil/foco_202403.csv"), hotspot_csv(2)),
    );
    let (status, content_type, _) = get(
        app(remote.clone()),
        "/dados-queimadas?periodo=mensal&arquivo=foco_202403.csv",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/csv; charset=utf-8"));

    let (status, _, _) = get(app(remote), "/dados-queimadas?periodo=monthly&arquivo=x.csv").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// POST /analyze-scars
// ============================================================================

fn analysis_body(file: &str) -> String {
    json!({
        "geometry": serde_json::from_str::<Value>(geometry::POLYGON).unwrap(),
        "file": file,
    })
    .to_string()
}

#[tokio::test]
async fn test_analyze_scars_success() {
    let backend = Arc::new(StubBackend::new(4, Ok(scar_result(1234.5678))));
    let app = app_with(Arc::new(StubRemote::default()), backend, std::path::Path::new("static"));

    let (status, _, body) = post_json(app, "/analyze-scars", analysis_body(filenames::FOCO_2024_03)).await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["area_ha"], json!(1234.57));
    assert_eq!(value["tile_url"], urls::TILE);
    assert_eq!(value["scar_geojson"]["type"], "MultiPolygon");
}

#[tokio::test]
async fn test_analyze_scars_no_imagery_is_404() {
    let backend = Arc::new(StubBackend::new(0, Ok(scar_result(1.0))));
    let app = app_with(Arc::new(StubRemote::default()), backend.clone(), std::path::Path::new("static"));

    let (status, _, body) = post_json(app, "/analyze-scars", analysis_body(filenames::FOCO_2024_03)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(error_message(&body).contains("different month or year"));
    assert_eq!(backend.burn_scar_calls(), 0);
}

#[tokio::test]
async fn test_analyze_scars_bad_requests() {
    let cases = [
        analysis_body(filenames::FOCO_BAD),
        analysis_body(filenames::FOCO_YEAR_ONLY),
        json!({ "geometry": serde_json::from_str::<Value>(geometry::POINT).unwrap(), "file": filenames::FOCO_2024_03 }).to_string(),
        json!({ "file": filenames::FOCO_2024_03 }).to_string(),
        json!({ "geometry": serde_json::from_str::<Value>(geometry::POLYGON).unwrap() }).to_string(),
        "{not json".to_string(),
    ];
    for body in cases {
        let backend = Arc::new(StubBackend::new(1, Ok(scar_result(1.0))));
        let app = app_with(Arc::new(StubRemote::default()), backend.clone(), std::path::Path::new("static"));

        let (status, _, response) = post_json(app, "/analyze-scars", body.clone()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
        assert!(!error_message(&response).is_empty());
        assert_eq!(backend.burn_scar_calls(), 0);
    }
}

#[tokio::test]
async fn test_analyze_scars_backend_failure_is_generic() {
    let backend = Arc::new(StubBackend::new(
        2,
        Err(BackendError::Transport("quota exceeded for project demo-123".to_string())),
    ));
    let app = app_with(Arc::new(StubRemote::default()), backend, std::path::Path::new("static"));

    let (status, _, body) = post_json(app, "/analyze-scars", analysis_body(filenames::FOCO_2024_03)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(&body), "Burn scar analysis failed.");
    assert!(!body.contains("demo-123"));
}

// ============================================================================
// Operations and front end
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (status, _, body) = get(app(Arc::new(StubRemote::default())), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (status, content_type, _) = get(app(Arc::new(StubRemote::default())), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/plain"));
}

#[tokio::test]
async fn test_index_served_from_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>mapa</h1>").unwrap();
    let backend = Arc::new(StubBackend::new(1, Ok(scar_result(1.0))));
    let app = app_with(Arc::new(StubRemote::default()), backend, dir.path());

    let (status, content_type, body) = get(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert_eq!(body, "<h1>mapa</h1>");
}
