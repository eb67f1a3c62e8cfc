//! Route table and middleware stack.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

/// Build the application router.
///
/// Anything not matched by an API route is served from `static_dir`, with
/// `/` mapping to its `index.html`.
pub fn create_router(
    state: Arc<AppState>,
    prometheus: PrometheusHandle,
    static_dir: impl AsRef<Path>,
) -> Router {
    let static_files = ServeDir::new(static_dir.as_ref()).append_index_html_on_directories(true);

    Router::new()
        // Hotspot files
        .route("/list-files", get(handlers::files::list_files_handler))
        .route("/wildfire-data", get(handlers::files::wildfire_data_handler))
        // Legacy Portuguese-named routes
        .route(
            "/listar-arquivos",
            get(handlers::files::legacy_list_files_handler),
        )
        .route(
            "/dados-queimadas",
            get(handlers::files::legacy_wildfire_data_handler),
        )
        // Burn scar analysis
        .route(
            "/analyze-scars",
            post(handlers::analysis::analyze_scars_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Front end
        .fallback_service(static_files)
        // Middleware
        .layer(Extension(state))
        .layer(Extension(prometheus))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
