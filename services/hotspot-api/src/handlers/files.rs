//! Hotspot file listing and proxying handlers.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use hotspot_source::{Period, SourceResult};
use serde::Deserialize;
use tracing::debug;

use super::detached;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListFilesQuery {
    pub period: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WildfireDataQuery {
    pub period: Option<String>,
    pub file: Option<String>,
}

/// Query of `/listar-arquivos`.
#[derive(Debug, Deserialize)]
pub struct LegacyListQuery {
    pub periodo: Option<String>,
}

/// Query of `/dados-queimadas`.
#[derive(Debug, Deserialize)]
pub struct LegacyDataQuery {
    pub periodo: Option<String>,
    pub arquivo: Option<String>,
}

/// GET /list-files?period={monthly|yearly}
pub async fn list_files_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let period = Period::parse(query.period.as_deref().unwrap_or_default());
    list_files(state, period).await
}

/// GET /listar-arquivos?periodo={mensal|anual}
pub async fn legacy_list_files_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<LegacyListQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let period = Period::parse_legacy(query.periodo.as_deref().unwrap_or_default());
    list_files(state, period).await
}

/// GET /wildfire-data?period={10min|monthly|yearly}&file={name}
pub async fn wildfire_data_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<WildfireDataQuery>,
) -> Result<Response, ApiError> {
    let period = match query.period.as_deref() {
        Some(token) => Period::parse(token),
        None => Ok(Period::TenMinute),
    };
    fetch_file(state, period, query.file).await
}

/// GET /dados-queimadas?periodo={10min|mensal|anual}&arquivo={name}
pub async fn legacy_wildfire_data_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<LegacyDataQuery>,
) -> Result<Response, ApiError> {
    let period = match query.periodo.as_deref() {
        Some(token) => Period::parse_legacy(token),
        None => Ok(Period::TenMinute),
    };
    fetch_file(state, period, query.arquivo).await
}

async fn list_files(
    state: Arc<AppState>,
    period: SourceResult<Period>,
) -> Result<Json<Vec<String>>, ApiError> {
    let period = period.map_err(ApiError::listing)?;

    let files = detached(async move { state.source.list_files(period).await })
        .await
        .map_err(|e| ApiError::task_failed(e, false))?
        .map_err(ApiError::listing)?;

    debug!(period = %period, count = files.len(), "Listed hotspot files");
    Ok(Json(files))
}

async fn fetch_file(
    state: Arc<AppState>,
    period: SourceResult<Period>,
    filename: Option<String>,
) -> Result<Response, ApiError> {
    let period = period.map_err(ApiError::fetch)?;

    let file = detached(async move { state.source.fetch_file(period, filename.as_deref()).await })
        .await
        .map_err(|e| ApiError::task_failed(e, true))?
        .map_err(ApiError::fetch)?;

    debug!(period = %period, file = %file.filename, bytes = file.body.len(), "Proxied hotspot file");
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, file.content_type)],
        file.body,
    )
        .into_response())
}
