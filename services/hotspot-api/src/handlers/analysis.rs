//! Burn scar analysis handler.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};
use burn_scar::AnalysisResponse;
use serde::Deserialize;
use tracing::warn;

use super::detached;
use crate::error::ApiError;
use crate::state::AppState;

/// Body of `POST /analyze-scars`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// GeoJSON geometry of the region to analyse.
    pub geometry: serde_json::Value,
    /// Monthly hotspot filename carrying the `_YYYYMM` token.
    pub file: String,
}

/// POST /analyze-scars
pub async fn analyze_scars_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected analysis request body");
        ApiError::json(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    let response = detached(async move {
        state
            .relay
            .analyze(request.geometry, &request.file)
            .await
    })
    .await
    .map_err(|e| ApiError::task_failed(e, false))?
    .map_err(ApiError::analysis)?;

    Ok(Json(response))
}
