//! Mapping of relay errors onto HTTP responses.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use burn_scar::AnalysisError;
use hotspot_source::SourceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Shown when a directory listing fails.
pub const LISTING_FAILED: &str = "Could not list files.";

/// Shown when a hotspot file cannot be fetched.
pub const FETCH_FAILED: &str = "Could not fetch data from INPE.";

/// Shown when a detached task dies before producing a result.
pub const INTERNAL_ERROR: &str = "Internal server error.";

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Error response of a handler.
///
/// JSON routes answer `{"error": ...}`, the CSV route answers plain text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Json { status: StatusCode, message: String },

    #[error("{message}")]
    Text { status: StatusCode, message: String },
}

impl ApiError {
    pub fn json(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::Json {
            status,
            message: message.into(),
        }
    }

    pub fn text(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::Text {
            status,
            message: message.into(),
        }
    }

    /// Listing route: validation failures are 400, anything upstream is a generic 500.
    pub fn listing(err: SourceError) -> Self {
        if err.is_client_error() {
            Self::json(StatusCode::BAD_REQUEST, err.to_string())
        } else {
            Self::json(StatusCode::INTERNAL_SERVER_ERROR, LISTING_FAILED)
        }
    }

    /// File route: validation failures are 400, anything upstream is a generic 503.
    pub fn fetch(err: SourceError) -> Self {
        if err.is_client_error() {
            Self::text(StatusCode::BAD_REQUEST, err.to_string())
        } else {
            Self::text(StatusCode::SERVICE_UNAVAILABLE, FETCH_FAILED)
        }
    }

    pub fn analysis(err: AnalysisError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::json(status, err.public_message())
    }

    /// A detached operation panicked or was cancelled.
    pub fn task_failed(err: tokio::task::JoinError, as_text: bool) -> Self {
        error!(error = %err, "Request task failed");
        if as_text {
            Self::text(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        } else {
            Self::json(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Json { status, .. } | ApiError::Text { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Json { status, message } => {
                (status, Json(ErrorBody { error: &message })).into_response()
            }
            ApiError::Text { status, message } => (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                message,
            )
                .into_response(),
        }
    }
}
