//! Burn scar analysis error types.

use std::time::Duration;

use thiserror::Error;

use crate::window::{DateWindow, WindowKind};

/// Failure talking to the analysis backend.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("analysis backend is not configured")]
    NotConfigured,

    #[error("backend request timed out after {0:?}")]
    Timeout(Duration),

    #[error("backend transport error: {0}")]
    Transport(String),

    #[error("backend returned HTTP {0}")]
    Status(u16),

    #[error("could not decode backend response: {0}")]
    Decode(String),
}

/// Errors that can occur while relaying an analysis request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Filename does not end in a `_YYYYMM` token.
    #[error("Invalid filename format: {0}")]
    InvalidFilenameFormat(String),

    /// Posted geometry is not a GeoJSON Polygon/MultiPolygon.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The backend found no usable images for one of the windows.
    #[error("No cloud-free imagery for the {kind} window {window}; try a different month or year")]
    NoImageryForPeriod { kind: WindowKind, window: DateWindow },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl AnalysisError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AnalysisError::InvalidFilenameFormat(_) => 400,
            AnalysisError::InvalidGeometry(_) => 400,
            AnalysisError::NoImageryForPeriod { .. } => 404,
            AnalysisError::Backend(_) => 500,
        }
    }

    /// Message safe to show to the caller.
    ///
    /// Backend failures collapse to a fixed text; their detail is only logged.
    pub fn public_message(&self) -> String {
        match self {
            AnalysisError::Backend(_) => "Burn scar analysis failed.".to_string(),
            other => other.to_string(),
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidFilenameFormat(_) => "invalid_filename",
            AnalysisError::InvalidGeometry(_) => "invalid_geometry",
            AnalysisError::NoImageryForPeriod { .. } => "no_imagery",
            AnalysisError::Backend(_) => "backend_error",
        }
    }
}
