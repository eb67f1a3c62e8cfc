//! Error types for hotspot file listing and fetching.

use std::time::Duration;

use thiserror::Error;

use crate::period::Period;

/// Result type alias using SourceError.
pub type SourceResult<T> = Result<T, SourceError>;

/// Failure of a single outbound request to the file server.
///
/// Never shown to HTTP callers; these are logged and wrapped in a
/// [`SourceError`] whose public message is generic.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Errors raised while resolving, listing or proxying hotspot files.
#[derive(Debug, Error)]
pub enum SourceError {
    // === Validation (raised before any outbound call) ===
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Missing filename for {0} period")]
    MissingFilename(Period),

    #[error("Unsafe filename: {0}")]
    UnsafeFilename(String),

    // === Upstream ===
    #[error("Could not list {period} directory: {source}")]
    ListingUnavailable {
        period: Period,
        #[source]
        source: FetchError,
    },

    #[error("No recent file found in the ten-minute directory")]
    NoRecentFile,

    #[error("Upstream unavailable for {url}: {source}")]
    UpstreamUnavailable {
        url: String,
        #[source]
        source: FetchError,
    },
}

impl SourceError {
    /// True for errors caused by the request itself rather than the upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SourceError::InvalidPeriod(_)
                | SourceError::MissingFilename(_)
                | SourceError::UnsafeFilename(_)
        )
    }

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceError::InvalidPeriod(_) => "invalid_period",
            SourceError::MissingFilename(_) => "missing_filename",
            SourceError::UnsafeFilename(_) => "unsafe_filename",
            SourceError::ListingUnavailable { .. } => "listing_unavailable",
            SourceError::NoRecentFile => "no_recent_file",
            SourceError::UpstreamUnavailable { .. } => "upstream_unavailable",
        }
    }
}
