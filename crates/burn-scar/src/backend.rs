//! Capability interface of the remote geospatial analysis backend.

use async_trait::async_trait;
use geojson::Geometry;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::window::DateWindow;

/// Raw result of a burn scar computation, as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnScarResult {
    /// Burned area in hectares, unrounded.
    pub area: f64,
    /// XYZ tile URL template for the difference image.
    pub tile_url: String,
    /// Dissolved scar outline, passed through untouched.
    pub geometry: serde_json::Value,
}

/// Remote service that selects imagery and computes burn scars.
///
/// Cloud masking, compositing, burn-ratio differencing, thresholding and
/// vectorization all happen behind this trait.
#[async_trait]
pub trait BurnScarBackend: Send + Sync {
    /// Number of usable images over `region` within `window`.
    async fn image_count(&self, region: &Geometry, window: &DateWindow) -> Result<u64, BackendError>;

    /// Burn scar between the `pre` and `post` composites over `region`.
    async fn analyze_burn_scar(
        &self,
        region: &Geometry,
        pre: &DateWindow,
        post: &DateWindow,
    ) -> Result<BurnScarResult, BackendError>;
}

/// Stand-in used when no backend endpoint is configured.
///
/// Every call fails with [`BackendError::NotConfigured`], so the service can
/// still proxy hotspot files.
pub struct UnconfiguredBackend;

#[async_trait]
impl BurnScarBackend for UnconfiguredBackend {
    async fn image_count(&self, _region: &Geometry, _window: &DateWindow) -> Result<u64, BackendError> {
        Err(BackendError::NotConfigured)
    }

    async fn analyze_burn_scar(
        &self,
        _region: &Geometry,
        _pre: &DateWindow,
        _post: &DateWindow,
    ) -> Result<BurnScarResult, BackendError> {
        Err(BackendError::NotConfigured)
    }
}
