//! Validation and pass-through of burn scar analysis requests.

use std::sync::Arc;

use geojson::{Geometry, Value};
use metrics::counter;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::backend::BurnScarBackend;
use crate::error::{AnalysisError, BackendError};
use crate::window::AnalysisWindows;

/// Response republished to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResponse {
    /// Burned area in hectares, rounded to 2 decimal places.
    pub area_ha: f64,
    pub tile_url: String,
    pub scar_geojson: serde_json::Value,
}

/// Round a hectare value to 2 decimal places.
pub fn round_hectares(area: f64) -> f64 {
    (area * 100.0).round() / 100.0
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Accept a GeoJSON Polygon or MultiPolygon with at least one closed ring.
pub fn parse_region(geometry: serde_json::Value) -> Result<Geometry, AnalysisError> {
    let geometry: Geometry = serde_json::from_value(geometry)
        .map_err(|e| AnalysisError::InvalidGeometry(e.to_string()))?;

    // (positions in ring, shortest position) per ring
    let rings: Vec<(usize, usize)> = match &geometry.value {
        Value::Polygon(polygon) => polygon
            .iter()
            .map(|ring| (ring.len(), ring.iter().map(|p| p.len()).min().unwrap_or(0)))
            .collect(),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .flatten()
            .map(|ring| (ring.len(), ring.iter().map(|p| p.len()).min().unwrap_or(0)))
            .collect(),
        other => {
            return Err(AnalysisError::InvalidGeometry(format!(
                "expected Polygon or MultiPolygon, got {}",
                type_name(other)
            )))
        }
    };

    if rings.is_empty() {
        return Err(AnalysisError::InvalidGeometry("polygon has no rings".to_string()));
    }
    for (positions, dims) in rings {
        if positions < 4 {
            return Err(AnalysisError::InvalidGeometry(
                "polygon ring needs at least 4 positions".to_string(),
            ));
        }
        if dims < 2 {
            return Err(AnalysisError::InvalidGeometry(
                "position needs longitude and latitude".to_string(),
            ));
        }
    }

    Ok(geometry)
}

/// Forwards validated analysis requests to a [`BurnScarBackend`].
pub struct AnalysisRelay {
    backend: Arc<dyn BurnScarBackend>,
}

impl AnalysisRelay {
    pub fn new(backend: Arc<dyn BurnScarBackend>) -> Self {
        Self { backend }
    }

    /// Run one analysis.
    ///
    /// The filename and geometry are validated before the backend is contacted,
    /// and both windows must have imagery before the burn scar is requested.
    #[instrument(skip(self, geometry))]
    pub async fn analyze(
        &self,
        geometry: serde_json::Value,
        filename: &str,
    ) -> Result<AnalysisResponse, AnalysisError> {
        let result = self.run(geometry, filename).await;
        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        counter!("burn_scar_analyses_total", "outcome" => outcome).increment(1);
        result
    }

    async fn run(
        &self,
        geometry: serde_json::Value,
        filename: &str,
    ) -> Result<AnalysisResponse, AnalysisError> {
        let windows = AnalysisWindows::from_filename(filename)?;
        let region = parse_region(geometry)?;

        for (kind, window) in windows.iter() {
            let count = self
                .backend
                .image_count(&region, window)
                .await
                .map_err(|e| {
                    error!(error = %e, window = %window, "Image count failed");
                    e
                })?;

            if count == 0 {
                warn!(window = %window, kind = %kind, "No imagery for window");
                return Err(AnalysisError::NoImageryForPeriod {
                    kind,
                    window: *window,
                });
            }
            info!(window = %window, kind = %kind, images = count, "Imagery available");
        }

        let result = self
            .backend
            .analyze_burn_scar(&region, &windows.pre, &windows.post)
            .await
            .map_err(|e| {
                error!(error = %e, "Burn scar computation failed");
                e
            })?;

        let area_ha = round_hectares(result.area);
        if !area_ha.is_finite() {
            error!(area = result.area, "Backend returned an unusable area");
            return Err(BackendError::Decode(format!("unusable area {}", result.area)).into());
        }
        info!(area_ha = area_ha, "Burn scar analysis complete");

        Ok(AnalysisResponse {
            area_ha,
            tile_url: result.tile_url,
            scar_geojson: result.geometry,
        })
    }
}
