//! Application state for the relay service.

use std::sync::Arc;

use anyhow::{Context, Result};
use burn_scar::{AnalysisRelay, BurnScarBackend, HttpBurnScarBackend, UnconfiguredBackend};
use hotspot_source::HotspotSource;
use tracing::{info, warn};

use crate::config::RelayConfig;

/// Shared application state.
///
/// Built once at startup and read-only afterwards.
pub struct AppState {
    /// Hotspot file listing and proxying.
    pub source: HotspotSource,

    /// Burn scar analysis relay.
    pub relay: AnalysisRelay,
}

impl AppState {
    pub fn new(source: HotspotSource, relay: AnalysisRelay) -> Self {
        Self { source, relay }
    }

    /// Create the state against the real file server and backend.
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let source = HotspotSource::connect(config.source.clone(), config.http.clone())
            .context("Failed to build HTTP client for the hotspot file server")?;

        let backend: Arc<dyn BurnScarBackend> =
            match HttpBurnScarBackend::from_config(&config.backend)
                .context("Failed to configure burn scar backend")?
            {
                Some(backend) => {
                    info!(endpoint = backend.endpoint(), "Using burn scar backend");
                    Arc::new(backend)
                }
                None => {
                    warn!("No burn scar backend configured, analysis requests will fail");
                    Arc::new(UnconfiguredBackend)
                }
            };

        Ok(Self::new(source, AnalysisRelay::new(backend)))
    }
}
