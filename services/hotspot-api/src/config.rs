//! Relay configuration loading.

use std::path::Path;

use anyhow::{Context, Result};
use burn_scar::BackendConfig;
use hotspot_source::{HttpConfig, SourceConfig};
use serde::{Deserialize, Serialize};

/// Process-wide configuration, read once at startup.
///
/// Every section is defaulted, so an empty or partial YAML file is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// File server layout.
    pub source: SourceConfig,

    /// Outbound HTTP policy for the file server.
    pub http: HttpConfig,

    /// Burn scar analysis backend.
    pub backend: BackendConfig,
}

impl RelayConfig {
    /// Load and validate a YAML file.
    ///
    /// A missing file falls back to the defaults; an unreadable or malformed
    /// one is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file does not exist, using defaults"
            );
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            base_url = %config.source.base_url,
            backend = config.backend.endpoint.as_deref().unwrap_or("none"),
            "Loaded relay config"
        );
        Ok(config)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes as null rather than an empty map
        if content.trim().is_empty() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }

        let config: Self = serde_yaml::from_str(content).context("Failed to parse YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.source.validate()?;
        self.http.validate()?;
        if self.backend.timeout_secs == 0 {
            anyhow::bail!("backend.timeout_secs must be greater than zero");
        }
        Ok(())
    }
}
