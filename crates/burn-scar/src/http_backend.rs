//! JSON-over-HTTP client for the analysis backend.
//!
//! Endpoints, relative to the configured base:
//! - `POST image-count` `{region, start, end}` -> `{count}`
//! - `POST burn-scar` `{region, pre: {start, end}, post: {start, end}}` -> `{area, tile_url, geometry}`

use std::time::Duration;

use async_trait::async_trait;
use geojson::Geometry;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::backend::{BurnScarBackend, BurnScarResult};
use crate::error::BackendError;
use crate::window::DateWindow;

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend; `None` disables analysis.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 120,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Serialize)]
struct ImageCountRequest<'a> {
    region: &'a Geometry,
    #[serde(flatten)]
    window: &'a DateWindow,
}

#[derive(Deserialize)]
struct ImageCountResponse {
    count: u64,
}

#[derive(Serialize)]
struct BurnScarRequest<'a> {
    region: &'a Geometry,
    pre: &'a DateWindow,
    post: &'a DateWindow,
}

pub struct HttpBurnScarBackend {
    client: Client,
    base: Url,
    timeout: Duration,
}

impl HttpBurnScarBackend {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, BackendError> {
        // A trailing slash makes `join` append instead of replacing the last segment
        let normalized = if endpoint.ends_with('/') {
            endpoint.to_string()
        } else {
            format!("{}/", endpoint)
        };
        let base = Url::parse(&normalized)
            .map_err(|e| BackendError::Transport(format!("invalid endpoint '{}': {}", endpoint, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base,
            timeout,
        })
    }

    /// Build from config; `Ok(None)` when no endpoint is set.
    pub fn from_config(config: &BackendConfig) -> Result<Option<Self>, BackendError> {
        match config.endpoint.as_deref() {
            Some(endpoint) if !endpoint.trim().is_empty() => {
                Self::new(endpoint.trim(), config.timeout()).map(Some)
            }
            _ => Ok(None),
        }
    }

    pub fn endpoint(&self) -> &str {
        self.base.as_str()
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    fn classify(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout(self.timeout)
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl BurnScarBackend for HttpBurnScarBackend {
    #[instrument(skip(self, region), fields(window = %window))]
    async fn image_count(&self, region: &Geometry, window: &DateWindow) -> Result<u64, BackendError> {
        let response: ImageCountResponse = self
            .post("image-count", &ImageCountRequest { region, window })
            .await?;
        debug!(count = response.count, "Backend image count");
        Ok(response.count)
    }

    #[instrument(skip(self, region), fields(pre = %pre, post = %post))]
    async fn analyze_burn_scar(
        &self,
        region: &Geometry,
        pre: &DateWindow,
        post: &DateWindow,
    ) -> Result<BurnScarResult, BackendError> {
        self.post("burn-scar", &BurnScarRequest { region, pre, post })
            .await
    }
}
