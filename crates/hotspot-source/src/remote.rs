//! Outbound access to the hotspot file server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::HttpConfig;
use crate::error::FetchError;

/// Something that can GET a URL and hand back its body as text.
///
/// The production implementation is [`HttpRemoteSource`]; tests swap in
/// stand-ins that serve canned pages and record every call.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;
}

/// reqwest-backed [`RemoteSource`].
///
/// The client (and with it the identity header and TLS policy) is built once
/// and reused for every request.
pub struct HttpRemoteSource {
    client: Client,
}

impl HttpRemoteSource {
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .connect_timeout(config.listing_timeout())
            .pool_max_idle_per_host(4)
            .tcp_nodelay(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    #[instrument(skip(self), fields(url = %url))]
    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(timeout)
            } else {
                FetchError::Body(e.to_string())
            }
        })?;

        debug!(bytes = body.len(), "Fetched remote body");
        Ok(body)
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout)
    } else if err.is_connect() {
        FetchError::Connect(err.to_string())
    } else if let Some(status) = err.status() {
        FetchError::Status(status.as_u16())
    } else {
        FetchError::Request(err.to_string())
    }
}
