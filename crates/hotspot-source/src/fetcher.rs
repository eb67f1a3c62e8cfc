//! Proxying of hotspot CSV files.

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{error, info, instrument};

use crate::config::HttpConfig;
use crate::error::{SourceError, SourceResult};
use crate::resolver::ResolvedUrl;
use crate::remote::RemoteSource;

/// Content type every proxied file is served with, whatever the upstream says.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// A fetched file ready to relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxiedFile {
    pub filename: String,
    pub body: String,
    pub content_type: &'static str,
}

pub struct ProxyFetcher {
    remote: Arc<dyn RemoteSource>,
    http: Arc<HttpConfig>,
}

impl ProxyFetcher {
    pub fn new(remote: Arc<dyn RemoteSource>, http: Arc<HttpConfig>) -> Self {
        Self { remote, http }
    }

    #[instrument(skip(self), fields(url = %target))]
    pub async fn fetch(&self, target: &ResolvedUrl) -> SourceResult<ProxiedFile> {
        info!(period = %target.period, url = %target.url, "Fetching hotspot file");
        let started = Instant::now();

        let result = self
            .remote
            .get_text(&target.url, self.http.fetch_timeout())
            .await;
        histogram!("hotspot_upstream_duration_ms", "call" => "fetch")
            .record(started.elapsed().as_secs_f64() * 1000.0);

        match result {
            Ok(body) => {
                counter!("hotspot_fetch_requests_total", "period" => target.period.as_str(), "outcome" => "ok")
                    .increment(1);
                Ok(ProxiedFile {
                    filename: target.filename.clone(),
                    body,
                    content_type: CSV_CONTENT_TYPE,
                })
            }
            Err(source) => {
                error!(url = %target.url, error = %source, "Failed to fetch hotspot file");
                counter!("hotspot_fetch_requests_total", "period" => target.period.as_str(), "outcome" => "error")
                    .increment(1);
                Err(SourceError::UpstreamUnavailable {
                    url: target.url.clone(),
                    source,
                })
            }
        }
    }
}
