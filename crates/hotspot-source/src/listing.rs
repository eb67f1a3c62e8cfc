//! Directory index scraping.

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use scraper::{Html, Selector};
use tracing::{info, instrument, warn};

use crate::config::{HttpConfig, SourceConfig};
use crate::error::{SourceError, SourceResult};
use crate::period::Period;
use crate::remote::RemoteSource;

/// Extract data-file links from an HTML directory index, in page order.
///
/// Only the `href` attribute is considered; link text is ignored.
pub fn parse_index(html: &str, suffix: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").expect("static selector is valid");

    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.ends_with(suffix))
        .map(str::to_string)
        .collect()
}

/// Lists data files in the period directories of the file server.
pub struct DirectoryLister {
    remote: Arc<dyn RemoteSource>,
    source: Arc<SourceConfig>,
    http: Arc<HttpConfig>,
}

impl DirectoryLister {
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        source: Arc<SourceConfig>,
        http: Arc<HttpConfig>,
    ) -> Self {
        Self {
            remote,
            source,
            http,
        }
    }

    /// Files available for a monthly or yearly period, newest first.
    pub async fn list_files(&self, period: Period) -> SourceResult<Vec<String>> {
        if !period.is_listable() {
            return Err(SourceError::InvalidPeriod(period.to_string()));
        }

        let mut files = self.page_order(period).await?;
        files.reverse();
        Ok(files)
    }

    /// Files as they appear on the index page (oldest first on INPE).
    #[instrument(skip(self), fields(period = %period))]
    pub async fn page_order(&self, period: Period) -> SourceResult<Vec<String>> {
        let url = self.source.directory_url(period);
        let started = Instant::now();

        let result = self
            .remote
            .get_text(&url, self.http.listing_timeout())
            .await;
        histogram!("hotspot_upstream_duration_ms", "call" => "listing")
            .record(started.elapsed().as_secs_f64() * 1000.0);

        let html = match result {
            Ok(html) => html,
            Err(source) => {
                warn!(period = %period, url = %url, error = %source, "Failed to list directory");
                counter!("hotspot_listing_requests_total", "period" => period.as_str(), "outcome" => "error")
                    .increment(1);
                return Err(SourceError::ListingUnavailable { period, source });
            }
        };

        let files = parse_index(&html, &self.source.data_suffix);
        counter!("hotspot_listing_requests_total", "period" => period.as_str(), "outcome" => "ok")
            .increment(1);
        info!(period = %period, count = files.len(), "Listed directory");
        Ok(files)
    }
}
