//! High-level entry point combining listing, resolution and fetching.

use std::sync::Arc;

use crate::config::{HttpConfig, SourceConfig};
use crate::error::SourceResult;
use crate::fetcher::{ProxiedFile, ProxyFetcher};
use crate::listing::DirectoryLister;
use crate::period::Period;
use crate::remote::{HttpRemoteSource, RemoteSource};
use crate::resolver::{FileResolver, ResolvedUrl};

/// Hotspot file server access as used by the HTTP handlers.
///
/// Holds no per-request state; one instance is shared by all requests.
pub struct HotspotSource {
    lister: Arc<DirectoryLister>,
    resolver: FileResolver,
    fetcher: ProxyFetcher,
}

impl HotspotSource {
    pub fn new(remote: Arc<dyn RemoteSource>, source: SourceConfig, http: HttpConfig) -> Self {
        let source = Arc::new(source);
        let http = Arc::new(http);

        let lister = Arc::new(DirectoryLister::new(
            Arc::clone(&remote),
            Arc::clone(&source),
            Arc::clone(&http),
        ));
        let resolver = FileResolver::new(Arc::clone(&lister), source);
        let fetcher = ProxyFetcher::new(remote, http);

        Self {
            lister,
            resolver,
            fetcher,
        }
    }

    /// Build against the real file server using a reqwest client.
    pub fn connect(source: SourceConfig, http: HttpConfig) -> Result<Self, reqwest::Error> {
        let remote = Arc::new(HttpRemoteSource::new(&http)?);
        Ok(Self::new(remote, source, http))
    }

    pub async fn list_files(&self, period: Period) -> SourceResult<Vec<String>> {
        self.lister.list_files(period).await
    }

    pub async fn resolve(&self, period: Period, filename: Option<&str>) -> SourceResult<ResolvedUrl> {
        self.resolver.resolve(period, filename).await
    }

    /// Resolve and fetch in sequence; the fetch only starts once resolution
    /// (including any ten-minute listing) has finished.
    pub async fn fetch_file(&self, period: Period, filename: Option<&str>) -> SourceResult<ProxiedFile> {
        let target = self.resolve(period, filename).await?;
        self.fetcher.fetch(&target).await
    }
}
