//! Mapping of (period, filename) requests to file server URLs.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::SourceConfig;
use crate::error::{SourceError, SourceResult};
use crate::listing::DirectoryLister;
use crate::period::Period;

/// A file server URL built from the allow-listed source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub period: Period,
    pub filename: String,
    pub url: String,
}

impl fmt::Display for ResolvedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Reject names that could escape the period directory or alter the URL.
pub fn check_filename(filename: &str) -> SourceResult<()> {
    let unsafe_name = filename == "."
        || filename == ".."
        || filename
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_control());

    if unsafe_name {
        return Err(SourceError::UnsafeFilename(filename.to_string()));
    }
    Ok(())
}

pub struct FileResolver {
    lister: Arc<DirectoryLister>,
    source: Arc<SourceConfig>,
}

impl FileResolver {
    pub fn new(lister: Arc<DirectoryLister>, source: Arc<SourceConfig>) -> Self {
        Self { lister, source }
    }

    /// Resolve a request to a concrete URL.
    ///
    /// Ten-minute requests ignore `filename` and pick the last file in index
    /// page order. Monthly and yearly requests need a filename and never touch
    /// the network.
    pub async fn resolve(&self, period: Period, filename: Option<&str>) -> SourceResult<ResolvedUrl> {
        let filename = match period {
            Period::TenMinute => {
                if filename.is_some_and(|f| !f.is_empty()) {
                    debug!("Ignoring filename for ten-minute request");
                }
                let mut files = self.lister.page_order(period).await?;
                let latest = files.pop().ok_or(SourceError::NoRecentFile)?;
                info!(file = %latest, "Selected most recent ten-minute file");
                latest
            }
            Period::Monthly | Period::Yearly => {
                let name = filename
                    .filter(|f| !f.is_empty())
                    .ok_or(SourceError::MissingFilename(period))?;
                check_filename(name)?;
                name.to_string()
            }
        };

        let url = self.source.file_url(period, &filename);
        Ok(ResolvedUrl {
            period,
            filename,
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_filename_accepts_plain_names() {
        for name in [
            "focos_mensal_br_202403.csv",
            "focos_br_todos-sats_2023.csv",
            "_2023.csv",
            "focos_10min_20240315_1200.csv",
            "focos..csv",
            "focos_2023..2024.csv",
        ] {
            assert!(check_filename(name).is_ok(), "{} should be accepted", name);
        }
    }

    #[test]
    fn test_check_filename_rejects_traversal() {
        for name in [
            "../secret.csv",
            "..",
            ".",
            "a/b.csv",
            "a\\b.csv",
            "a.csv?x=1",
            "a.csv#frag",
            "%2e%2e%2fx.csv",
            "a\nb.csv",
        ] {
            match check_filename(name) {
                Err(SourceError::UnsafeFilename(n)) => assert_eq!(n, name),
                other => panic!("expected UnsafeFilename for {:?}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_resolved_url_display() {
        let resolved = ResolvedUrl {
            period: Period::Monthly,
            filename: "a.csv".to_string(),
            url: "https://example.com/mensal/Brasil/a.csv".to_string(),
        };
        assert_eq!(resolved.to_string(), "https://example.com/mensal/Brasil/a.csv");
    }
}
