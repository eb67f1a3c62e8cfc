//! Access to the INPE wildfire hotspot file server.
//!
//! The server exposes plain HTML directory indexes for three products
//! (ten-minute, monthly and yearly CSV files). This crate scrapes those
//! indexes, maps requests onto allow-listed URLs and proxies the files.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod listing;
pub mod period;
pub mod remote;
pub mod resolver;
pub mod service;

pub use config::{ConfigError, HttpConfig, SourceConfig, YearlyPrefix};
pub use error::{FetchError, SourceError, SourceResult};
pub use fetcher::{ProxiedFile, CSV_CONTENT_TYPE};
pub use listing::parse_index;
pub use period::Period;
pub use remote::{HttpRemoteSource, RemoteSource};
pub use resolver::ResolvedUrl;
pub use service::HotspotSource;
