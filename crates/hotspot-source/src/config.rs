//! Source table and outbound HTTP policy.
//!
//! Both structs are built once at startup and shared read-only afterwards.
//! Every field has a default matching the live INPE server, so an empty or
//! partial YAML section is valid.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::period::Period;

/// Known literal some deployments put in front of yearly filenames.
pub const BRASIL_TODOS_SATS_PREFIX: &str = "Brasil_todos_sats";

/// Configuration validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Invalid sub-path for {period}: '{path}' ({message})")]
    InvalidSubPath {
        period: Period,
        path: String,
        message: &'static str,
    },

    #[error("Data file suffix must not be empty")]
    EmptySuffix,

    #[error("Timeout for {0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// How yearly filenames are turned into a path segment.
///
/// Two server layouts have been observed; which one is current is not
/// settled, so both stay selectable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "literal", rename_all = "snake_case")]
pub enum YearlyPrefix {
    /// `anual/{filename}`
    #[default]
    None,
    /// `anual/{literal}{filename}`
    Fixed(String),
}

impl YearlyPrefix {
    pub fn as_str(&self) -> &str {
        match self {
            YearlyPrefix::None => "",
            YearlyPrefix::Fixed(literal) => literal,
        }
    }
}

/// Allow-listed layout of the hotspot file server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL all directories hang off. Must end in `/`.
    pub base_url: String,
    pub ten_minute_path: String,
    pub monthly_path: String,
    pub yearly_path: String,
    pub yearly_prefix: YearlyPrefix,
    /// Suffix an anchor `href` must carry to count as a data file.
    pub data_suffix: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dataserver-coids.inpe.br/queimadas/queimadas/focos/csv/".to_string(),
            ten_minute_path: "10min/".to_string(),
            monthly_path: "mensal/Brasil/".to_string(),
            yearly_path: "anual/".to_string(),
            yearly_prefix: YearlyPrefix::None,
            data_suffix: ".csv".to_string(),
        }
    }
}

impl SourceConfig {
    /// Sub-path for a period, relative to `base_url`.
    pub fn sub_path(&self, period: Period) -> &str {
        match period {
            Period::TenMinute => &self.ten_minute_path,
            Period::Monthly => &self.monthly_path,
            Period::Yearly => &self.yearly_path,
        }
    }

    /// URL of the directory index page for a period.
    pub fn directory_url(&self, period: Period) -> String {
        format!("{}{}", self.base_url, self.sub_path(period))
    }

    /// URL of a file inside a period's directory.
    ///
    /// The yearly prefix applies to caller-supplied yearly names only;
    /// ten-minute names come straight from the index page.
    pub fn file_url(&self, period: Period, filename: &str) -> String {
        let prefix = match period {
            Period::Yearly => self.yearly_prefix.as_str(),
            _ => "",
        };
        format!("{}{}{}", self.directory_url(period), prefix, filename)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            message: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if !self.base_url.ends_with('/') {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                message: "must end with '/'".to_string(),
            });
        }

        for period in Period::ALL {
            let path = self.sub_path(period);
            let message = if path.is_empty() || !path.ends_with('/') {
                Some("must be non-empty and end with '/'")
            } else if path.starts_with('/') {
                Some("must be relative")
            } else if path.split('/').any(|segment| segment == "..") {
                Some("must not contain '..'")
            } else {
                None
            };
            if let Some(message) = message {
                return Err(ConfigError::InvalidSubPath {
                    period,
                    path: path.to_string(),
                    message,
                });
            }
        }

        if self.data_suffix.is_empty() {
            return Err(ConfigError::EmptySuffix);
        }
        Ok(())
    }
}

/// Outbound HTTP policy shared by every request to the file server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub listing_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
    /// The INPE host serves an irregular certificate chain; verification
    /// stays off unless a deployment explicitly turns it back on.
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            listing_timeout_secs: 15,
            fetch_timeout_secs: 30,
            accept_invalid_certs: true,
        }
    }
}

impl HttpConfig {
    pub fn listing_timeout(&self) -> Duration {
        Duration::from_secs(self.listing_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listing_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("listing"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("fetch"));
        }
        Ok(())
    }
}
