//! Logical period selectors for the hotspot file server.

use std::fmt;

use crate::error::SourceError;

/// Which hotspot product a request refers to.
///
/// Each period maps to a fixed directory on the file server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// Rolling 10-minute files; always served as the most recent one.
    TenMinute,
    /// Monthly consolidated files for Brazil.
    Monthly,
    /// Yearly consolidated files.
    Yearly,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::TenMinute, Period::Monthly, Period::Yearly];

    /// Parse a query token: `10min`, `monthly` or `yearly`.
    pub fn parse(token: &str) -> Result<Self, SourceError> {
        match token {
            "10min" => Ok(Period::TenMinute),
            "monthly" => Ok(Period::Monthly),
            "yearly" => Ok(Period::Yearly),
            other => Err(SourceError::InvalidPeriod(other.to_string())),
        }
    }

    /// Parse a token from the legacy Portuguese routes: `10min`, `mensal` or `anual`.
    pub fn parse_legacy(token: &str) -> Result<Self, SourceError> {
        match token {
            "10min" => Ok(Period::TenMinute),
            "mensal" => Ok(Period::Monthly),
            "anual" => Ok(Period::Yearly),
            other => Err(SourceError::InvalidPeriod(other.to_string())),
        }
    }

    /// Query token for this period.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::TenMinute => "10min",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
        }
    }

    /// Whether the listing endpoint serves this period.
    ///
    /// The ten-minute directory is only read internally to pick its newest file.
    pub fn is_listable(&self) -> bool {
        matches!(self, Period::Monthly | Period::Yearly)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
