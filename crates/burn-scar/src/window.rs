//! Month extraction from hotspot filenames and the derived date windows.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Year and month encoded in a hotspot filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl MonthRef {
    /// Parse the trailing `_YYYYMM[.csv]` token of a filename.
    ///
    /// `foco_202403.csv` gives 2024-03. The token must be exactly six ASCII
    /// digits and the month must be in 1..=12.
    pub fn from_filename(filename: &str) -> Result<Self, AnalysisError> {
        let invalid = || AnalysisError::InvalidFilenameFormat(filename.to_string());

        let token = filename.rsplit('_').next().unwrap_or(filename);
        let digits = token.strip_suffix(".csv").unwrap_or(token);

        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = digits[..4].parse().map_err(|_| invalid())?;
        let month: u32 = digits[4..].parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self { year, month })
    }

    /// Same month, one year earlier.
    pub fn previous_year(&self) -> Self {
        Self {
            year: self.year - 1,
            month: self.month,
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The whole calendar month: first day up to the first day of the next month.
    pub fn month(month: MonthRef) -> Option<Self> {
        Some(Self {
            start: month.first_day()?,
            end: month.next().first_day()?,
        })
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Which side of the comparison a window belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    PreFire,
    PostFire,
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowKind::PreFire => f.write_str("pre-fire"),
            WindowKind::PostFire => f.write_str("post-fire"),
        }
    }
}

/// Pre- and post-fire windows for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWindows {
    pub pre: DateWindow,
    pub post: DateWindow,
}

impl AnalysisWindows {
    /// Post-fire is the encoded month, pre-fire the same month a year earlier.
    pub fn for_month(month: MonthRef) -> Option<Self> {
        Some(Self {
            pre: DateWindow::month(month.previous_year())?,
            post: DateWindow::month(month)?,
        })
    }

    /// Windows for a filename, or `InvalidFilenameFormat`.
    pub fn from_filename(filename: &str) -> Result<Self, AnalysisError> {
        let month = MonthRef::from_filename(filename)?;
        Self::for_month(month)
            .ok_or_else(|| AnalysisError::InvalidFilenameFormat(filename.to_string()))
    }

    /// Both windows in the order they are checked.
    pub fn iter(&self) -> [(WindowKind, &DateWindow); 2] {
        [(WindowKind::PreFire, &self.pre), (WindowKind::PostFire, &self.post)]
    }
}
