//! Burn scar analysis relay.
//!
//! Derives pre- and post-fire date windows from a monthly hotspot filename,
//! validates the analysis region and forwards the work to a remote
//! geospatial backend.

pub mod backend;
pub mod error;
pub mod http_backend;
pub mod relay;
pub mod window;

pub use backend::{BurnScarBackend, BurnScarResult, UnconfiguredBackend};
pub use error::{AnalysisError, BackendError};
pub use http_backend::{BackendConfig, HttpBurnScarBackend};
pub use relay::{parse_region, round_hectares, AnalysisRelay, AnalysisResponse};
pub use window::{AnalysisWindows, DateWindow, MonthRef, WindowKind};
