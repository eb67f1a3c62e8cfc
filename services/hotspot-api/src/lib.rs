//! Queimadas relay HTTP service.
//!
//! Exposes hotspot file listing and proxying plus the burn scar analysis
//! relay over a small JSON/CSV API, and serves a static front end directory.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::RelayConfig;
pub use router::create_router;
pub use state::AppState;
