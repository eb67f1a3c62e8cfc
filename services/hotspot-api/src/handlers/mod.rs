//! HTTP request handlers for the relay service.
//!
//! - `files`: hotspot file listing and proxying, plus the legacy routes
//! - `analysis`: burn scar analysis
//! - `health`: health check and Prometheus metrics

pub mod analysis;
pub mod files;
pub mod health;

use std::future::Future;

use tokio::task::JoinError;

/// Run an operation on its own task.
///
/// A client disconnect drops the handler future but not the spawned task, so
/// outbound calls already issued run to completion or timeout.
pub(crate) async fn detached<F, T>(operation: F) -> Result<T, JoinError>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(operation).await
}
