//! Authenticated access to *Arr-style REST APIs.

mod client;
mod probe;

pub use client::ArrClient;
pub use probe::poll_until;

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors from a single API call.
///
/// These are never fatal to a run; callers log them and treat the call as
/// having produced no data.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("request timeout")]
    Timeout,
}

/// One *Arr service endpoint (`/api/v3`, `X-Api-Key` auth).
///
/// The configurator and driver work against this trait so tests can swap in
/// an in-memory double.
#[async_trait]
pub trait ArrApi: Send + Sync {
    /// Service name for logging.
    fn name(&self) -> &str;

    async fn get(&self, endpoint: &str) -> Result<Value, ApiError>;

    async fn post(&self, endpoint: &str, body: &Value) -> Result<Value, ApiError>;

    async fn put(&self, endpoint: &str, body: &Value) -> Result<Value, ApiError>;

    /// Poll the status endpoint until the service answers or `timeout`
    /// elapses. Returns whether the service became ready.
    async fn wait_for_ready(&self, timeout: Duration) -> bool;
}
