//! Error types for the lazy image loader.
//!
//! Scanning itself never fails; these only surface while binding to a host.

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum LazyError {
    #[error("Unsupported environment: {api} is not available")]
    UnsupportedEnvironment { api: &'static str },

    #[error("Failed to register listener for '{event}': {reason}")]
    Listener { event: &'static str, reason: String },

    #[error("Host error: {reason}")]
    Host { reason: String },
}

impl LazyError {
    pub fn unsupported(api: &'static str) -> Self {
        Self::UnsupportedEnvironment { api }
    }

    pub fn host(reason: impl Into<String>) -> Self {
        Self::Host { reason: reason.into() }
    }
}
