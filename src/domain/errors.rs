//! Domain Errors
//!
//! Failures reported by the outbound ports. Adapters translate their
//! client-specific errors into these before they reach the application.

/// Counter store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store rejected the call or could not be reached.
    #[error("counter store request failed: {0}")]
    Backend(String),
    /// The store answered but without a usable post-increment value.
    #[error("counter store returned malformed response: {0}")]
    MalformedResponse(String),
}

/// Metrics sink failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    #[error("metrics sink request failed: {0}")]
    Backend(String),
}
