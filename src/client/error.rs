//! Error types for dashboard fetches.

use thiserror::Error;

/// Errors that can occur while fetching an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Request timeout
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Connection failed (refused, DNS, TLS, reset)
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Non-success HTTP status
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Body did not have the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Transport failures: the service could not be reached or refused the request.
    pub fn is_transport(&self) -> bool {
        !matches!(self, FetchError::Malformed(_))
    }

    /// Short label used for log fields and counters.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Timeout(_) => "timeout",
            FetchError::ConnectionFailed(_) => "connection",
            FetchError::HttpError(_) => "http",
            FetchError::Malformed(_) => "malformed",
        }
    }
}
