//! Error types for collectors.

use thiserror::Error;

/// Errors that can occur when pulling telemetry from a backend source.
///
/// All of these are contained within a single source's refresh cycle by the
/// engine's poller; none of them propagate past the scheduler boundary.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// HTTP request failed or the endpoint returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Parseable response missing required fields.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Connection to the backend could not be established.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for the backend to respond.
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for CollectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CollectorError::Timeout
        } else if err.is_connect() {
            CollectorError::Connection(err.to_string())
        } else {
            CollectorError::Http(err.to_string())
        }
    }
}
