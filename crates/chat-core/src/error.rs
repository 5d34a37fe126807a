//! Error types for completion calls.

use thiserror::Error;

/// Errors that can occur while requesting a completion.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The backend is misconfigured (missing credential, bad client setup).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never produced a usable response (connect failure, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The remote service answered with a non-success status.
    #[error("remote service error ({code}): {message}")]
    Status { code: u16, message: String },

    /// The response body did not match the expected completion shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}
