//! Error types for response generation.

use chat_core::CompletionError;
use thiserror::Error;

/// Outcomes of a failed generation attempt.
///
/// Every failure path of the pipeline yields one of these values; nothing
/// panics or escapes past the [`crate::Responder`] boundary.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The completion credential is not configured. Deployment problem,
    /// never retried automatically.
    #[error("completion credential is not configured")]
    MissingCredential,

    /// No profile exists for the user. Recoverable: the caller should
    /// prompt initialization.
    #[error("no profile for user {0}")]
    UnknownUser(i64),

    /// The remote call failed in a way that may succeed later
    /// (network, timeout, remote status).
    #[error("completion request failed: {0}")]
    Transient(String),

    /// The remote answered with an unexpected shape. A contract violation
    /// on the remote side, not a local bug.
    #[error("completion response malformed: {0}")]
    Malformed(String),
}

impl From<CompletionError> for ResponseError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Configuration(_) => ResponseError::MissingCredential,
            CompletionError::Network(cause) => ResponseError::Transient(cause),
            CompletionError::Status { code, message } => {
                ResponseError::Transient(format!("status {}: {}", code, message))
            }
            CompletionError::Malformed(cause) => ResponseError::Malformed(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_error_classification() {
        assert!(matches!(
            ResponseError::from(CompletionError::Configuration("no key".into())),
            ResponseError::MissingCredential
        ));
        assert!(matches!(
            ResponseError::from(CompletionError::Network("timed out".into())),
            ResponseError::Transient(_)
        ));
        assert!(matches!(
            ResponseError::from(CompletionError::Status {
                code: 502,
                message: "bad gateway".into()
            }),
            ResponseError::Transient(_)
        ));
        assert!(matches!(
            ResponseError::from(CompletionError::Malformed("no choices".into())),
            ResponseError::Malformed(_)
        ));
    }
}
