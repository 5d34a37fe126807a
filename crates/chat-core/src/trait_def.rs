//! The completion backend trait.

use async_trait::async_trait;

use crate::error::CompletionError;
use crate::message::{ChatMessage, CompletionParams};

/// A remote model that turns an ordered message list into a reply.
///
/// Implementations perform exactly one request per `complete` call; retry
/// policy belongs to the caller.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Request a completion for the given messages and settings.
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        params: &CompletionParams,
    ) -> Result<String, CompletionError>;

    /// Whether the backend holds a usable API credential.
    ///
    /// Callers check this before building a prompt so a missing credential
    /// fails fast without touching any store.
    fn has_credential(&self) -> bool;

    /// Backend name for logging.
    fn name(&self) -> &str;
}
