//! Core trait and types for completion backends.
//!
//! This crate provides the shared interface between the Parley response
//! pipeline and whatever remote model actually generates replies. It defines:
//!
//! - [`CompletionBackend`] - The trait a completion client must implement
//! - [`ChatMessage`] / [`Role`] - The ordered message list sent to the model
//! - [`CompletionParams`] - Per-request model settings taken from a profile
//! - [`CompletionError`] - Error types for completion calls
//!
//! # Example
//!
//! ```rust
//! use chat_core::{async_trait, ChatMessage, CompletionBackend, CompletionError, CompletionParams};
//!
//! struct CannedBackend;
//!
//! #[async_trait]
//! impl CompletionBackend for CannedBackend {
//!     async fn complete(
//!         &self,
//!         _messages: Vec<ChatMessage>,
//!         _params: &CompletionParams,
//!     ) -> Result<String, CompletionError> {
//!         Ok("Hello!".to_string())
//!     }
//!
//!     fn has_credential(&self) -> bool {
//!         true
//!     }
//!
//!     fn name(&self) -> &str {
//!         "CannedBackend"
//!     }
//! }
//! ```

mod error;
mod message;
mod trait_def;

pub use error::CompletionError;
pub use message::{ChatMessage, CompletionParams, Role};
pub use trait_def::CompletionBackend;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
