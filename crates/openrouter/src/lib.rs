//! OpenRouter chat-completion client.
//!
//! This crate implements [`chat_core::CompletionBackend`] against the
//! OpenRouter chat-completions endpoint. It performs exactly one HTTP
//! request per completion call; retry policy belongs to the caller.

mod api_types;
mod client;
mod config;

pub use api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, Choice, ResponseMessage, Usage,
};
pub use client::OpenRouterClient;
pub use config::OpenRouterConfig;

// Re-export the backend trait so client code needs only this crate.
pub use chat_core::{ChatMessage, CompletionBackend, CompletionError, CompletionParams, Role};
