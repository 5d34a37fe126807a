//! OpenRouter client implementation.

use chat_core::{
    async_trait, ChatMessage, CompletionBackend, CompletionError, CompletionParams,
};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse};
use crate::config::OpenRouterConfig;

/// A completion backend that talks to the OpenRouter chat-completions API.
///
/// The client is stateless: all per-user state (history, settings) lives
/// with the caller, which passes the finished message list per request.
pub struct OpenRouterClient {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OpenRouterConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                CompletionError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!(
            "OpenRouterClient initialized (api: {}, max_tokens: {}, timeout: {:?})",
            config.api_url, config.max_tokens, config.request_timeout
        );

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`OpenRouterConfig::from_env`] for the variables involved.
    pub fn from_env() -> Result<Self, CompletionError> {
        let config = OpenRouterConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }

    /// Make a chat completion request.
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CompletionError> {
        let url = format!("{}/api/v1/chat/completions", self.config.api_url);

        debug!(
            "Sending completion request (model: {}, messages: {})",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.app_title)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Network(format!(
                        "request timed out after {:?}",
                        self.config.request_timeout
                    ))
                } else {
                    CompletionError::Network(format!("Failed to send request: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Prefer the structured error message when the body parses
            let message = serde_json::from_str::<ApiError>(&error_text)
                .map(|api_error| api_error.error.message)
                .unwrap_or(error_text);

            return Err(CompletionError::Status {
                code: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            CompletionError::Malformed(format!("Failed to parse response: {}", e))
        })?;

        Ok(completion)
    }
}

#[async_trait]
impl CompletionBackend for OpenRouterClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        params: &CompletionParams,
    ) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: params.model.clone(),
            messages,
            temperature: params.temperature,
            max_tokens: self.config.max_tokens,
        };

        let completion = self.chat_completion(request).await?;

        let reply = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                warn!("completion response carried no message content");
                CompletionError::Malformed("no completion content in response".to_string())
            })?;

        if let Some(usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(reply)
    }

    fn has_credential(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    fn name(&self) -> &str {
        "OpenRouter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_credential() {
        let with_key = OpenRouterClient::new(
            OpenRouterConfig::builder().api_key("test-key").build(),
        )
        .unwrap();
        assert!(with_key.has_credential());

        let without_key = OpenRouterClient::new(OpenRouterConfig::default()).unwrap();
        assert!(!without_key.has_credential());
    }

    #[test]
    fn test_client_name() {
        let client = OpenRouterClient::new(OpenRouterConfig::default()).unwrap();
        assert_eq!(client.name(), "OpenRouter");
    }
}
