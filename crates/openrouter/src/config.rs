//! Configuration for the OpenRouter client.

use std::env;
use std::time::Duration;

use chat_core::CompletionError;

/// Configuration for [`crate::OpenRouterClient`].
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Value for the `HTTP-Referer` attribution header.
    pub referer: String,

    /// Value for the `X-Title` attribution header.
    pub app_title: String,

    /// Response-size ceiling, in tokens.
    pub max_tokens: u32,

    /// Hard timeout for a single completion request.
    pub request_timeout: Duration,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_url: "https://openrouter.ai".to_string(),
            api_key: String::new(),
            referer: "https://github.com/parley-bot/parley".to_string(),
            app_title: "Parley".to_string(),
            max_tokens: 1000,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl OpenRouterConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENROUTER_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `OPENROUTER_API_URL` - API base URL (default: https://openrouter.ai)
    /// - `OPENROUTER_REFERER` - HTTP-Referer header value
    /// - `OPENROUTER_APP_TITLE` - X-Title header value
    /// - `OPENROUTER_MAX_TOKENS` - Response token ceiling (default: 1000)
    /// - `OPENROUTER_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, CompletionError> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| CompletionError::Configuration("OPENROUTER_API_KEY not set".to_string()))?;

        let defaults = Self::default();

        let api_url = env::var("OPENROUTER_API_URL").unwrap_or(defaults.api_url);
        let referer = env::var("OPENROUTER_REFERER").unwrap_or(defaults.referer);
        let app_title = env::var("OPENROUTER_APP_TITLE").unwrap_or(defaults.app_title);

        let max_tokens = env::var("OPENROUTER_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_tokens);

        let request_timeout = env::var("OPENROUTER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Ok(Self {
            api_url,
            api_key,
            referer,
            app_title,
            max_tokens,
            request_timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> OpenRouterConfigBuilder {
        OpenRouterConfigBuilder::default()
    }
}

/// Builder for [`OpenRouterConfig`].
#[derive(Debug, Default)]
pub struct OpenRouterConfigBuilder {
    config: OpenRouterConfig,
}

impl OpenRouterConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the attribution referer.
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.config.referer = referer.into();
        self
    }

    /// Set the attribution title.
    pub fn app_title(mut self, title: impl Into<String>) -> Self {
        self.config.app_title = title.into();
        self
    }

    /// Set the response token ceiling.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = tokens;
        self
    }

    /// Set the request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenRouterConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpenRouterConfig::default();

        assert_eq!(config.api_url, "https://openrouter.ai");
        assert!(config.api_key.is_empty());
        assert_eq!(config.app_title, "Parley");
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_all_options() {
        let config = OpenRouterConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.com")
            .referer("https://example.com")
            .app_title("Test Bot")
            .max_tokens(512)
            .request_timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.api_url, "https://custom.api.com");
        assert_eq!(config.referer, "https://example.com");
        assert_eq!(config.app_title, "Test Bot");
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_openrouter_vars() {
            std::env::remove_var("OPENROUTER_API_KEY");
            std::env::remove_var("OPENROUTER_API_URL");
            std::env::remove_var("OPENROUTER_REFERER");
            std::env::remove_var("OPENROUTER_APP_TITLE");
            std::env::remove_var("OPENROUTER_MAX_TOKENS");
            std::env::remove_var("OPENROUTER_TIMEOUT_SECS");
        }

        // Scenario 1: Missing API key should error
        clear_all_openrouter_vars();
        let result = OpenRouterConfig::from_env();
        match result {
            Err(CompletionError::Configuration(msg)) => {
                assert!(msg.contains("OPENROUTER_API_KEY"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Scenario 2: Only API key set, defaults used
        clear_all_openrouter_vars();
        std::env::set_var("OPENROUTER_API_KEY", "test-env-key");

        let config = OpenRouterConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.api_url, "https://openrouter.ai");
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.request_timeout, Duration::from_secs(30));

        // Scenario 3: All vars set
        clear_all_openrouter_vars();
        std::env::set_var("OPENROUTER_API_KEY", "full-test-key");
        std::env::set_var("OPENROUTER_API_URL", "https://test.api.com");
        std::env::set_var("OPENROUTER_REFERER", "https://my.site");
        std::env::set_var("OPENROUTER_APP_TITLE", "My Bot");
        std::env::set_var("OPENROUTER_MAX_TOKENS", "2048");
        std::env::set_var("OPENROUTER_TIMEOUT_SECS", "10");

        let config = OpenRouterConfig::from_env().unwrap();
        assert_eq!(config.api_key, "full-test-key");
        assert_eq!(config.api_url, "https://test.api.com");
        assert_eq!(config.referer, "https://my.site");
        assert_eq!(config.app_title, "My Bot");
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.request_timeout, Duration::from_secs(10));

        // Cleanup
        clear_all_openrouter_vars();
    }
}
