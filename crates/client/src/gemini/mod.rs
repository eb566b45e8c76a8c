//! Gemini text-generation client.
//!
//! Provides a client for the Gemini `generateContent` REST API with request
//! validation and response normalization.
//!
//! ### Specification
//!
//! - **Endpoint**: `https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent`
//! - **Authentication**: `x-goog-api-key` header.
//! - **Normalization**: The nested candidates/parts response collapses into a
//!   single text string; safety blocks and empty candidate lists surface as
//!   `GeminiError::EmptyResponse`.

pub mod error;
pub mod request;
pub mod response;

pub use error::GeminiError;
pub use request::GenerateRequest;
pub use response::GenerateResponse;

use std::time::{Duration, Instant};

/// Default base URL for the Gemini API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model identifier.
const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// Default request timeout. Generation is slow; page-fetch timeouts do not
/// apply here.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Gemini API client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key from COLDREACH_GEMINI_API_KEY.
    pub api_key: String,
    /// Model identifier (default: gemini-1.5-pro).
    pub model: String,
    /// Base URL (default: https://generativelanguage.googleapis.com/v1beta).
    pub base_url: String,
    /// Request timeout (default: 60s).
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeminiConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads COLDREACH_GEMINI_API_KEY from environment. Returns error if not set.
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = std::env::var("COLDREACH_GEMINI_API_KEY").map_err(|_| GeminiError::MissingApiKey)?;

        Ok(Self { api_key, ..Default::default() })
    }
}

/// A capability that turns a prompt into generated text.
///
/// The email composer depends on this seam so its fallback contract is
/// testable with stub generators.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GeminiError>;
}

/// Gemini REST API client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        if config.api_key.is_empty() {
            return Err(GeminiError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeminiError::Network(std::sync::Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Create a new Gemini client from environment variables.
    pub fn from_env() -> Result<Self, GeminiError> {
        Self::new(GeminiConfig::from_env()?)
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    /// Execute one generation call. A single request, no internal retry;
    /// callers needing resilience retry at a higher layer.
    async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        if prompt.trim().is_empty() {
            return Err(GeminiError::EmptyPrompt);
        }

        let start = Instant::now();
        let url = format!("{}/models/{}:generateContent", self.config.base_url, self.config.model);

        tracing::debug!("calling Gemini model {}", self.config.model);

        let http_response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(GeminiError::from)?;

        let status = http_response.status();
        tracing::debug!("Gemini API response status: {}", status);

        if status == 401 || status == 403 {
            return Err(GeminiError::AuthError);
        }

        if status == 429 {
            return Err(GeminiError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(GeminiError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await.map_err(GeminiError::from)?;
        let api_response: GenerateResponse =
            serde_json::from_slice(&bytes).map_err(|e| GeminiError::Parse(e.to_string()))?;

        let text = api_response.text().ok_or(GeminiError::EmptyResponse)?;

        tracing::debug!("generation completed in {:?} ({} chars)", start.elapsed(), text.len());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_client_new_missing_key() {
        let config = GeminiConfig::default();
        let result = GeminiClient::new(config);
        assert!(matches!(result, Err(GeminiError::MissingApiKey)));
    }

    #[test]
    fn test_client_new_with_key() {
        let config = GeminiConfig { api_key: "test-key".into(), ..Default::default() };
        assert!(GeminiClient::new(config).is_ok());
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_prompt() {
        let config = GeminiConfig { api_key: "test-key".into(), ..Default::default() };
        let client = GeminiClient::new(config).unwrap();

        let result = client.generate("   ").await;
        assert!(matches!(result, Err(GeminiError::EmptyPrompt)));
    }
}
