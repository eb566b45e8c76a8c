//! Gemini API client error types.

use std::sync::Arc;

/// Errors from the Gemini text-generation client.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// Missing API key.
    #[error("missing API key: COLDREACH_GEMINI_API_KEY not set")]
    MissingApiKey,

    /// Empty prompt.
    #[error("empty prompt")]
    EmptyPrompt,

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by the Gemini API.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),

    /// The model returned no usable text (safety block or empty candidates).
    #[error("empty response from model")]
    EmptyResponse,
}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { GeminiError::Timeout } else { GeminiError::Network(Arc::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeminiError::MissingApiKey;
        assert!(err.to_string().contains("API key"));

        let err = GeminiError::HttpError { status: 500 };
        assert!(err.to_string().contains("500"));
    }
}
