//! Mail provider client error types.

use std::sync::Arc;

/// Errors from the Composio mail client.
///
/// These never cross the dispatch boundary directly; `MailDispatcher` folds
/// them into a `DispatchOutcome` with `success = false`.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// Missing API key.
    #[error("missing API key: COLDREACH_COMPOSIO_API_KEY not set")]
    MissingApiKey,

    /// Invalid recipient or request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by the provider.
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

    /// The provider acknowledged the request but reported a failure.
    #[error("provider error: {0}")]
    Provider(String),
}

impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { MailError::Timeout } else { MailError::Network(Arc::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MailError::Provider("mailbox unavailable".to_string());
        assert!(err.to_string().contains("mailbox unavailable"));
    }
}
