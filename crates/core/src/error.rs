//! Unified error types for coldreach.
//!
//! Per-page scrape failures and generation failures are absorbed inside the
//! pipeline and never reach this enum; it covers only the errors allowed to
//! cross the tool boundary.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the coldreach server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty recipient address).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Invalid or malformed website URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response while fetching a page.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Page fetch timed out.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response exceeded the byte cap.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// A required capability is not configured (missing API key).
    #[error("CONFIG_ERROR: {0}")]
    Config(String),

    /// Unexpected internal failure. Details are logged, never returned.
    #[error("INTERNAL_ERROR: {0}")]
    Internal(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::InvalidUrl(msg) => (-32003, msg.clone()),
            Error::HttpError(msg) => (-32008, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::FetchTooLarge(msg) => (-32007, msg.clone()),
            Error::Config(msg) => (-32010, msg.clone()),
            Error::Internal(_) => (-32603, "an unexpected error occurred".to_string()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
