//! HTTP fetch pipeline for the scraper.
//!
//! One GET per page, browser-like headers, a fixed timeout, and no retries.
//! A non-success status is an error here; the scraper above decides that it
//! merely means "this page contributed nothing".

pub mod url;

use bytes::Bytes;
use reqwest::{Client, StatusCode, Url, header};
use std::time::{Duration, Instant};

pub use url::{domain_name, validate_url};

use coldreach_core::Error;

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string presented to scraped sites.
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 2MB).
    pub max_bytes: usize,

    /// Per-page request timeout (default: 10s).
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5).
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            max_bytes: 2 * 1024 * 1024,
            timeout: Duration::from_millis(10_000),
            max_redirects: 5,
        }
    }
}

/// Response from a single page fetch.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The URL requested.
    pub url: Url,
    /// HTTP status code (always success; non-success is an error).
    pub status: StatusCode,
    /// Response body bytes.
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds.
    pub fetch_ms: u64,
}

/// A capability that can fetch one page.
///
/// The scraper depends on this seam rather than on `FetchClient` directly so
/// its budget and accumulation contracts are testable without a network.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> Result<FetchResponse, Error>;
}

/// HTTP fetch client used for page scraping.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl PageFetcher for FetchClient {
    async fn fetch_page(&self, url: &Url) -> Result<FetchResponse, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.as_str())
            .header(
                header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.5")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::FetchTimeout(format!("timed out fetching {}", url))
                } else {
                    Error::HttpError(format!("network error: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!("status {}", status.as_u16())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::HttpError(format!("failed to read response: {}", e)))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!(
                "{} bytes exceeds {}",
                bytes.len(),
                self.config.max_bytes
            )));
        }

        let fetch_ms = start.elapsed().as_millis() as u64;
        tracing::debug!("fetched {} in {}ms ({} bytes)", url, fetch_ms, bytes.len());

        Ok(FetchResponse { url: url.clone(), status, bytes, fetch_ms })
    }
}
