//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (COLDREACH_*)
//! 2. TOML config file (if COLDREACH_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Browser-like User-Agent the scraper presents; many marketing sites serve
/// stripped-down pages to obvious bots.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (COLDREACH_*)
/// 2. TOML config file (if COLDREACH_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API key for email generation.
    ///
    /// Set via COLDREACH_GEMINI_API_KEY environment variable.
    /// Required only when a generation tool is called.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Composio API key for Gmail dispatch.
    ///
    /// Set via COLDREACH_COMPOSIO_API_KEY environment variable.
    /// Required only when a send or setup tool is called.
    #[serde(default)]
    pub composio_api_key: Option<String>,

    /// Gemini model identifier.
    ///
    /// Set via COLDREACH_GEMINI_MODEL environment variable.
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// User-Agent string for page fetches.
    ///
    /// Set via COLDREACH_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-page HTTP timeout in milliseconds.
    ///
    /// Set via COLDREACH_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Page budget per scraped site.
    ///
    /// Set via COLDREACH_MAX_PAGES environment variable.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Maximum bytes to fetch per page.
    ///
    /// Set via COLDREACH_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Default sender name when a request supplies none.
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Default sender company when a request supplies none.
    #[serde(default = "default_sender_company")]
    pub sender_company: String,

    /// Default sender specialization when a request supplies none.
    #[serde(default = "default_sender_specialization")]
    pub sender_specialization: String,
}

fn default_gemini_model() -> String {
    "gemini-1.5-pro".into()
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_pages() -> usize {
    5
}

fn default_max_bytes() -> usize {
    2_097_152 // 2MB
}

fn default_sender_name() -> String {
    "AI Solutions Inc.".into()
}

fn default_sender_company() -> String {
    "AI Solutions Inc.".into()
}

fn default_sender_specialization() -> String {
    "Custom AI solutions for business optimization and growth".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            composio_api_key: None,
            gemini_model: default_gemini_model(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_pages: default_max_pages(),
            max_bytes: default_max_bytes(),
            sender_name: default_sender_name(),
            sender_company: default_sender_company(),
            sender_specialization: default_sender_specialization(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `COLDREACH_`
    /// 2. TOML file from `COLDREACH_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("COLDREACH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("COLDREACH_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if the Gemini API key is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the Gemini API key is not set.
    pub fn require_gemini_api_key(&self) -> Result<&str, ConfigError> {
        self.gemini_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "gemini_api_key".into(),
            hint: "Set COLDREACH_GEMINI_API_KEY environment variable".into(),
        })
    }

    /// Check if the Composio API key is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the Composio API key is not set.
    pub fn require_composio_api_key(&self) -> Result<&str, ConfigError> {
        self.composio_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "composio_api_key".into(),
            hint: "Set COLDREACH_COMPOSIO_API_KEY environment variable".into(),
        })
    }
}
