//! Gmail dispatch through the Composio action API.
//!
//! `ComposioClient` talks to the Composio backend; `MailDispatcher` wraps a
//! `MailProvider` and folds every failure into a `DispatchOutcome` so callers
//! never have to handle transport errors themselves.

pub mod error;
pub mod response;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use coldreach_core::{AuthOutcome, DispatchOutcome};
use tracing::{debug, error, info};

pub use error::MailError;
use response::{ExecuteResponse, InitiateConnectionResponse};

const DEFAULT_BASE_URL: &str = "https://backend.composio.dev/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const SEND_ACTION: &str = "GMAIL_SEND_EMAIL";
const GMAIL_APP: &str = "gmail";

/// Default connection identity when the caller does not supply one.
pub const DEFAULT_CONNECTION_ID: &str = "default";

/// An email ready for dispatch.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
}

impl OutgoingEmail {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self { to: to.into(), subject: subject.into(), body: body.into(), cc: Vec::new(), bcc: Vec::new() }
    }
}

/// Configuration for the Composio mail client.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl MailConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), base_url: DEFAULT_BASE_URL.to_string(), timeout: DEFAULT_TIMEOUT }
    }

    /// Reads configuration from the `COLDREACH_COMPOSIO_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, MailError> {
        let api_key = std::env::var("COLDREACH_COMPOSIO_API_KEY").map_err(|_| MailError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }
}

/// Mail provider seam.
///
/// `send` returns the provider's opaque acknowledgment payload;
/// `initiate_connection` returns the authorization URL when the provider
/// requires the operator to complete an OAuth flow.
#[async_trait]
pub trait MailProvider: Send + Sync {
    async fn send(&self, email: &OutgoingEmail, connection_id: &str) -> Result<Option<serde_json::Value>, MailError>;

    async fn initiate_connection(&self, connection_id: &str) -> Result<Option<String>, MailError>;
}

/// HTTP client for the Composio action API.
pub struct ComposioClient {
    config: MailConfig,
    client: reqwest::Client,
}

impl ComposioClient {
    pub fn new(config: MailConfig) -> Result<Self, MailError> {
        if config.api_key.trim().is_empty() {
            return Err(MailError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .use_rustls_tls()
            .build()
            .map_err(|e| MailError::Network(Arc::new(e)))?;

        Ok(Self { config, client })
    }

    pub fn from_env() -> Result<Self, MailError> {
        Self::new(MailConfig::from_env()?)
    }

    fn check_status(status: reqwest::StatusCode) -> Result<(), MailError> {
        match status.as_u16() {
            200..=299 => Ok(()),
            400 => Err(MailError::InvalidRequest("provider rejected the request".to_string())),
            401 | 403 => Err(MailError::AuthError),
            429 => Err(MailError::RateLimited),
            code => Err(MailError::HttpError { status: code }),
        }
    }
}

#[async_trait]
impl MailProvider for ComposioClient {
    async fn send(&self, email: &OutgoingEmail, connection_id: &str) -> Result<Option<serde_json::Value>, MailError> {
        let url = format!("{}/v2/actions/{}/execute", self.config.base_url, SEND_ACTION);

        let mut input = serde_json::json!({
            "recipient_email": email.to,
            "subject": email.subject,
            "body": email.body,
        });
        if !email.cc.is_empty() {
            input["cc"] = serde_json::json!(email.cc);
        }
        if !email.bcc.is_empty() {
            input["bcc"] = serde_json::json!(email.bcc);
        }

        debug!(to = %email.to, connection_id, "sending email via provider");

        let response = self
            .client
            .post(&url)
            .header("X-API-Key", &self.config.api_key)
            .json(&serde_json::json!({
                "entityId": connection_id,
                "appName": GMAIL_APP,
                "input": input,
            }))
            .send()
            .await?;

        Self::check_status(response.status())?;

        let ack: ExecuteResponse =
            response.json().await.map_err(|e| MailError::Parse(e.to_string()))?;

        if !ack.successful {
            let detail = ack.error.unwrap_or_else(|| "provider reported failure without detail".to_string());
            return Err(MailError::Provider(detail));
        }

        Ok(ack.data)
    }

    async fn initiate_connection(&self, connection_id: &str) -> Result<Option<String>, MailError> {
        let url = format!("{}/v1/connectedAccounts", self.config.base_url);

        debug!(connection_id, "initiating provider connection");

        let response = self
            .client
            .post(&url)
            .header("X-API-Key", &self.config.api_key)
            .json(&serde_json::json!({
                "appName": GMAIL_APP,
                "entityId": connection_id,
            }))
            .send()
            .await?;

        Self::check_status(response.status())?;

        let ack: InitiateConnectionResponse =
            response.json().await.map_err(|e| MailError::Parse(e.to_string()))?;

        Ok(ack.redirect_url)
    }
}

/// Folds provider results into caller-facing outcomes.
pub struct MailDispatcher {
    provider: Arc<dyn MailProvider>,
}

impl MailDispatcher {
    pub fn new(provider: Arc<dyn MailProvider>) -> Self {
        Self { provider }
    }

    /// Dispatches an email. Never returns an error; provider failures become
    /// a `DispatchOutcome` with `success = false` and a non-empty message.
    pub async fn dispatch(&self, email: &OutgoingEmail, connection_id: &str) -> DispatchOutcome {
        match self.provider.send(email, connection_id).await {
            Ok(data) => {
                info!(to = %email.to, "email dispatched");
                let mut outcome = DispatchOutcome::ok(format!("Email successfully sent to {}", email.to));
                outcome.data = data;
                outcome
            }
            Err(err) => {
                error!(to = %email.to, error = %err, "email dispatch failed");
                DispatchOutcome::failed(format!("Failed to send email: {err}"))
            }
        }
    }

    /// Begins the provider's one-time authorization flow for a connection.
    pub async fn begin_authorization(&self, connection_id: &str) -> AuthOutcome {
        match self.provider.initiate_connection(connection_id).await {
            Ok(Some(redirect_url)) => AuthOutcome {
                success: true,
                message: "Open the authorization URL in a browser to complete Gmail setup".to_string(),
                redirect_url: Some(redirect_url),
                connection_id: connection_id.to_string(),
            },
            Ok(None) => AuthOutcome {
                success: false,
                message: "Provider did not return an authorization URL".to_string(),
                redirect_url: None,
                connection_id: connection_id.to_string(),
            },
            Err(err) => {
                error!(connection_id, error = %err, "authorization setup failed");
                AuthOutcome {
                    success: false,
                    message: format!("Failed to begin Gmail authorization: {err}"),
                    redirect_url: None,
                    connection_id: connection_id.to_string(),
                }
            }
        }
    }
}
