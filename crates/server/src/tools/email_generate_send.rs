//! email_generate_send tool implementation.
//!
//! Combined pipeline: research the company, generate the email, then send
//! it. The dispatch outcome carries the generated subject and the company
//! profile so callers can audit what went out.

use std::sync::Arc;

use coldreach_client::DEFAULT_CONNECTION_ID;
use coldreach_core::{DispatchOutcome, Error, SenderProfile};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::tools::email_generate::{EmailGenerateParams, generate_email};
use crate::tools::email_send::{EmailSendParams, send_email};

/// Input parameters for email_generate_send tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmailGenerateSendParams {
    /// The company website to research.
    pub website_url: String,

    /// Recipient email address.
    pub to: String,

    /// Additional CC recipients.
    #[serde(default)]
    pub cc: Vec<String>,

    /// Additional BCC recipients.
    #[serde(default)]
    pub bcc: Vec<String>,

    /// Override the scraped company name.
    #[serde(default)]
    pub company_name: Option<String>,

    /// Sender identity for the email; server defaults apply to omitted fields.
    #[serde(default)]
    pub sender: Option<SenderProfile>,

    /// Gmail connection identity to send through.
    #[serde(default = "default_connection_id")]
    pub connection_id: String,
}

fn default_connection_id() -> String {
    DEFAULT_CONNECTION_ID.into()
}

/// Implementation of the email_generate_send tool.
pub async fn generate_send_impl(
    state: &Arc<AppState>, params: EmailGenerateSendParams,
) -> Result<CallToolResult, McpError> {
    let outcome = generate_and_send(state, &params).await?;

    state.spawn_cache_sweep();

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&outcome).unwrap_or_default(),
    )]))
}

pub(crate) async fn generate_and_send(
    state: &Arc<AppState>, params: &EmailGenerateSendParams,
) -> Result<DispatchOutcome, Error> {
    let generated = generate_email(
        state,
        &EmailGenerateParams {
            website_url: params.website_url.clone(),
            company_name: params.company_name.clone(),
            sender: params.sender.clone(),
        },
    )
    .await?;

    let mut outcome = send_email(
        state,
        &EmailSendParams {
            to: params.to.clone(),
            subject: generated.subject.clone(),
            body: generated.body.clone(),
            cc: params.cc.clone(),
            bcc: params.bcc.clone(),
            connection_id: params.connection_id.clone(),
        },
    )
    .await?;

    // Fold pipeline context into the provider payload.
    let mut data = serde_json::Map::new();
    if let Some(provider_data) = outcome.data.take() {
        data.insert("provider".to_string(), provider_data);
    }
    data.insert("subject".to_string(), serde_json::json!(generated.subject));
    data.insert(
        "company".to_string(),
        serde_json::to_value(&generated.company).unwrap_or(serde_json::Value::Null),
    );
    outcome.data = Some(serde_json::Value::Object(data));

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use coldreach_client::{
        FALLBACK_BODY, GeminiError, MailError, MailProvider, OutgoingEmail, ProfileSource, TextGenerator,
    };
    use coldreach_core::{AppConfig, CompanyProfile};

    use super::*;

    struct NamedSource;

    #[async_trait]
    impl ProfileSource for NamedSource {
        async fn scrape(&self, _base_url: &str) -> CompanyProfile {
            CompanyProfile { name: "Acme Robotics".to_string(), ..Default::default() }
        }
    }

    struct FixedGenerator;

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GeminiError> {
            Ok("Subject: Helping Acme scale\n\nHi team,\nShort pitch.".to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GeminiError> {
            Err(GeminiError::Timeout)
        }
    }

    struct RecordingProvider {
        sent: std::sync::Mutex<Vec<OutgoingEmail>>,
    }

    impl RecordingProvider {
        fn new() -> Self {
            Self { sent: std::sync::Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl MailProvider for RecordingProvider {
        async fn send(
            &self, email: &OutgoingEmail, _connection_id: &str,
        ) -> Result<Option<serde_json::Value>, MailError> {
            self.sent.lock().unwrap().push(email.clone());
            Ok(Some(serde_json::json!({"id": "msg-9"})))
        }

        async fn initiate_connection(&self, _connection_id: &str) -> Result<Option<String>, MailError> {
            Ok(None)
        }
    }

    fn full_state(generator: Arc<dyn TextGenerator>, provider: Arc<dyn MailProvider>) -> Arc<AppState> {
        Arc::new(AppState::with_parts(AppConfig::default(), Arc::new(NamedSource), Some(generator), Some(provider)))
    }

    fn params() -> EmailGenerateSendParams {
        EmailGenerateSendParams {
            website_url: "https://acme.example.com".into(),
            to: "a@b.com".into(),
            cc: Vec::new(),
            bcc: Vec::new(),
            company_name: None,
            sender: None,
            connection_id: default_connection_id(),
        }
    }

    #[tokio::test]
    async fn test_pipeline_embeds_subject_and_company() {
        let state = full_state(Arc::new(FixedGenerator), Arc::new(RecordingProvider::new()));

        let outcome = generate_and_send(&state, &params()).await.unwrap();

        assert!(outcome.success);
        let data = outcome.data.unwrap();
        assert_eq!(data["subject"], "Helping Acme scale");
        assert_eq!(data["company"]["name"], "Acme Robotics");
        assert_eq!(data["provider"]["id"], "msg-9");
    }

    #[tokio::test]
    async fn test_pipeline_sends_generated_email() {
        let provider = Arc::new(RecordingProvider::new());
        let state = full_state(Arc::new(FixedGenerator), provider.clone());

        generate_and_send(&state, &params()).await.unwrap();

        let sent = provider.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@b.com");
        assert_eq!(sent[0].subject, "Helping Acme scale");
        assert_eq!(sent[0].body, "Hi team,\nShort pitch.");
    }

    #[tokio::test]
    async fn test_pipeline_forwards_cc_and_bcc() {
        let provider = Arc::new(RecordingProvider::new());
        let state = full_state(Arc::new(FixedGenerator), provider.clone());
        let mut with_copies = params();
        with_copies.cc = vec!["cc@b.com".into()];
        with_copies.bcc = vec!["bcc1@b.com".into(), "bcc2@b.com".into()];

        generate_and_send(&state, &with_copies).await.unwrap();

        let sent = provider.sent.lock().unwrap();
        assert_eq!(sent[0].cc, vec!["cc@b.com"]);
        assert_eq!(sent[0].bcc, vec!["bcc1@b.com", "bcc2@b.com"]);
    }

    #[tokio::test]
    async fn test_pipeline_sends_fallback_when_generation_fails() {
        let provider = Arc::new(RecordingProvider::new());
        let state = full_state(Arc::new(FailingGenerator), provider.clone());

        let outcome = generate_and_send(&state, &params()).await.unwrap();
        assert!(outcome.success);

        let sent = provider.sent.lock().unwrap();
        assert_eq!(sent[0].subject, "AI Solutions for Acme Robotics");
        assert_eq!(sent[0].body, FALLBACK_BODY);
    }

    #[tokio::test]
    async fn test_pipeline_rejects_invalid_url_before_sending() {
        let provider = Arc::new(RecordingProvider::new());
        let state = full_state(Arc::new(FixedGenerator), provider.clone());
        let mut bad = params();
        bad.website_url = "ftp://acme.example.com".into();

        let result = generate_and_send(&state, &bad).await;
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
        assert!(provider.sent.lock().unwrap().is_empty());
    }
}
