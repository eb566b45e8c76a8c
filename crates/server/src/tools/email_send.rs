//! email_send tool implementation.
//!
//! Dispatches an already-written email through the configured Gmail
//! connection. Provider failures come back as `success = false` outcomes,
//! not protocol errors.

use std::sync::Arc;

use coldreach_client::{DEFAULT_CONNECTION_ID, OutgoingEmail};
use coldreach_core::{DispatchOutcome, Error};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Input parameters for email_send tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmailSendParams {
    /// Recipient email address.
    pub to: String,

    /// Email subject line.
    pub subject: String,

    /// Email body.
    pub body: String,

    /// Additional CC recipients.
    #[serde(default)]
    pub cc: Vec<String>,

    /// Additional BCC recipients.
    #[serde(default)]
    pub bcc: Vec<String>,

    /// Gmail connection identity to send through.
    #[serde(default = "default_connection_id")]
    pub connection_id: String,
}

fn default_connection_id() -> String {
    DEFAULT_CONNECTION_ID.into()
}

/// Implementation of the email_send tool.
pub async fn send_impl(state: &Arc<AppState>, params: EmailSendParams) -> Result<CallToolResult, McpError> {
    let outcome = send_email(state, &params).await?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&outcome).unwrap_or_default(),
    )]))
}

/// Shared dispatch pipeline, also used by the combined generate-and-send tool.
pub(crate) async fn send_email(state: &Arc<AppState>, params: &EmailSendParams) -> Result<DispatchOutcome, Error> {
    let to = params.to.trim();
    if to.is_empty() || !to.contains('@') {
        return Err(Error::InvalidInput(format!("invalid recipient address: {:?}", params.to)));
    }
    if params.subject.trim().is_empty() {
        return Err(Error::InvalidInput("subject cannot be empty".to_string()));
    }

    let mail = state.mail()?;

    let email = OutgoingEmail {
        to: to.to_string(),
        subject: params.subject.clone(),
        body: params.body.clone(),
        cc: params.cc.clone(),
        bcc: params.bcc.clone(),
    };

    Ok(mail.dispatch(&email, &params.connection_id).await)
}
