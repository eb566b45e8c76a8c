//! gmail_setup tool implementation.
//!
//! Begins the one-time Gmail authorization flow for a connection identity
//! and returns the URL the operator must open to complete it.

use std::sync::Arc;

use coldreach_client::DEFAULT_CONNECTION_ID;
use coldreach_core::{AuthOutcome, Error};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Input parameters for gmail_setup tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GmailSetupParams {
    /// Connection identity to register the Gmail account under.
    #[serde(default = "default_connection_id")]
    pub connection_id: String,
}

fn default_connection_id() -> String {
    DEFAULT_CONNECTION_ID.into()
}

/// Implementation of the gmail_setup tool.
pub async fn setup_impl(state: &Arc<AppState>, params: GmailSetupParams) -> Result<CallToolResult, McpError> {
    let outcome = setup_gmail(state, &params).await?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&outcome).unwrap_or_default(),
    )]))
}

pub(crate) async fn setup_gmail(state: &Arc<AppState>, params: &GmailSetupParams) -> Result<AuthOutcome, Error> {
    let connection_id = params.connection_id.trim();
    if connection_id.is_empty() {
        return Err(Error::InvalidInput("connection_id cannot be empty".to_string()));
    }

    let mail = state.mail()?;
    Ok(mail.begin_authorization(connection_id).await)
}
