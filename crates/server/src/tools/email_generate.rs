//! email_generate tool implementation.
//!
//! Scrapes a company website (or reuses today's cached profile) and generates
//! a personalized cold email without sending it.

use std::sync::Arc;

use coldreach_client::validate_url;
use coldreach_core::{CompanyProfile, Error, SenderProfile};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Input parameters for email_generate tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmailGenerateParams {
    /// The company website to research.
    pub website_url: String,

    /// Override the scraped company name.
    #[serde(default)]
    pub company_name: Option<String>,

    /// Sender identity for the email; server defaults apply to omitted fields.
    #[serde(default)]
    pub sender: Option<SenderProfile>,
}

/// Output structure for email_generate tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmailGenerateOutput {
    /// Generated subject line.
    pub subject: String,
    /// Generated email body.
    pub body: String,
    /// The company profile the email was composed from.
    pub company: CompanyProfile,
}

/// Implementation of the email_generate tool.
pub async fn generate_impl(state: &Arc<AppState>, params: EmailGenerateParams) -> Result<CallToolResult, McpError> {
    let output = generate_email(state, &params).await?;

    state.spawn_cache_sweep();

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}

/// Shared generation pipeline, also used by the combined generate-and-send tool.
pub(crate) async fn generate_email(
    state: &Arc<AppState>,
    params: &EmailGenerateParams,
) -> Result<EmailGenerateOutput, Error> {
    if !validate_url(&params.website_url) {
        return Err(Error::InvalidUrl(format!("invalid website URL: {}", params.website_url)));
    }

    let composer = state.composer()?;

    let profile = state
        .service
        .company_profile(&params.website_url, params.company_name.as_deref())
        .await;

    let mut sender = params.sender.clone().unwrap_or_default();
    let defaults = state.sender();
    if sender.name.is_none() {
        sender.name = defaults.name;
    }
    if sender.company.is_none() {
        sender.company = defaults.company;
    }
    if sender.specialization.is_none() {
        sender.specialization = defaults.specialization;
    }

    let email = composer.compose(profile, &sender).await;

    Ok(EmailGenerateOutput { subject: email.subject, body: email.body, company: email.company })
}
