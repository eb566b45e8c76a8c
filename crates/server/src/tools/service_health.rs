//! service_health tool implementation.
//!
//! Reports which capabilities are configured and how many profiles are
//! cached. Makes no network requests.

use std::sync::Arc;

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Output structure for service_health tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ServiceHealthOutput {
    /// Always "ok" when the server is able to answer.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Whether email generation is configured.
    pub generation_configured: bool,
    /// Whether email sending is configured.
    pub dispatch_configured: bool,
    /// Number of company profiles currently cached.
    pub cached_profiles: usize,
}

/// Implementation of the service_health tool.
pub async fn health_impl(state: &Arc<AppState>) -> Result<CallToolResult, McpError> {
    let output = health(state);

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}

pub(crate) fn health(state: &Arc<AppState>) -> ServiceHealthOutput {
    ServiceHealthOutput {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        generation_configured: state.generation_configured(),
        dispatch_configured: state.dispatch_configured(),
        cached_profiles: state.cache_entries(),
    }
}
