//! Composio API response types.

use serde::Deserialize;

/// Response payload from an action execution request.
///
/// Composio historically spells the flag "successfull"; accept both spellings.
#[derive(Debug, Deserialize)]
pub struct ExecuteResponse {
    #[serde(default, alias = "successfull")]
    pub successful: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response payload from a connection initiation request.
#[derive(Debug, Deserialize)]
pub struct InitiateConnectionResponse {
    #[serde(default, rename = "redirectUrl")]
    pub redirect_url: Option<String>,
    #[serde(default, rename = "connectedAccountId")]
    pub connected_account_id: Option<String>,
    #[serde(default, rename = "connectionStatus")]
    pub connection_status: Option<String>,
}
