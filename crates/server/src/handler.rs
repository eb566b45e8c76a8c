//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

use crate::state::AppState;
use crate::tools::email_generate::{EmailGenerateParams, generate_impl};
use crate::tools::email_generate_send::{EmailGenerateSendParams, generate_send_impl};
use crate::tools::email_send::{EmailSendParams, send_impl};
use crate::tools::gmail_setup::{GmailSetupParams, setup_impl};
use crate::tools::service_health::health_impl;

/// The main MCP server handler for coldreach.
#[derive(Clone)]
pub struct ColdreachServer {
    state: Arc<AppState>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl ColdreachServer {
    /// Create a new server handler over shared state.
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state, tool_router: Self::tool_router() }
    }

    #[tool(
        description = "Research a company website and generate a personalized cold email. Returns the subject, body, and the company profile used."
    )]
    async fn email_generate(&self, params: Parameters<EmailGenerateParams>) -> Result<CallToolResult, McpError> {
        generate_impl(&self.state, params.0).await
    }

    #[tool(
        description = "Send an already-written email through the configured Gmail connection. Returns a dispatch outcome, never a protocol error for provider failures."
    )]
    async fn email_send(&self, params: Parameters<EmailSendParams>) -> Result<CallToolResult, McpError> {
        send_impl(&self.state, params.0).await
    }

    #[tool(
        description = "Research a company website, generate a personalized cold email, and send it in one call. The outcome embeds the subject and company profile."
    )]
    async fn email_generate_send(
        &self, params: Parameters<EmailGenerateSendParams>,
    ) -> Result<CallToolResult, McpError> {
        generate_send_impl(&self.state, params.0).await
    }

    #[tool(description = "Begin the one-time Gmail authorization flow. Returns the URL to open in a browser.")]
    async fn gmail_setup(&self, params: Parameters<GmailSetupParams>) -> Result<CallToolResult, McpError> {
        setup_impl(&self.state, params.0).await
    }

    #[tool(description = "Report configured capabilities and cache size. Makes no network requests.")]
    async fn service_health(&self) -> Result<CallToolResult, McpError> {
        health_impl(&self.state).await
    }
}

impl ServerHandler for ColdreachServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "coldreach".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
