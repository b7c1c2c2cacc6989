//! The MCP side of the bridge.
//!
//! [`NlwebBridge`] implements [`ServerHandler`]: each MCP operation maps to one
//! handler that builds a backend request, forwards it, and shapes the answer
//! into the MCP result type. The handlers never return protocol errors.

pub mod discovery;
pub mod invoke;

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, GetPromptRequestParams, GetPromptResult, Implementation,
    JsonObject, ListPromptsResult, ListToolsResult, PaginatedRequestParams, Prompt,
    ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};

use crate::config::BridgeConfig;
use crate::rpc::BackendForwarder;
use crate::truncate::Truncator;

/// Forwards MCP tool and prompt operations to an NLWeb backend.
///
/// Holds no per-request state; clones share the same HTTP client.
#[derive(Debug, Clone)]
pub struct NlwebBridge {
    forwarder: Arc<BackendForwarder>,
    truncator: Truncator,
}

impl NlwebBridge {
    pub fn new(forwarder: Arc<BackendForwarder>, truncator: Truncator) -> Self {
        Self {
            forwarder,
            truncator,
        }
    }

    /// Build the forwarder and truncator from configuration.
    pub fn from_config(config: &BridgeConfig) -> anyhow::Result<Self> {
        let forwarder = BackendForwarder::new(&config.backend)?;
        Ok(Self::new(
            Arc::new(forwarder),
            Truncator::new(config.limits.max_tool_output),
        ))
    }

    pub fn forwarder(&self) -> &BackendForwarder {
        &self.forwarder
    }

    /// Tools advertised by the backend, or the fallback tool.
    pub async fn tools(&self) -> Vec<Tool> {
        discovery::discover_tools(&self.forwarder)
            .await
            .into_iter()
            .map(Tool::from)
            .collect()
    }

    /// Prompts advertised by the backend, or the fallback prompt.
    pub async fn prompts(&self) -> Vec<Prompt> {
        discovery::discover_prompts(&self.forwarder)
            .await
            .into_iter()
            .map(Prompt::from)
            .collect()
    }

    /// Invoke a backend tool; failures come back as error text, never as `Err`.
    pub async fn invoke_tool(&self, name: &str, arguments: JsonObject) -> CallToolResult {
        invoke::call_tool(&self.forwarder, self.truncator, name, arguments).await
    }

    pub async fn resolve_prompt(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> GetPromptResult {
        invoke::get_prompt(&self.forwarder, name, arguments).await
    }
}

impl ServerHandler for NlwebBridge {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(format!(
                "Bridge to the NLWeb server at {}. Use list_tools to see what the \
                 backend offers; ask_nlw answers natural language questions.",
                self.forwarder.url()
            )),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools().await))
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult::with_all_items(self.prompts().await))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        Ok(self.invoke_tool(&request.name, arguments).await)
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        Ok(self.resolve_prompt(&request.name, request.arguments).await)
    }
}
