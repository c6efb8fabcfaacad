//! MCP server exposing the weather tools
//!
//! Protocol handling (handshake, ping, framing, notifications) is done by
//! `rmcp`; this module only lists the tools and runs tool calls.

pub mod stdio;
pub mod tools;

use crate::WeatherMcpError;
use crate::service::WeatherService;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ErrorCode, Implementation, JsonObject,
    ListToolsResult, PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use serde_json::{Value, json};
use tracing::debug;

/// Server name
pub const SERVER_NAME: &str = "meteo-mcp";

const INSTRUCTIONS: &str = "Serveur météo MCP basé sur Open-Meteo.\n\n\
Outils disponibles:\n\
- get_weather: météo actuelle pour une ville\n\
- get_weather_forecast: prévisions de 1 à 7 jours pour une ville\n\
- get_weather_by_coordinates: météo actuelle par coordonnées GPS";

/// Weather MCP server, cloned once per session
#[derive(Debug, Clone)]
pub struct McpServer {
    service: WeatherService,
}

/// Map a pipeline error onto the JSON-RPC error returned for `tool`
#[must_use]
pub fn error_data(err: &WeatherMcpError, tool: &str) -> ErrorData {
    let kind = err.kind();
    ErrorData::new(
        ErrorCode(kind.code()),
        err.user_message(tool),
        Some(json!({ "kind": kind.as_str() })),
    )
}

impl McpServer {
    #[must_use]
    pub fn new(service: WeatherService) -> Self {
        Self { service }
    }

    /// Run one tool call; tool failures become JSON-RPC errors
    pub async fn run_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = arguments.map(Value::Object).unwrap_or(Value::Null);
        debug!("Calling tool: {} with args: {}", name, arguments);

        match self.service.call_tool(name, &arguments).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(error_data(&e, name)),
        }
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: crate::VERSION.to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(tools::catalogue()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(&request.name, request.arguments).await
    }
}
