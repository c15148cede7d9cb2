//! MCP Server implementation for the knowledge base
//!
//! Implements the Model Context Protocol (JSON-RPC 2.0) server directly
//! without external SDK dependencies. One request is handled at a time,
//! which serializes every read and write of the knowledge base file.

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::handlers::{self, resources};
use super::jsonrpc::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR,
};
use super::state::ServerState;
use super::tools::tool_definitions;
use crate::config::Config;
use crate::core::DocumentStore;

const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP Server handler
pub struct McpServer<S: DocumentStore> {
    state: ServerState<S>,
}

impl<S: DocumentStore> McpServer<S> {
    pub fn new(state: ServerState<S>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ServerState<S> {
        &self.state
    }

    /// Handle one line of input, returning the serialized response (if any)
    pub async fn handle_line(&mut self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(&request).await?,
            Err(e) => JsonRpcResponse::error(Value::Null, PARSE_ERROR, format!("Parse error: {}", e)),
        };

        match serde_json::to_string(&response) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize response");
                None
            }
        }
    }

    /// Handle a JSON-RPC request
    pub async fn handle_request(&mut self, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        // Notifications (no id) don't get responses
        let Some(id) = request.id.clone() else {
            match request.method.as_str() {
                "notifications/initialized" => {
                    tracing::info!(session = %self.state.session_id, "client initialized");
                }
                "notifications/cancelled" => {
                    tracing::debug!("request cancelled");
                }
                other => {
                    tracing::debug!(method = other, "unknown notification");
                }
            }
            return None;
        };

        let result = match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_call_tool(&request.params).await,
            "resources/list" => Ok(resources::list_resources()),
            "resources/templates/list" => Ok(resources::list_templates()),
            "resources/read" => resources::read_resource(&self.state, &request.params),
            _ => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => {
                tracing::debug!(method = %request.method, code = error.code, "request failed");
                JsonRpcResponse::failure(id, error)
            }
        })
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false },
                "resources": { "subscribe": false, "listChanged": false }
            },
            "serverInfo": {
                "name": self.state.server_name,
                "version": env!("CARGO_PKG_VERSION")
            },
            "instructions": "A knowledge base of numbered sections with bullet entries. Read rickskb://main or rickskb://section/{n}, ask questions with query_kb, and record new knowledge with add_to_kb or create_section."
        })
    }

    async fn handle_call_tool(&mut self, params: &Value) -> Result<Value, JsonRpcError> {
        let name = params["name"]
            .as_str()
            .ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "Missing tool name"))?;
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        tracing::debug!(tool = name, "tool call");
        let result = handlers::dispatch_tool(&mut self.state, name, &arguments).await;

        Ok(match result {
            Ok(text) => json!({
                "content": [{
                    "type": "text",
                    "text": text
                }]
            }),
            Err(e) => json!({
                "content": [{
                    "type": "text",
                    "text": format!("Error: {}", e)
                }],
                "isError": true
            }),
        })
    }
}

/// Run the MCP server with STDIO transport
pub async fn run_mcp_server(config: &Config) -> anyhow::Result<()> {
    let state = ServerState::from_config(config);
    tracing::info!(
        kb = %state.kb.store().location(),
        session = %state.session_id,
        "MCP server starting"
    );

    let mut server = McpServer::new(state);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        tracing::debug!("received: {}", truncate(&line, 100));

        if let Some(json) = server.handle_line(&line).await {
            tracing::debug!("sending: {}", truncate(&json, 100));
            stdout.write_all(json.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }

    tracing::info!("MCP server stopping");
    Ok(())
}

/// Prefix of at most `max` characters
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
