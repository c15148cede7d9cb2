//! MCP Tool and resource handlers
//!
//! Each module handles a group of related requests.

pub mod entries;
pub mod query;
pub mod resources;

use serde_json::Value;

use super::state::ServerState;
use crate::core::{DocumentStore, KbError};

/// Result type for tool handlers
pub type ToolResult = Result<String, String>;

/// Dispatch a tool call to the appropriate handler
pub async fn dispatch_tool<S: DocumentStore>(
    state: &mut ServerState<S>,
    name: &str,
    args: &Value,
) -> ToolResult {
    match name {
        // LLM tools
        "query_kb" => query::do_query_kb(state, args).await,
        "query_llm" => query::do_query_llm(state, args).await,

        // Write tools
        "add_to_kb" => entries::do_add_to_kb(state, args),
        "create_section" => entries::do_create_section(state, args),

        _ => Err(format!("Unknown tool: {}", name)),
    }
}

/// Tool error text that keeps the error kind visible to clients
pub(crate) fn kb_error_text(err: &KbError) -> String {
    format!("[{}] {}", err.kind(), err)
}
