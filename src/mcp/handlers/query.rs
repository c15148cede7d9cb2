//! LLM handlers for MCP (query_kb, query_llm)

use serde_json::Value;

use super::{kb_error_text, ToolResult};
use crate::core::DocumentStore;
use crate::llm::{ask_knowledge_base, ask_model, QueryError};
use crate::mcp::state::ServerState;
use crate::mcp::tools::{QueryKbTool, QueryLlmTool};

/// Answer a question with the knowledge base as context
pub async fn do_query_kb<S: DocumentStore>(state: &mut ServerState<S>, args: &Value) -> ToolResult {
    let tool_args: QueryKbTool =
        serde_json::from_value(args.clone()).map_err(|e| format!("Invalid params: {}", e))?;

    ask_knowledge_base(&state.kb, state.model.as_ref(), &state.llm, &tool_args.query)
        .await
        .map_err(|e| match e {
            QueryError::Kb(err) => kb_error_text(&err),
            QueryError::Llm(err) => format!("LLM error: {}", err),
        })
}

/// Send a prompt to the model without knowledge base context
pub async fn do_query_llm<S: DocumentStore>(
    state: &mut ServerState<S>,
    args: &Value,
) -> ToolResult {
    let tool_args: QueryLlmTool =
        serde_json::from_value(args.clone()).map_err(|e| format!("Invalid params: {}", e))?;

    ask_model(state.model.as_ref(), &state.llm, &tool_args.prompt)
        .await
        .map_err(|e| format!("LLM error: {}", e))
}
