//! Write handlers for MCP (add_to_kb, create_section)

use serde_json::Value;

use super::{kb_error_text, ToolResult};
use crate::core::DocumentStore;
use crate::mcp::state::ServerState;
use crate::mcp::tools::{AddToKbTool, CreateSectionTool};

/// Add a new entry to a section
pub fn do_add_to_kb<S: DocumentStore>(state: &mut ServerState<S>, args: &Value) -> ToolResult {
    let tool_args: AddToKbTool =
        serde_json::from_value(args.clone()).map_err(|e| format!("Invalid params: {}", e))?;

    let section = tool_args.section.resolve().map_err(|e| kb_error_text(&e))?;
    let added = state
        .kb
        .append_entry(section, &tool_args.entry)
        .map_err(|e| kb_error_text(&e))?;

    Ok(format!(
        "Added entry to section {}: {}",
        added.section, added.entry
    ))
}

/// Create a new section
pub fn do_create_section<S: DocumentStore>(
    state: &mut ServerState<S>,
    args: &Value,
) -> ToolResult {
    let tool_args: CreateSectionTool =
        serde_json::from_value(args.clone()).map_err(|e| format!("Invalid params: {}", e))?;

    let created = state
        .kb
        .create_section(&tool_args.title)
        .map_err(|e| kb_error_text(&e))?;

    Ok(format!(
        "Created new section: {}. {}",
        created.number, created.title
    ))
}
