//! MCP (Model Context Protocol) Server
//!
//! Exposes the knowledge base to AI clients over stdio.
//!
//! # Resources
//! - `rickskb://main` - whole knowledge base text
//! - `rickskb://section/{section_number}` - one section
//!
//! # Tools
//! - `query_kb` - Answer a question using the knowledge base
//! - `add_to_kb` - Append an entry to a section
//! - `create_section` - Start a new numbered section
//! - `query_llm` - Prompt the model without knowledge base context

mod handlers;
mod jsonrpc;
mod server;
mod state;
mod tools;

pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::{run_mcp_server, McpServer};
pub use state::ServerState;
