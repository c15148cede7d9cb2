//! MCP tool argument structs and tool definitions
//!
//! Simple structs for deserializing tool arguments.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::core::document::parse_section_number;
use crate::core::KbError;

/// Answer a question using the knowledge base as context
#[derive(Debug, Deserialize, Serialize)]
pub struct QueryKbTool {
    /// Free-text question
    pub query: String,
}

/// Add an entry to a section
#[derive(Debug, Deserialize, Serialize)]
pub struct AddToKbTool {
    /// Section number (integer, or a string holding one)
    pub section: SectionArg,
    /// Entry text, without the leading "- "
    pub entry: String,
}

/// Create a new section at the end of the knowledge base
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateSectionTool {
    /// Section title (stored upper-cased)
    pub title: String,
}

/// Send a prompt straight to the model
#[derive(Debug, Deserialize, Serialize)]
pub struct QueryLlmTool {
    pub prompt: String,
}

/// Section number as sent by a client
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SectionArg {
    Number(i64),
    Text(String),
}

impl SectionArg {
    /// Integer section number
    ///
    /// # Errors
    /// `InvalidSectionNumber` when a string argument is not an integer.
    pub fn resolve(&self) -> Result<i64, KbError> {
        match self {
            SectionArg::Number(n) => Ok(*n),
            SectionArg::Text(s) => parse_section_number(s),
        }
    }
}

/// `tools/list` payload
pub fn tool_definitions() -> Value {
    json!([
        {
            "name": "query_kb",
            "description": "Query the knowledge base using the local LLM. The whole knowledge base is given to the model as context. Example: query_kb({\"query\": \"What is a portal gun?\"})",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Question to answer from the knowledge base" }
                },
                "required": ["query"]
            }
        },
        {
            "name": "add_to_kb",
            "description": "Add a new entry to a section in the knowledge base. Example: add_to_kb({\"section\": 2, \"entry\": \"Plumbuses are everywhere\"})",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "section": { "type": "integer", "description": "Section number, e.g. 2 for '2. FACTS'" },
                    "entry": { "type": "string", "description": "Entry text. Stored as a '- ' bullet line." }
                },
                "required": ["section", "entry"]
            }
        },
        {
            "name": "create_section",
            "description": "Create a new section in the knowledge base. The title is upper-cased and the section is numbered automatically. Example: create_section({\"title\": \"gadgets\"})",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "title": { "type": "string", "description": "Section title" }
                },
                "required": ["title"]
            }
        },
        {
            "name": "query_llm",
            "description": "Send a prompt to the local LLM without knowledge base context and return its response.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "prompt": { "type": "string", "description": "Prompt text" }
                },
                "required": ["prompt"]
            }
        }
    ])
}
