//! Resource handlers for MCP
//!
//! - `rickskb://main` - the whole knowledge base
//! - `rickskb://section/{section_number}` - one section block

use serde_json::{json, Value};
use url::Url;

use crate::core::DocumentStore;
use crate::mcp::jsonrpc::{JsonRpcError, INVALID_PARAMS, RESOURCE_NOT_FOUND};
use crate::mcp::state::ServerState;

pub const URI_SCHEME: &str = "rickskb";
pub const MAIN_URI: &str = "rickskb://main";
pub const SECTION_TEMPLATE: &str = "rickskb://section/{section_number}";

const MIME_TYPE: &str = "text/plain";

/// A parsed resource URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceTarget {
    Main,
    /// Raw section identifier, validated on read
    Section(String),
}

impl ResourceTarget {
    pub fn parse(uri: &str) -> Result<Self, JsonRpcError> {
        let unknown = || JsonRpcError::new(RESOURCE_NOT_FOUND, format!("Unknown resource: {}", uri));

        let url = Url::parse(uri).map_err(|_| unknown())?;
        if url.scheme() != URI_SCHEME {
            return Err(unknown());
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match (url.host_str(), segments.as_slice()) {
            (Some("main"), []) => Ok(ResourceTarget::Main),
            (Some("section"), [number]) => Ok(ResourceTarget::Section((*number).to_string())),
            _ => Err(unknown()),
        }
    }
}

/// `resources/list` payload
pub fn list_resources() -> Value {
    json!({
        "resources": [{
            "uri": MAIN_URI,
            "name": "knowledge-base",
            "description": "The entire knowledge base",
            "mimeType": MIME_TYPE
        }]
    })
}

/// `resources/templates/list` payload
pub fn list_templates() -> Value {
    json!({
        "resourceTemplates": [{
            "uriTemplate": SECTION_TEMPLATE,
            "name": "knowledge-base-section",
            "description": "One numbered section of the knowledge base",
            "mimeType": MIME_TYPE
        }]
    })
}

/// `resources/read`
pub fn read_resource<S: DocumentStore>(
    state: &ServerState<S>,
    params: &Value,
) -> Result<Value, JsonRpcError> {
    let uri = params["uri"]
        .as_str()
        .ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "Missing resource uri"))?;

    let text = match ResourceTarget::parse(uri)? {
        ResourceTarget::Main => state.kb.read_all(),
        ResourceTarget::Section(number) => state.kb.read_section(&number),
    }
    .map_err(|e| JsonRpcError::from(&e))?;

    Ok(json!({
        "contents": [{
            "uri": uri,
            "mimeType": MIME_TYPE,
            "text": text
        }]
    }))
}
