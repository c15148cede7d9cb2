//! JSON-RPC 2.0 types for MCP communication

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::core::KbError;

/// JSON-RPC 2.0 Request
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 Error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl From<&KbError> for JsonRpcError {
    /// Map a knowledge base error, keeping its kind in `data.kind`
    fn from(err: &KbError) -> Self {
        let code = match err {
            KbError::DocumentNotFound(_) | KbError::SectionNotFound(_) => RESOURCE_NOT_FOUND,
            KbError::InvalidSectionNumber(_) => INVALID_PARAMS,
            KbError::Io { .. } => INTERNAL_ERROR,
        };
        Self {
            code,
            message: err.to_string(),
            data: Some(json!({ "kind": err.kind() })),
        }
    }
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Value, code: i64, message: String) -> Self {
        Self::failure(id, JsonRpcError::new(code, message))
    }

    /// Create an error response from a prepared error object
    pub fn failure(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

// Standard JSON-RPC error codes
pub const PARSE_ERROR: i64 = -32700;
#[allow(dead_code)]
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// MCP: requested resource does not exist
pub const RESOURCE_NOT_FOUND: i64 = -32002;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_kb_error_mapping() {
        let not_found = JsonRpcError::from(&KbError::SectionNotFound(4));
        assert_eq!(not_found.code, RESOURCE_NOT_FOUND);
        assert_eq!(not_found.data, Some(json!({ "kind": "section_not_found" })));

        let invalid = JsonRpcError::from(&KbError::InvalidSectionNumber("x".to_string()));
        assert_eq!(invalid.code, INVALID_PARAMS);

        let missing = JsonRpcError::from(&KbError::DocumentNotFound(PathBuf::from("kb.txt")));
        assert_eq!(missing.data, Some(json!({ "kind": "document_not_found" })));
    }

    #[test]
    fn test_error_response_omits_result() {
        let response = JsonRpcResponse::error(json!(1), METHOD_NOT_FOUND, "nope".to_string());
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("result").is_none());
        assert_eq!(value["error"]["code"], METHOD_NOT_FOUND);
        assert!(value["error"].get("data").is_none());
    }
}
