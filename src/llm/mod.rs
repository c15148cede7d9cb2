//! LLM collaborator
//!
//! The model is an opaque text-completion capability reached over HTTP.
//! Knowledge base questions send the document text verbatim as context.

mod client;
mod prompt;
mod query;

pub use client::{model_from_config, HttpCompletionModel, UnavailableModel};
pub use prompt::{
    format_chat, knowledge_prompt, knowledge_system_message, plain_prompt, ChatMessage, Role,
    DEFAULT_SYSTEM_PROMPT,
};
pub use query::{ask_knowledge_base, ask_model, Conversation, QueryError};

use async_trait::async_trait;
use thiserror::Error;

use crate::config::LlmConfig;

/// Errors from completion requests.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Invalid completion endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Completion request failed: {0}")]
    RequestFailed(String),
    #[error("Failed to parse completion response: {0}")]
    ParseError(String),
    #[error("Completion request timed out")]
    Timeout,
    #[error("Completion model unavailable: {0}")]
    Unavailable(String),
}

/// Sampling parameters for one completion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub stop: Vec<String>,
}

impl CompletionRequest {
    /// Request with sampling parameters taken from config
    pub fn from_config(prompt: impl Into<String>, config: &LlmConfig) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            stop: config.stop.clone(),
        }
    }
}

/// Text-completion model.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Generate text continuing `request.prompt`.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}
