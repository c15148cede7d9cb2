//! MCP Server state management

use ulid::Ulid;

use crate::config::{Config, LlmConfig};
use crate::core::{DocumentStore, FileStore, KnowledgeBase};
use crate::llm::{model_from_config, CompletionModel};

/// MCP Server state - holds all runtime data
pub struct ServerState<S: DocumentStore = FileStore> {
    /// Knowledge base operations (file re-read on every call)
    pub kb: KnowledgeBase<S>,
    /// Completion model for query tools
    pub model: Box<dyn CompletionModel>,
    /// Sampling parameters and system prompt
    pub llm: LlmConfig,
    /// Name reported in `initialize`
    pub server_name: String,
    /// Unique session ID for this MCP connection
    pub session_id: String,
}

impl ServerState<FileStore> {
    /// State for the file-backed knowledge base and HTTP model in `config`
    ///
    /// A bad LLM endpoint only fails the query tools.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            KnowledgeBase::from_config(config),
            model_from_config(&config.llm),
            config,
        )
    }
}

impl<S: DocumentStore> ServerState<S> {
    pub fn new(kb: KnowledgeBase<S>, model: Box<dyn CompletionModel>, config: &Config) -> Self {
        Self {
            kb,
            model,
            llm: config.llm.clone(),
            server_name: config.server.name.clone(),
            session_id: format!("mcp-{}", Ulid::new()),
        }
    }
}
