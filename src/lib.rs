//! rickskb - Section-structured knowledge base
//!
//! A plain-text file of numbered sections with bullet entries, readable
//! and editable from the command line or by AI clients over MCP.
//!
//! ## Key Concepts
//!
//! - **Section**: a block opening with a `N. TITLE` header line
//! - **Entry**: a `- ` bullet line inside a section
//! - **Store**: where the document text lives; re-read on every operation
//! - **Completion model**: an HTTP text-completion endpoint that answers
//!   questions with the whole document as context

pub mod cli;
pub mod config;
pub mod core;
pub mod llm;
pub mod mcp;

pub use config::Config;
pub use core::{DocumentStore, FileStore, KbError, KnowledgeBase, KnowledgeDocument, Section};
pub use llm::{CompletionModel, HttpCompletionModel};
pub use mcp::run_mcp_server;
