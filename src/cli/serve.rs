//! Serve command - Start MCP server

use anyhow::{bail, Result};
use clap::Args;

use crate::config::Config;
use crate::core::FileStore;

/// Start MCP server for AI integration
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Transport mode (only stdio is supported)
    #[arg(long, default_value = "stdio")]
    pub transport: String,

    /// Create an empty knowledge base file if none exists
    #[arg(long)]
    pub auto_init: bool,
}

pub async fn run(args: ServeArgs, config: &Config) -> Result<()> {
    if args.transport != "stdio" {
        bail!("Unknown transport: {}. Use 'stdio'.", args.transport);
    }

    let store = FileStore::new(config.kb_path());
    if !store.exists() {
        if args.auto_init {
            store.create_if_missing()?;
            eprintln!("Created empty knowledge base at {}", store.path().display());
        } else {
            // Reads report document_not_found until the file appears
            tracing::warn!(path = %store.path().display(), "knowledge base file does not exist yet");
        }
    }

    eprintln!("Starting MCP server (transport: {})", args.transport);
    eprintln!("Knowledge base: {}", store.path().display());

    crate::mcp::run_mcp_server(config).await
}
