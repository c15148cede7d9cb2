//! CLI module - Command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod add;
pub mod chat;
pub mod config;
pub mod init;
pub mod menu;
pub mod new_section;
pub mod query;
pub mod section;
pub mod sections;
pub mod serve;
pub mod show;
pub mod utils;

/// rickskb - Section-structured knowledge base
///
/// Numbered sections of bullet entries in one plain-text file, with
/// LLM-backed questions and an MCP server for AI clients.
#[derive(Parser, Debug)]
#[command(name = "rickskb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, env = "RICKSKB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Knowledge base file (overrides config and RICKSKB_FILE)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize config and an empty knowledge base
    Init(init::InitArgs),

    /// Print the whole knowledge base
    Show(show::ShowArgs),

    /// Print one section
    Section(section::SectionArgs),

    /// List sections with entry counts
    Sections(sections::SectionsArgs),

    /// Add an entry to a section
    Add(add::AddArgs),

    /// Create a new section
    NewSection(new_section::NewSectionArgs),

    /// Ask the LLM a question using the knowledge base
    Query(query::QueryArgs),

    /// Multi-turn chat with the LLM
    Chat(chat::ChatArgs),

    /// Interactive knowledge base menu
    Menu(menu::MenuArgs),

    /// Start MCP server for AI integration
    Serve(serve::ServeArgs),

    /// Get or set configuration
    Config(config::ConfigArgs),
}
