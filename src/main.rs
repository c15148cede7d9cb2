//! rickskb CLI - Entry point
//!
//! Usage: rickskb <command> [options]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rickskb::cli::{self, Cli, Commands};
use rickskb::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let Cli {
        verbose,
        config,
        file,
        command,
    } = Cli::parse();

    // Initialize tracing. Logs go to stderr so stdout stays clean for MCP.
    let filter = if verbose {
        EnvFilter::new("rickskb=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Run command
    match command {
        Commands::Init(args) => cli::init::run(args, file),
        Commands::Config(args) => cli::config::run(args),
        Commands::Show(args) => cli::show::run(args, &load_config(config, file)?),
        Commands::Section(args) => cli::section::run(args, &load_config(config, file)?),
        Commands::Sections(args) => cli::sections::run(args, &load_config(config, file)?),
        Commands::Add(args) => cli::add::run(args, &load_config(config, file)?),
        Commands::NewSection(args) => cli::new_section::run(args, &load_config(config, file)?),
        Commands::Query(args) => cli::query::run(args, &load_config(config, file)?).await,
        Commands::Chat(args) => cli::chat::run(args, &load_config(config, file)?).await,
        Commands::Menu(args) => cli::menu::run(args, &load_config(config, file)?).await,
        Commands::Serve(args) => cli::serve::run(args, &load_config(config, file)?).await,
    }
}

/// Config from `--config` or the default locations, with `--file` applied
fn load_config(explicit: Option<PathBuf>, file: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::load_with(explicit.as_deref())?;
    if let Some(file) = file {
        config.override_kb_path(file);
    }
    Ok(config)
}
