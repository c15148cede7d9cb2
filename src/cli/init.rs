//! `rickskb init` command
//!
//! Creates `.rickskb/config.toml` and an empty knowledge base file.
//!
//! # Usage
//! ```bash
//! rickskb init                        # Initialize in current directory
//! rickskb init /path/to/project       # Initialize in specific path
//! rickskb --file notes.txt init       # Use notes.txt as the knowledge base
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use crate::config::{Config, CONFIG_DIR, CONFIG_FILE};
use crate::core::FileStore;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path to initialize (default: current directory)
    pub path: Option<PathBuf>,

    /// Force re-initialization (the knowledge base file is never overwritten)
    #[arg(short = 'F', long)]
    pub force: bool,
}

/// `file` is the knowledge base path recorded in the new config,
/// relative to the initialized directory unless absolute
pub fn run(args: InitArgs, file: Option<PathBuf>) -> Result<()> {
    let base_path = args.path.unwrap_or_else(|| PathBuf::from("."));
    let config_dir = base_path.join(CONFIG_DIR);

    if is_initialized(&base_path) && !args.force {
        bail!(
            "Directory {} is already initialized. Use --force to reinitialize.",
            base_path.display()
        );
    }

    println!("Initializing knowledge base in: {}", base_path.display());
    fs::create_dir_all(&config_dir)?;

    let mut config = Config::default();
    if let Some(file) = file {
        config.kb.path = file;
    }
    let config_path = config_dir.join(CONFIG_FILE);
    config.save_to(&config_path)?;

    let kb_path = base_path.join(&config.kb.path);
    let store = FileStore::new(&kb_path);
    let created = store.create_if_missing()?;

    println!("\n{} Initialized", "✓".green());
    println!("   Config: {}", config_path.display());
    if created {
        println!("   Knowledge base: {} (new)", kb_path.display());
    } else {
        println!("   Knowledge base: {} (existing, kept)", kb_path.display());
    }
    println!("\nNext steps:");
    println!("  rickskb new-section \"Gadgets\"");
    println!("  rickskb add 1 \"Portal gun needs fluid\"");
    println!("  rickskb sections");

    Ok(())
}

/// Check if a directory already has a config directory
fn is_initialized(path: &Path) -> bool {
    path.join(CONFIG_DIR).join(CONFIG_FILE).exists()
}
