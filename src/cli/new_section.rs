//! `rickskb new-section` command
//!
//! # Usage
//! ```bash
//! rickskb new-section "Interdimensional cable"
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::utils::{join_words, kb_error};
use crate::config::Config;
use crate::core::KnowledgeBase;

#[derive(Args, Debug)]
pub struct NewSectionArgs {
    /// Section title (stored upper-cased)
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,
}

pub fn run(args: NewSectionArgs, config: &Config) -> Result<()> {
    let created = KnowledgeBase::from_config(config)
        .create_section(&join_words(&args.title))
        .map_err(kb_error)?;

    println!(
        "{} Created new section: {}. {}",
        "✓".green(),
        created.number,
        created.title
    );
    Ok(())
}
