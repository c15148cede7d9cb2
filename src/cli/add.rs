//! `rickskb add` command
//!
//! Adds an entry to an existing section.
//!
//! # Usage
//! ```bash
//! rickskb add 2 "Portal fluid must be refilled weekly"
//! rickskb add 2 Portal fluid must be refilled weekly
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::utils::{join_words, kb_error, section_number};
use crate::config::Config;
use crate::core::KnowledgeBase;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Section number
    #[arg(allow_hyphen_values = true)]
    pub section: String,

    /// Entry text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub entry: Vec<String>,
}

pub fn run(args: AddArgs, config: &Config) -> Result<()> {
    let section = section_number(&args.section)?;
    let entry = join_words(&args.entry);

    let added = KnowledgeBase::from_config(config)
        .append_entry(section, &entry)
        .map_err(kb_error)?;

    println!(
        "{} Added entry to section {}: {}",
        "✓".green(),
        added.section,
        added.entry
    );
    Ok(())
}
