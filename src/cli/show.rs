//! `rickskb show` command
//!
//! Prints the whole knowledge base.
//!
//! # Usage
//! ```bash
//! rickskb show          # Normalized sections
//! rickskb show --raw    # File content exactly as stored
//! ```

use anyhow::Result;
use clap::Args;

use super::utils::kb_error;
use crate::config::Config;
use crate::core::KnowledgeBase;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print the file exactly as stored
    #[arg(long)]
    pub raw: bool,
}

pub fn run(args: ShowArgs, config: &Config) -> Result<()> {
    let kb = KnowledgeBase::from_config(config);
    let text = if args.raw {
        kb.raw_text()
    } else {
        kb.read_all()
    }
    .map_err(kb_error)?;

    if text.is_empty() {
        eprintln!("(knowledge base is empty)");
    } else {
        println!("{}", text.trim_end_matches('\n'));
    }
    Ok(())
}
