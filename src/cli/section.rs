//! `rickskb section` command
//!
//! # Usage
//! ```bash
//! rickskb section 2             # Header and entries
//! rickskb section 2 --entries   # Entry texts only, one per line
//! ```

use anyhow::Result;
use clap::Args;

use super::utils::kb_error;
use crate::config::Config;
use crate::core::KnowledgeBase;

#[derive(Args, Debug)]
pub struct SectionArgs {
    /// Section number
    #[arg(allow_hyphen_values = true)]
    pub number: String,

    /// Print entry texts without the header or bullet markers
    #[arg(short, long)]
    pub entries: bool,
}

pub fn run(args: SectionArgs, config: &Config) -> Result<()> {
    let kb = KnowledgeBase::from_config(config);

    if args.entries {
        let doc = kb.document().map_err(kb_error)?;
        let section = doc.get_section(&args.number).map_err(kb_error)?;
        for entry in section.entry_texts() {
            println!("{}", entry);
        }
    } else {
        println!("{}", kb.read_section(&args.number).map_err(kb_error)?);
    }
    Ok(())
}
