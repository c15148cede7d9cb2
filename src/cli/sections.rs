//! `rickskb sections` command
//!
//! Lists every section with its entry count.

use anyhow::Result;
use clap::{Args, ValueEnum};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::utils::kb_error;
use crate::config::Config;
use crate::core::{KnowledgeBase, SectionSummary};

#[derive(ValueEnum, Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct SectionsArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "#")]
    number: u32,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Entries")]
    entries: usize,
}

impl From<SectionSummary> for SectionRow {
    fn from(summary: SectionSummary) -> Self {
        Self {
            number: summary.number,
            title: summary.title,
            entries: summary.entries,
        }
    }
}

pub fn run(args: SectionsArgs, config: &Config) -> Result<()> {
    let summaries = KnowledgeBase::from_config(config)
        .sections()
        .map_err(kb_error)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Table if summaries.is_empty() => {
            println!("No sections yet. Create one with: rickskb new-section <title>");
        }
        OutputFormat::Table => {
            let rows: Vec<SectionRow> = summaries.into_iter().map(SectionRow::from).collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
    }
    Ok(())
}
