//! `rickskb menu` command
//!
//! Interactive menu over the knowledge base operations.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use console::Term;
use dialoguer::{Input, Select};

use super::utils::{kb_error, section_number};
use crate::config::Config;
use crate::core::KnowledgeBase;
use crate::llm::{ask_knowledge_base, model_from_config, CompletionModel};

const ITEMS: [&str; 6] = [
    "View entire knowledge base",
    "View a specific section",
    "Query the knowledge base with LLM",
    "Add entry to a section",
    "Create a new section",
    "Exit",
];

#[derive(Args, Debug)]
pub struct MenuArgs {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    ViewAll,
    ViewSection,
    Query,
    AddEntry,
    CreateSection,
    Exit,
}

impl Choice {
    fn from_index(index: usize) -> Self {
        match index {
            0 => Choice::ViewAll,
            1 => Choice::ViewSection,
            2 => Choice::Query,
            3 => Choice::AddEntry,
            4 => Choice::CreateSection,
            _ => Choice::Exit,
        }
    }
}

pub async fn run(_args: MenuArgs, config: &Config) -> Result<()> {
    let kb = KnowledgeBase::from_config(config);
    // Only the query option needs a working endpoint
    let model = model_from_config(&config.llm);
    let term = Term::stdout();

    println!("Knowledge base: {}", kb.store().path().display());
    loop {
        println!("\n{}", "--- KNOWLEDGE BASE INTERFACE ---".bold());
        let index = Select::new()
            .with_prompt("Choose an action")
            .items(&ITEMS)
            .default(0)
            .interact_on(&term)?;

        let choice = Choice::from_index(index);
        if choice == Choice::Exit {
            println!("Exiting knowledge base interface...");
            break;
        }

        // Failures are reported and the menu continues
        if let Err(e) = perform(choice, &kb, model.as_ref(), config).await {
            eprintln!("{} {:#}", "Error:".red(), e);
        }

        println!("\nPress Enter to continue...");
        term.read_line()?;
    }
    Ok(())
}

async fn perform(
    choice: Choice,
    kb: &KnowledgeBase,
    model: &dyn CompletionModel,
    config: &Config,
) -> Result<()> {
    match choice {
        Choice::ViewAll => {
            println!("\n{}", kb.read_all().map_err(kb_error)?);
        }
        Choice::ViewSection => {
            let number: String = Input::new().with_prompt("Section number").interact_text()?;
            println!("\n{}", kb.read_section(&number).map_err(kb_error)?);
        }
        Choice::Query => {
            let question: String = Input::new().with_prompt("Your question").interact_text()?;
            println!("\nProcessing query with LLM...");
            let answer = ask_knowledge_base(kb, model, &config.llm, &question).await?;
            println!("\n{} {}", "AI says:".cyan().bold(), answer.trim());
        }
        Choice::AddEntry => {
            let raw: String = Input::new().with_prompt("Section number").interact_text()?;
            let section = section_number(&raw)?;
            let entry: String = Input::new().with_prompt("New entry").interact_text()?;
            let added = kb.append_entry(section, &entry).map_err(kb_error)?;
            println!(
                "\nResult: Added entry to section {}: {}",
                added.section, added.entry
            );
        }
        Choice::CreateSection => {
            let title: String = Input::new()
                .with_prompt("New section title")
                .allow_empty(true)
                .interact_text()?;
            let created = kb.create_section(&title).map_err(kb_error)?;
            println!(
                "\nResult: Created new section: {}. {}",
                created.number, created.title
            );
        }
        Choice::Exit => {}
    }
    Ok(())
}
