//! `rickskb query` command
//!
//! Asks the completion model a question with the knowledge base as context.
//!
//! # Usage
//! ```bash
//! rickskb query "What does the portal gun run on?"
//! rickskb query --no-kb "Tell me a joke"
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::utils::{completion_model, join_words, kb_error};
use crate::config::Config;
use crate::core::KnowledgeBase;
use crate::llm::{ask_knowledge_base, ask_model, QueryError};

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Question text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// Send the prompt without knowledge base context
    #[arg(long)]
    pub no_kb: bool,
}

pub async fn run(args: QueryArgs, config: &Config) -> Result<()> {
    let question = join_words(&args.question);
    let model = completion_model(config)?;

    eprintln!("{}", "Processing query with LLM...".dimmed());
    let answer = if args.no_kb {
        ask_model(&model, &config.llm, &question).await?
    } else {
        let kb = KnowledgeBase::from_config(config);
        ask_knowledge_base(&kb, &model, &config.llm, &question)
            .await
            .map_err(|e| match e {
                QueryError::Kb(err) => kb_error(err),
                QueryError::Llm(err) => err.into(),
            })?
    };

    println!("{}", answer.trim());
    Ok(())
}
