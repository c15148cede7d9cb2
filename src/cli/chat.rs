//! `rickskb chat` command
//!
//! Multi-turn chat with the completion model. Type `exit` to quit.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::Input;

use super::utils::{completion_model, kb_error};
use crate::config::Config;
use crate::core::KnowledgeBase;
use crate::llm::{knowledge_system_message, Conversation, DEFAULT_SYSTEM_PROMPT};

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// System message (default: a generic friendly assistant)
    #[arg(long, conflicts_with = "with_kb")]
    pub system: Option<String>,

    /// Start the conversation with the knowledge base as context
    #[arg(long)]
    pub with_kb: bool,
}

pub async fn run(args: ChatArgs, config: &Config) -> Result<()> {
    let model = completion_model(config)?;

    let system = if args.with_kb {
        let kb_text = KnowledgeBase::from_config(config)
            .raw_text()
            .map_err(kb_error)?;
        knowledge_system_message(&config.llm.system_prompt, &kb_text)
    } else {
        args.system
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string())
    };
    let mut conversation = Conversation::new(system);

    println!("Chat with {} (type 'exit' to quit)", config.llm.model.bold());
    loop {
        let line: String = Input::new()
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()?;
        let line = line.trim();

        if line.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            break;
        }
        if line.is_empty() {
            continue;
        }

        match conversation.send(&model, &config.llm, line).await {
            Ok(reply) => println!("\n{}: {}\n", "Assistant".cyan().bold(), reply),
            Err(e) => eprintln!("{} {}", "LLM error:".red(), e),
        }
    }

    tracing::debug!(turns = conversation.messages().len(), "chat finished");
    Ok(())
}
