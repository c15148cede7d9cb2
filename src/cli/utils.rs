//! CLI utility functions
//!
//! Helpers shared across CLI commands.

use anyhow::Result;

use crate::config::Config;
use crate::core::document::parse_section_number;
use crate::core::KbError;
use crate::llm::HttpCompletionModel;

/// Parse a section number argument
pub fn section_number(raw: &str) -> Result<i64> {
    Ok(parse_section_number(raw)?)
}

/// Convert a knowledge base error, pointing at `init` when the file is missing
pub fn kb_error(err: KbError) -> anyhow::Error {
    if let KbError::DocumentNotFound(path) = &err {
        let hint = format!(
            "No knowledge base at {}. Run 'rickskb init' to create one.",
            path.display()
        );
        return anyhow::Error::new(err).context(hint);
    }
    anyhow::Error::new(err)
}

/// Completion model for the configured endpoint
pub fn completion_model(config: &Config) -> Result<HttpCompletionModel> {
    Ok(HttpCompletionModel::from_config(&config.llm)?)
}

/// Join free-form words given as separate arguments
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}
