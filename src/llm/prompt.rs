//! Prompt formatting for TinyLlama-style chat models

use serde::{Deserialize, Serialize};

/// System message for prompts that carry no knowledge base
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful, friendly AI assistant.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    fn tag(self) -> &'static str {
        match self {
            Role::System => "<|system|>",
            Role::User => "<|user|>",
            Role::Assistant => "<|assistant|>",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Render messages in chat-template form, ending with an open assistant turn
pub fn format_chat(messages: &[ChatMessage]) -> String {
    let mut prompt = String::new();
    for message in messages {
        prompt.push_str(message.role.tag());
        prompt.push('\n');
        prompt.push_str(&message.content);
        prompt.push_str("</s>\n");
    }
    prompt.push_str(Role::Assistant.tag());
    prompt.push('\n');
    prompt
}

/// System message carrying the knowledge base text verbatim
pub fn knowledge_system_message(system: &str, kb_text: &str) -> String {
    format!("{}\nKnowledge base:\n{}", system, kb_text)
}

/// Question answered with the knowledge base text as system context
pub fn knowledge_prompt(system: &str, kb_text: &str, question: &str) -> String {
    format_chat(&[
        ChatMessage::system(knowledge_system_message(system, kb_text)),
        ChatMessage::user(question),
    ])
}

/// Single prompt with the default assistant persona
pub fn plain_prompt(prompt: &str) -> String {
    format_chat(&[
        ChatMessage::system(DEFAULT_SYSTEM_PROMPT),
        ChatMessage::user(prompt),
    ])
}
