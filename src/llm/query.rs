//! Questions answered by the completion model

use thiserror::Error;

use super::prompt::{format_chat, knowledge_prompt, plain_prompt, ChatMessage};
use super::{CompletionModel, CompletionRequest, LlmError};
use crate::config::LlmConfig;
use crate::core::{DocumentStore, KbError, KnowledgeBase};

/// Errors from a knowledge base question
#[derive(Error, Debug)]
pub enum QueryError {
    #[error(transparent)]
    Kb(#[from] KbError),
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Answer a question with the knowledge base text as context
///
/// The document is only read, never written.
pub async fn ask_knowledge_base<S: DocumentStore>(
    kb: &KnowledgeBase<S>,
    model: &dyn CompletionModel,
    config: &LlmConfig,
    question: &str,
) -> Result<String, QueryError> {
    let kb_text = kb.raw_text()?;
    let prompt = knowledge_prompt(&config.system_prompt, &kb_text, question);

    tracing::info!(kb_chars = kb_text.len(), "querying knowledge base");
    let answer = model
        .complete(&CompletionRequest::from_config(prompt, config))
        .await?;
    Ok(answer)
}

/// Send one prompt without knowledge base context
pub async fn ask_model(
    model: &dyn CompletionModel,
    config: &LlmConfig,
    prompt: &str,
) -> Result<String, LlmError> {
    model
        .complete(&CompletionRequest::from_config(plain_prompt(prompt), config))
        .await
}

/// Multi-turn chat that keeps the full message history
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(system)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Add a user turn and return the model's reply
    ///
    /// A failed request leaves the history as it was.
    pub async fn send(
        &mut self,
        model: &dyn CompletionModel,
        config: &LlmConfig,
        user: &str,
    ) -> Result<String, LlmError> {
        self.messages.push(ChatMessage::user(user));
        let prompt = format_chat(&self.messages);

        match model
            .complete(&CompletionRequest::from_config(prompt, config))
            .await
        {
            Ok(reply) => {
                let reply = reply.trim().to_string();
                self.messages.push(ChatMessage::assistant(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                self.messages.pop();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::core::MemoryStore;

    /// Records prompts and answers with a fixed reply
    struct RecordingModel {
        reply: Result<String, ()>,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingModel {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl CompletionModel for RecordingModel {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            self.reply
                .clone()
                .map_err(|_| LlmError::RequestFailed("HTTP 500".to_string()))
        }
    }

    #[tokio::test]
    async fn test_document_text_is_verbatim_in_prompt() {
        let raw = "1. INTRO\n- hello   \n\n\n2. FACTS\n- sky is blue";
        let kb = KnowledgeBase::new(MemoryStore::new(raw));
        let model = RecordingModel::replying(" The sky is blue, Morty.");
        let config = LlmConfig::default();

        let answer = ask_knowledge_base(&kb, &model, &config, "What color is the sky?")
            .await
            .unwrap();

        assert_eq!(answer, " The sky is blue, Morty.");
        let prompt = model.last_prompt();
        assert!(prompt.contains(&format!("Knowledge base:\n{}</s>", raw)));
        assert!(prompt.contains("<|user|>\nWhat color is the sky?</s>"));
        assert_eq!(kb.store().snapshot().as_deref(), Some(raw));
    }

    #[tokio::test]
    async fn test_missing_document_skips_model() {
        let kb = KnowledgeBase::new(MemoryStore::missing());
        let model = RecordingModel::replying("unused");

        let err = ask_knowledge_base(&kb, &model, &LlmConfig::default(), "q")
            .await
            .unwrap_err();

        assert!(matches!(err, QueryError::Kb(KbError::DocumentNotFound(_))));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_is_reported() {
        let kb = KnowledgeBase::new(MemoryStore::new("1. A"));
        let err = ask_knowledge_base(&kb, &RecordingModel::failing(), &LlmConfig::default(), "q")
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::Llm(LlmError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_ask_model_uses_plain_prompt() {
        let model = RecordingModel::replying("hi there");
        let answer = ask_model(&model, &LlmConfig::default(), "hello").await.unwrap();

        assert_eq!(answer, "hi there");
        assert!(model
            .last_prompt()
            .starts_with("<|system|>\nYou are a helpful, friendly AI assistant.</s>"));
    }

    #[tokio::test]
    async fn test_conversation_keeps_history() {
        let model = RecordingModel::replying("  reply  ");
        let config = LlmConfig::default();
        let mut chat = Conversation::new("sys");

        assert_eq!(chat.send(&model, &config, "first").await.unwrap(), "reply");
        chat.send(&model, &config, "second").await.unwrap();

        assert_eq!(chat.messages().len(), 5);
        assert!(model
            .last_prompt()
            .contains("<|user|>\nfirst</s>\n<|assistant|>\nreply</s>\n<|user|>\nsecond</s>"));
    }

    #[tokio::test]
    async fn test_conversation_failure_rolls_back() {
        let mut chat = Conversation::new("sys");
        let result = chat
            .send(&RecordingModel::failing(), &LlmConfig::default(), "hello")
            .await;

        assert!(result.is_err());
        assert_eq!(chat.messages().len(), 1);
    }
}
