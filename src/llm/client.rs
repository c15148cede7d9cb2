//! HTTP completion client
//!
//! Talks to any OpenAI-compatible `/v1/completions` endpoint, e.g. a
//! llama.cpp server hosting a TinyLlama chat model.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{CompletionModel, CompletionRequest, LlmError};
use crate::config::LlmConfig;

/// Connection timeout for HTTP requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const COMPLETIONS_PATH: &str = "v1/completions";

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    stop: &'a [String],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: String,
}

/// Completion model served over HTTP
#[derive(Debug, Clone)]
pub struct HttpCompletionModel {
    client: Client,
    endpoint: Url,
    model: String,
    api_key: Option<String>,
}

impl HttpCompletionModel {
    /// Create new client from LLM config
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Self::new(
            &config.base_url,
            &config.model,
            config.resolved_api_key(),
            config.timeout_secs,
        )
    }

    /// Create new client with explicit parameters
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let endpoint = completions_url(base_url)?;

        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::RequestFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            model: model.to_string(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionModel for HttpCompletionModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = CompletionBody {
            model: &self.model,
            prompt: &request.prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stop: &request.stop,
        };

        let mut builder = self.client.post(self.endpoint.clone()).json(&body);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        tracing::debug!(
            endpoint = %self.endpoint,
            prompt_chars = request.prompt.len(),
            "sending completion request"
        );

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else {
                LlmError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed(format!("HTTP {status}: {text}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ParseError(e.to_string()))?;
        parse_completion(&text)
    }
}

/// Stand-in for a model whose endpoint could not be set up
///
/// Every completion fails with the setup error, so callers that never
/// query the model keep working.
#[derive(Debug, Clone)]
pub struct UnavailableModel {
    reason: String,
}

impl UnavailableModel {
    pub fn new(err: &LlmError) -> Self {
        Self {
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl CompletionModel for UnavailableModel {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
        Err(LlmError::Unavailable(self.reason.clone()))
    }
}

/// HTTP model for the configured endpoint, or a stand-in reporting why not
pub fn model_from_config(config: &LlmConfig) -> Box<dyn CompletionModel> {
    match HttpCompletionModel::from_config(config) {
        Ok(model) => Box::new(model),
        Err(e) => {
            tracing::warn!(error = %e, "completion model unavailable, query tools will fail");
            Box::new(UnavailableModel::new(&e))
        }
    }
}

/// `{base}/v1/completions`, tolerating a trailing slash or a `/v1` suffix
fn completions_url(base_url: &str) -> Result<Url, LlmError> {
    let trimmed = base_url.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix("/v1").unwrap_or(trimmed);

    let base = Url::parse(&format!("{}/", trimmed))
        .map_err(|e| LlmError::InvalidEndpoint(format!("{}: {}", base_url, e)))?;
    base.join(COMPLETIONS_PATH)
        .map_err(|e| LlmError::InvalidEndpoint(format!("{}: {}", base_url, e)))
}

/// Text of the first choice
fn parse_completion(body: &str) -> Result<String, LlmError> {
    let response: CompletionResponse =
        serde_json::from_str(body).map_err(|e| LlmError::ParseError(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .map(|c| c.text)
        .ok_or_else(|| LlmError::ParseError("No choices in completion response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url() {
        for base in [
            "http://localhost:8080",
            "http://localhost:8080/",
            "http://localhost:8080/v1",
            "http://localhost:8080/v1/",
        ] {
            assert_eq!(
                completions_url(base).unwrap().as_str(),
                "http://localhost:8080/v1/completions"
            );
        }

        assert_eq!(
            completions_url("https://llm.example.com/proxy").unwrap().as_str(),
            "https://llm.example.com/proxy/v1/completions"
        );
    }

    #[tokio::test]
    async fn test_bad_endpoint_yields_unavailable_model() {
        let config = LlmConfig {
            base_url: "not a url".to_string(),
            ..LlmConfig::default()
        };
        let model = model_from_config(&config);

        let err = model
            .complete(&CompletionRequest::from_config("hi", &config))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Unavailable(_)));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            completions_url("not a url"),
            Err(LlmError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{"id":"cmpl-1","choices":[{"text":" Wubba lubba dub dub!","index":0}]}"#;
        assert_eq!(parse_completion(body).unwrap(), " Wubba lubba dub dub!");
    }

    #[test]
    fn test_parse_completion_without_choices() {
        assert!(matches!(
            parse_completion(r#"{"choices":[]}"#),
            Err(LlmError::ParseError(_))
        ));
        assert!(matches!(
            parse_completion("<html>"),
            Err(LlmError::ParseError(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let stop = vec!["</s>".to_string()];
        let body = CompletionBody {
            model: "tiny",
            prompt: "hi",
            max_tokens: 16,
            temperature: 0.5,
            stop: &stop,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "tiny");
        assert_eq!(json["max_tokens"], 16);
        assert_eq!(json["stop"][0], "</s>");
    }
}
