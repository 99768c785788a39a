use std::time::Duration;

use axum::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::config::GenerationConfig;

use super::error::GenerationError;

/// One system + user instruction pair sent to the generation API.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Capability to turn an instruction pair into free-form text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError>;

    /// Whether calls can succeed at all. Reported by the health route.
    fn is_configured(&self) -> bool {
        true
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAiClient {
    /// Fails immediately when no API key is configured.
    pub fn new(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(GenerationError::MissingCredential)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key,
            endpoint: format!("{}/chat/completions", config.base_url),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "generation API error");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let content = extract_content(chat)?;
        debug!(chars = content.len(), "generation API replied");
        Ok(content)
    }
}

fn extract_content(chat: ChatResponse) -> Result<String, GenerationError> {
    chat.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(GenerationError::EmptyContent)
}

/// Stand-in used when no credential is configured. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledClient;

#[async_trait]
impl CompletionClient for DisabledClient {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, GenerationError> {
        Err(GenerationError::MissingCredential)
    }

    fn is_configured(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "sys".into(),
            user: "usr".into(),
            temperature: 0.7,
            max_tokens: 4000,
        }
    }

    #[test]
    fn new_fails_fast_without_key() {
        let cfg = GenerationConfig::default();
        assert!(matches!(
            OpenAiClient::new(&cfg),
            Err(GenerationError::MissingCredential)
        ));
    }

    #[test]
    fn new_builds_endpoint_from_base_url() {
        let cfg = GenerationConfig {
            api_key: Some("sk-test".into()),
            base_url: "http://localhost:1234/v1".into(),
            ..GenerationConfig::default()
        };
        let client = OpenAiClient::new(&cfg).unwrap();
        assert_eq!(client.endpoint, "http://localhost:1234/v1/chat/completions");
        assert!(client.is_configured());
    }

    #[tokio::test]
    async fn disabled_client_always_fails() {
        let client = DisabledClient;
        assert!(!client.is_configured());
        assert!(matches!(
            client.complete(&request()).await,
            Err(GenerationError::MissingCredential)
        ));
    }

    #[test]
    fn chat_request_wire_shape() {
        let req = request();
        let body = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: vec![
                ChatMessage { role: "system", content: &req.system },
                ChatMessage { role: "user", content: &req.user },
            ],
            temperature: req.temperature,
            max_tokens: req.max_tokens,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["model"], "gpt-3.5-turbo");
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["content"], "usr");
        assert_eq!(v["max_tokens"], 4000);
    }

    #[test]
    fn extracts_first_choice_content() {
        let chat: ChatResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"[]"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(chat).unwrap(), "[]");
    }

    #[test]
    fn empty_or_missing_content_is_an_error() {
        let none: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(extract_content(none), Err(GenerationError::EmptyContent)));

        let null: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(matches!(extract_content(null), Err(GenerationError::EmptyContent)));
    }
}
