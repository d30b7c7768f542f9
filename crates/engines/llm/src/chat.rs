//! OpenAI-compatible chat-completions client.

use chess_core::{CompletionModel, ModelError, Prompt};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Settings for one chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Model identifier, e.g. `gpt-4o`
    pub model: String,
    /// API root; `/chat/completions` is appended
    pub base_url: String,
    pub api_key: String,
    pub temperature: f32,
    /// Cap on generated tokens. A move needs very few; this is a tunable.
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            temperature: 0.0,
            max_tokens: 100,
            timeout: Duration::from_secs(60),
        }
    }
}

impl ChatConfig {
    /// Fill `api_key` from the environment variable `var`.
    pub fn with_key_from_env(mut self, var: &str) -> Result<Self, ModelError> {
        self.api_key = std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ModelError::MissingApiKey(var.to_string()))?;
        Ok(self)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatReply,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatReply {
    #[serde(default)]
    pub content: Option<String>,
}

pub(crate) fn build_request<'a>(config: &'a ChatConfig, prompt: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model: &config.model,
        messages: vec![ChatMessage {
            role: "user",
            content: prompt,
        }],
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    }
}

/// Text of the first choice.
pub(crate) fn extract_completion(response: ChatResponse) -> Result<String, ModelError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ModelError::EmptyResponse)
}

/// A language model behind a chat-completions endpoint.
pub struct ChatModel {
    client: reqwest::blocking::Client,
    config: ChatConfig,
    endpoint: String,
}

impl ChatModel {
    pub fn new(config: ChatConfig) -> Result<Self, ModelError> {
        if config.api_key.is_empty() {
            return Err(ModelError::MissingApiKey("api_key".to_string()));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModelError::Http(e.to_string()))?;
        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        Ok(Self {
            client,
            config,
            endpoint,
        })
    }
}

impl CompletionModel for ChatModel {
    fn complete(&mut self, prompt: &Prompt) -> Result<String, ModelError> {
        let request = build_request(&self.config, &prompt.text);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .map_err(|e| ModelError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| ModelError::Http(e.to_string()))?;
        let text = extract_completion(parsed)?;
        debug!(model = %self.config.model, move_number = prompt.move_number, reply = %text, "completion");
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
#[path = "chat_tests.rs"]
mod chat_tests;
