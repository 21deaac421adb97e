//! OpenAI-compatible chat completions client.

use std::time::Duration;

use async_trait::async_trait;
use casegen_config::LlmConfig;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::LlmError;
use crate::http::ensure_success;
use crate::prompt::SYSTEM_PROMPT;

/// Produces completion text for a prompt.
///
/// Implementations never fail: any error is logged and reported as an empty
/// string, which callers treat as "no usable output".
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`. `max_output_tokens` overrides the
    /// configured limit when given.
    async fn generate(&self, prompt: &str, max_output_tokens: Option<u32>) -> String;
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Value,
}

/// Client for `POST {base_url}/chat/completions`.
pub struct ChatClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl ChatClient {
    /// Build a client with the configured timeout.
    ///
    /// A missing API key is not an error here; it surfaces on each call.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("casegen/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::ClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Send one chat completion request and return the trimmed text of the
    /// first choice.
    ///
    /// # Errors
    ///
    /// - [`LlmError::MissingCredentials`] without touching the network when
    ///   no API key is configured.
    /// - [`LlmError::Http`] on transport failure or timeout.
    /// - [`LlmError::Api`] on any non-success status, including 429.
    /// - [`LlmError::EmptyCompletion`] when no text came back.
    pub async fn try_generate(
        &self,
        prompt: &str,
        max_output_tokens: Option<u32>,
    ) -> Result<String, LlmError> {
        if !self.config.is_configured() {
            return Err(LlmError::MissingCredentials);
        }

        let payload = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "max_tokens": max_output_tokens.unwrap_or(self.config.max_tokens),
            "temperature": self.config.temperature,
        });

        let url = self.config.chat_completions_url();
        tracing::debug!(%url, model = %self.config.model, "requesting chat completion");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;
        let body: ChatResponse = ensure_success(resp).await?.json().await?;

        let text = body
            .choices
            .first()
            .map(|choice| extract_text(&choice.message.content))
            .unwrap_or_default();
        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyCompletion);
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl TextGenerator for ChatClient {
    async fn generate(&self, prompt: &str, max_output_tokens: Option<u32>) -> String {
        match self.try_generate(prompt, max_output_tokens).await {
            Ok(text) => text,
            Err(LlmError::MissingCredentials) => {
                tracing::error!("language model API key not configured");
                String::new()
            }
            Err(error) => {
                tracing::error!(%error, "error generating text");
                String::new()
            }
        }
    }
}

/// Message content is a string, or an array of `{type, text}` parts.
fn extract_text(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}
