//! Language model provider configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    String::from("https://api.openai.com/v1")
}

fn default_model() -> String {
    String::from("gpt-3.5-turbo")
}

const fn default_max_tokens() -> u32 {
    2000
}

/// Near-zero sampling: structured output favors determinism.
const fn default_temperature() -> f32 {
    0.1
}

const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Bearer token for the chat completions endpoint.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of an OpenAI-compatible API (without `/chat/completions`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound on completion length when the caller does not pass one.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Overall per-request timeout, connect through body.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Check if the provider has credentials.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Full URL of the chat completions endpoint.
    #[must_use]
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Copy with the api key masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let api_key = if self.is_configured() {
            String::from("***")
        } else {
            String::new()
        };
        Self {
            api_key,
            ..self.clone()
        }
    }
}
