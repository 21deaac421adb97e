//! Language model client error types.

use thiserror::Error;

/// Errors that can occur when calling the chat completions endpoint.
///
/// [`crate::TextGenerator::generate`] folds all of these into an empty
/// string; [`crate::ChatClient::try_generate`] exposes them.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key configured. Raised before any network I/O.
    #[error("no API key configured (set llm.api_key or OPENAI_API_KEY)")]
    MissingCredentials,

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// HTTP transport error, including timeouts and undecodable bodies.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// The response had no choices, or the first choice had no text.
    #[error("completion contained no text")]
    EmptyCompletion,
}
