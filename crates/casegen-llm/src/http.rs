//! Status handling for chat completion responses.

use crate::error::LlmError;

/// Error bodies are cut to this many characters.
const MAX_ERROR_BODY_CHARS: usize = 320;

/// Pass a successful response through; turn any other status into
/// [`LlmError::Api`] carrying the start of the provider's error body.
///
/// Rate limiting (429) is not special-cased: the caller never retries, so a
/// throttled request fails like any other error status.
pub async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(LlmError::Api {
        status: status.as_u16(),
        message: truncate(body.trim(), MAX_ERROR_BODY_CHARS),
    })
}

/// First `max_chars` characters of `value`, with `...` appended if cut.
pub(crate) fn truncate(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
