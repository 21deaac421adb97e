//! Lenient JSON recovery for model output.
//!
//! Models wrap JSON in code fences, use single quotes, leave trailing commas
//! or add prose around the object. [`safe_parse_json`] tries progressively
//! looser readings and settles for an empty object when nothing works.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Characters of unparseable input included in the failure log.
const LOG_PREVIEW_CHARS: usize = 200;

static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*```[A-Za-z0-9_+-]*[ \t]*").expect("valid regex"));
static FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[ \t]*```[ \t]*$").expect("valid regex"));
static SINGLE_QUOTED_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^']*)'\s*:").expect("valid regex"));
static SINGLE_QUOTED_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*'([^']*)'").expect("valid regex"));
static SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^']*)'").expect("valid regex"));
static TRAILING_COMMA_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\}").expect("valid regex"));
static TRAILING_COMMA_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\]").expect("valid regex"));

/// Parse model output into a JSON object, never failing.
///
/// Stages, each tried only if the previous one did not yield an object:
/// 1. strip code fences, parse strictly;
/// 2. rewrite single quotes to double quotes and drop trailing commas, parse;
/// 3. parse the span from the first `{` to the last `}`, first of the
///    stripped text, then of the repaired text.
///
/// A top-level value that is not an object counts as a failure. When every
/// stage fails the start of the input is logged and an empty map returned.
///
/// Stage 2 is a textual rewrite and corrupts string values that contain
/// apostrophes; it only runs after a strict parse has already failed.
#[must_use]
pub fn safe_parse_json(raw: &str) -> Map<String, Value> {
    if raw.trim().is_empty() {
        return Map::new();
    }

    let stripped = strip_code_fences(raw);
    if let Some(object) = parse_object(&stripped) {
        return object;
    }

    let repaired = repair_json(&stripped);
    if let Some(object) = parse_object(&repaired) {
        tracing::debug!("parsed model output after quote/comma repair");
        return object;
    }

    if let Some(object) = extract_braced(&stripped)
        .and_then(parse_object)
        .or_else(|| extract_braced(&repaired).and_then(parse_object))
    {
        tracing::debug!("parsed model output from embedded object");
        return object;
    }

    let preview: String = raw.chars().take(LOG_PREVIEW_CHARS).collect();
    tracing::error!(preview = %preview, "failed to parse model output as JSON");
    Map::new()
}

/// Remove Markdown code fence markers, bare or language-tagged
/// (```` ``` ````, ```` ```json ````, ```` ```python ````), and trim the result.
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    let opened = FENCE_OPEN.replace_all(raw, "");
    let closed = FENCE_CLOSE.replace_all(&opened, "");
    closed.trim().to_string()
}

/// Rewrite single-quoted strings as double-quoted and remove trailing commas
/// before `}` or `]`.
#[must_use]
pub fn repair_json(text: &str) -> String {
    let text = SINGLE_QUOTED_KEY.replace_all(text, "\"${1}\":");
    let text = SINGLE_QUOTED_VALUE.replace_all(&text, ": \"${1}\"");
    let text = SINGLE_QUOTED.replace_all(&text, "\"${1}\"");
    let text = TRAILING_COMMA_OBJECT.replace_all(&text, "}");
    let text = TRAILING_COMMA_ARRAY.replace_all(&text, "]");
    text.into_owned()
}

/// The span from the first `{` to the last `}`, if there is one.
#[must_use]
pub fn extract_braced(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}
