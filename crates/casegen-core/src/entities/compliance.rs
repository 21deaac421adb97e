use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A tagged reference passage from the compliance corpus.
///
/// Corpus entries carry no `relevance`; query results get a fresh copy with
/// the similarity score filled in.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ComplianceSnippet {
    pub tag: String,
    pub text: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f32>,
}

impl ComplianceSnippet {
    /// Copy of this snippet carrying a relevance score.
    #[must_use]
    pub fn with_relevance(&self, relevance: f32) -> Self {
        Self {
            relevance: Some(relevance),
            ..self.clone()
        }
    }
}
