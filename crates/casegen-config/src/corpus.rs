//! Compliance corpus location.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_path() -> String {
    String::from("data/compliance_snippets.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// JSON file holding an array of `{tag, text, source}` records.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl CorpusConfig {
    #[must_use]
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}
