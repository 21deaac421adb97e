//! Embedding backend configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_model() -> String {
    String::from("all-MiniLM-L6-v2")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingsConfig {
    /// Sentence embedding model name (e.g. `all-MiniLM-L6-v2`, `bge-small-en-v1.5`).
    #[serde(default = "default_model")]
    pub model: String,

    /// Model cache directory. Empty means `~/.casegen/cache/fastembed`.
    #[serde(default)]
    pub cache_dir: String,
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            cache_dir: String::new(),
        }
    }
}

impl EmbeddingsConfig {
    /// Resolved cache directory for downloaded model files.
    #[must_use]
    pub fn resolved_cache_dir(&self) -> PathBuf {
        if !self.cache_dir.is_empty() {
            return PathBuf::from(&self.cache_dir);
        }
        dirs::home_dir().map_or_else(
            || PathBuf::from(".fastembed_cache"),
            |h| h.join(".casegen").join("cache").join("fastembed"),
        )
    }
}
