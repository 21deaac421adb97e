//! General pipeline configuration.

use serde::{Deserialize, Serialize};

/// Requirements processed at once. 1 keeps the reference sequential behavior.
const fn default_concurrency() -> usize {
    1
}

/// Compliance snippets retrieved per requirement.
const fn default_top_k() -> usize {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            top_k: default_top_k(),
        }
    }
}
