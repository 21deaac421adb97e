use std::sync::Arc;

use anyhow::Context;
use casegen_config::CasegenConfig;
use casegen_core::entities::ComplianceSnippet;
use casegen_llm::ChatClient;
use casegen_search::ComplianceIndex;
use casegen_synth::{SynthSettings, Synthesizer};

use crate::progress::Progress;

/// Shared application resources. Heavy parts (embedding model, HTTP client)
/// are built on demand by the commands that need them.
pub struct AppContext {
    pub config: CasegenConfig,
}

impl AppContext {
    #[must_use]
    pub const fn new(config: CasegenConfig) -> Self {
        Self { config }
    }

    /// Build the compliance index. Loading the embedding model blocks, so it
    /// runs on the blocking pool.
    pub async fn load_index(&self) -> anyhow::Result<Arc<ComplianceIndex>> {
        let progress = Progress::spinner("Loading compliance index");
        let config = self.config.clone();
        let index = tokio::task::spawn_blocking(move || ComplianceIndex::load(&config))
            .await
            .context("compliance index task failed")?;

        if index.is_available() {
            progress.finish_clear();
        } else {
            progress.finish_err("Compliance index unavailable, continuing without tags");
        }
        Ok(Arc::new(index))
    }

    /// Synthesizer over a freshly loaded index and a chat client.
    pub async fn synthesizer(&self, concurrency: Option<usize>) -> anyhow::Result<Synthesizer> {
        let mut settings = SynthSettings::from_config(&self.config);
        if let Some(concurrency) = concurrency {
            anyhow::ensure!(concurrency >= 1, "--concurrency must be at least 1");
            settings.concurrency = concurrency;
        }

        let client = ChatClient::new(&self.config.llm).context("failed to build LLM client")?;
        let index = self.load_index().await?;
        Ok(Synthesizer::new(index, Arc::new(client), settings))
    }
}

/// Run a blocking index query off the async runtime.
pub async fn query_index(
    index: &Arc<ComplianceIndex>,
    text: &str,
    top_k: usize,
) -> anyhow::Result<Vec<ComplianceSnippet>> {
    let index = Arc::clone(index);
    let text = text.to_string();
    tokio::task::spawn_blocking(move || index.query(&text, top_k))
        .await
        .context("compliance query task failed")
}
