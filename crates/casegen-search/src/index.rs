//! Compliance snippet index.
//!
//! Embeds the corpus once at construction and answers nearest-neighbor
//! queries against it. Construction failures never surface to callers:
//! the index falls back to a degraded state in which every query returns
//! nothing.

use std::fmt;
use std::sync::Mutex;

use casegen_config::CasegenConfig;
use casegen_core::entities::ComplianceSnippet;
use casegen_embeddings::{Embedder, EmbeddingEngine};

use crate::corpus::load_corpus;
use crate::error::SearchError;
use crate::vector::FlatL2Index;

/// Whether an index can answer queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexCapability {
    Ready { snippets: usize, dimension: usize },
    Degraded { reason: String },
}

enum State {
    Ready {
        snippets: Vec<ComplianceSnippet>,
        vectors: FlatL2Index,
        embedder: Mutex<Box<dyn Embedder>>,
    },
    Degraded {
        reason: String,
    },
}

/// Nearest-neighbor lookup over the compliance corpus.
///
/// Share as `Arc<ComplianceIndex>`. Queries block on the embedding backend,
/// so async callers should run them under `tokio::task::spawn_blocking`.
pub struct ComplianceIndex {
    state: State,
}

impl ComplianceIndex {
    /// Build the index described by `config`: read `corpus.path`, load
    /// `embeddings.model`, embed every snippet.
    ///
    /// Any failure yields a degraded index, logged once at warn level.
    #[must_use]
    pub fn load(config: &CasegenConfig) -> Self {
        let path = config.corpus.path_buf();
        let snippets = match load_corpus(&path) {
            Ok(snippets) => snippets,
            Err(error) => return Self::degraded_with(&error),
        };

        let engine = match EmbeddingEngine::from_name(
            &config.embeddings.model,
            config.embeddings.resolved_cache_dir(),
        ) {
            Ok(engine) => engine,
            Err(error) => return Self::degraded_with(&SearchError::from(error)),
        };

        Self::from_parts(snippets, Box::new(engine))
    }

    /// Build an index over an explicit corpus and embedding backend.
    ///
    /// Any failure yields a degraded index, logged once at warn level.
    #[must_use]
    pub fn from_parts(snippets: Vec<ComplianceSnippet>, embedder: Box<dyn Embedder>) -> Self {
        match Self::build(snippets, embedder) {
            Ok(index) => index,
            Err(error) => Self::degraded_with(&error),
        }
    }

    /// An index that answers every query with nothing.
    #[must_use]
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            state: State::Degraded {
                reason: reason.into(),
            },
        }
    }

    fn degraded_with(error: &SearchError) -> Self {
        tracing::warn!(%error, "compliance index unavailable, retrieval disabled");
        Self::degraded(error.to_string())
    }

    fn build(
        snippets: Vec<ComplianceSnippet>,
        mut embedder: Box<dyn Embedder>,
    ) -> Result<Self, SearchError> {
        if snippets.is_empty() {
            return Err(SearchError::EmptyCorpus("<in-memory corpus>".into()));
        }

        let texts: Vec<String> = snippets.iter().map(|s| s.text.clone()).collect();
        let embedded = embedder.embed_batch(texts)?;
        if embedded.len() != snippets.len() {
            return Err(SearchError::CountMismatch {
                texts: snippets.len(),
                vectors: embedded.len(),
            });
        }

        let mut vectors = FlatL2Index::new(embedder.dimension());
        for vector in &embedded {
            vectors.add(vector)?;
        }

        tracing::info!(
            snippets = snippets.len(),
            dimension = vectors.dimension(),
            "compliance index ready"
        );

        Ok(Self {
            state: State::Ready {
                snippets,
                vectors,
                embedder: Mutex::new(embedder),
            },
        })
    }

    #[must_use]
    pub fn capability(&self) -> IndexCapability {
        match &self.state {
            State::Ready {
                snippets, vectors, ..
            } => IndexCapability::Ready {
                snippets: snippets.len(),
                dimension: vectors.dimension(),
            },
            State::Degraded { reason } => IndexCapability::Degraded {
                reason: reason.clone(),
            },
        }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self.state, State::Ready { .. })
    }

    /// Number of indexed snippets (0 when degraded).
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.state {
            State::Ready { snippets, .. } => snippets.len(),
            State::Degraded { .. } => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `top_k` snippets closest to `text`, closest first, each a fresh
    /// copy carrying `relevance = 1 / (1 + d)`.
    ///
    /// Returns an empty list when the index is degraded, `top_k` is 0, or the
    /// query cannot be embedded.
    #[must_use]
    pub fn query(&self, text: &str, top_k: usize) -> Vec<ComplianceSnippet> {
        let State::Ready {
            snippets,
            vectors,
            embedder,
        } = &self.state
        else {
            return Vec::new();
        };
        if top_k == 0 {
            return Vec::new();
        }

        let embedded = {
            let Ok(mut embedder) = embedder.lock() else {
                tracing::error!("embedding backend lock poisoned");
                return Vec::new();
            };
            embedder.embed_single(text)
        };
        let query_vector = match embedded {
            Ok(v) => v,
            Err(error) => {
                tracing::warn!(%error, "failed to embed compliance query");
                return Vec::new();
            }
        };

        match vectors.search(&query_vector, top_k) {
            Ok(hits) => hits
                .into_iter()
                .map(|hit| snippets[hit.position].with_relevance(hit.relevance()))
                .collect(),
            Err(error) => {
                tracing::warn!(%error, "compliance query failed");
                Vec::new()
            }
        }
    }
}

impl fmt::Debug for ComplianceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplianceIndex")
            .field("capability", &self.capability())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casegen_embeddings::EmbeddingError;
    use pretty_assertions::assert_eq;

    /// Counts occurrences of fixed keywords. Deterministic and model-free.
    struct KeywordEmbedder;

    const KEYWORDS: [&str; 4] = ["audit", "encrypt", "consent", "password"];

    impl Embedder for KeywordEmbedder {
        fn embed_batch(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(texts
                .iter()
                .map(|t| {
                    let lower = t.to_lowercase();
                    KEYWORDS
                        .iter()
                        .map(|k| lower.matches(k).count() as f32)
                        .collect()
                })
                .collect())
        }

        fn dimension(&self) -> usize {
            KEYWORDS.len()
        }
    }

    struct FailingEmbedder;

    impl Embedder for FailingEmbedder {
        fn embed_batch(&mut self, _texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Err(EmbeddingError::EmbedFailed("backend offline".into()))
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    /// Returns vectors of the wrong length.
    struct ShortEmbedder;

    impl Embedder for ShortEmbedder {
        fn embed_batch(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(texts.iter().map(|_| vec![1.0]).collect())
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    fn snippet(tag: &str, text: &str) -> ComplianceSnippet {
        ComplianceSnippet {
            tag: tag.into(),
            text: text.into(),
            source: "test".into(),
            relevance: None,
        }
    }

    fn corpus() -> Vec<ComplianceSnippet> {
        vec![
            snippet("HIPAA:Audit", "Maintain an audit trail of every audit event."),
            snippet("Security:Encryption", "Encrypt data at rest and encrypt in transit."),
            snippet("GDPR:Consent", "Obtain consent before processing."),
        ]
    }

    #[test]
    fn ready_index_reports_capability() {
        let index = ComplianceIndex::from_parts(corpus(), Box::new(KeywordEmbedder));
        assert!(index.is_available());
        assert_eq!(
            index.capability(),
            IndexCapability::Ready {
                snippets: 3,
                dimension: 4
            }
        );
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn closest_snippet_first() {
        let index = ComplianceIndex::from_parts(corpus(), Box::new(KeywordEmbedder));
        let results = index.query("Keep an audit log", 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].tag, "HIPAA:Audit");
    }

    #[test]
    fn relevance_decreases_with_rank() {
        let index = ComplianceIndex::from_parts(corpus(), Box::new(KeywordEmbedder));
        let results = index.query("encrypt everything", 3);
        let scores: Vec<f32> = results.iter().map(|r| r.relevance.unwrap()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert!(scores.iter().all(|s| *s > 0.0 && *s <= 1.0));
    }

    #[test]
    fn exact_vector_match_scores_one() {
        let index = ComplianceIndex::from_parts(corpus(), Box::new(KeywordEmbedder));
        let results = index.query("consent", 1);
        assert_eq!(results[0].tag, "GDPR:Consent");
        assert!((results[0].relevance.unwrap() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn top_k_larger_than_corpus() {
        let index = ComplianceIndex::from_parts(corpus(), Box::new(KeywordEmbedder));
        assert_eq!(index.query("audit", 10).len(), 3);
    }

    #[test]
    fn top_k_zero() {
        let index = ComplianceIndex::from_parts(corpus(), Box::new(KeywordEmbedder));
        assert!(index.query("audit", 0).is_empty());
    }

    #[test]
    fn equidistant_snippets_keep_corpus_order() {
        let index = ComplianceIndex::from_parts(corpus(), Box::new(KeywordEmbedder));
        // No keywords: every snippet is compared against the origin.
        let results = index.query("nothing relevant here", 3);
        let tags: Vec<&str> = results.iter().map(|r| r.tag.as_str()).collect();
        assert_eq!(tags, vec!["GDPR:Consent", "HIPAA:Audit", "Security:Encryption"]);
    }

    #[test]
    fn results_do_not_alias_corpus() {
        let index = ComplianceIndex::from_parts(corpus(), Box::new(KeywordEmbedder));
        let _ = index.query("audit", 3);
        let again = index.query("audit", 3);
        assert!(again.iter().all(|s| s.relevance.is_some()));
    }

    #[test]
    fn degraded_index_returns_nothing() {
        let index = ComplianceIndex::degraded("no corpus");
        assert!(!index.is_available());
        assert!(index.is_empty());
        assert!(index.query("audit", 3).is_empty());
        assert_eq!(
            index.capability(),
            IndexCapability::Degraded {
                reason: "no corpus".into()
            }
        );
    }

    #[test]
    fn embedding_failure_degrades() {
        let index = ComplianceIndex::from_parts(corpus(), Box::new(FailingEmbedder));
        assert!(!index.is_available());
        assert!(index.query("audit", 3).is_empty());
    }

    #[test]
    fn inconsistent_dimension_degrades() {
        let index = ComplianceIndex::from_parts(corpus(), Box::new(ShortEmbedder));
        assert!(matches!(
            index.capability(),
            IndexCapability::Degraded { reason } if reason.contains("dimension")
        ));
    }

    #[test]
    fn empty_corpus_degrades() {
        let index = ComplianceIndex::from_parts(Vec::new(), Box::new(KeywordEmbedder));
        assert!(!index.is_available());
        assert!(index.query("audit", 3).is_empty());
    }

    #[test]
    fn missing_corpus_file_degrades() {
        let mut config = CasegenConfig::default();
        config.corpus.path = "/nonexistent/compliance.json".into();
        let index = ComplianceIndex::load(&config);
        assert!(matches!(
            index.capability(),
            IndexCapability::Degraded { reason } if reason.contains("/nonexistent/compliance.json")
        ));
    }
}
