//! Search error types for casegen-search.

use std::path::PathBuf;

/// Errors raised while building the compliance index.
///
/// None of these reach `ComplianceIndex::query`: a failed build leaves the
/// index in degraded mode instead.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The corpus file could not be read.
    #[error("cannot read corpus at {path}: {source}")]
    CorpusIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The corpus file is not a JSON array of `{tag, text, source}` records.
    #[error("invalid corpus at {path}: {source}")]
    CorpusFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The corpus file holds no records.
    #[error("corpus at {0} is empty")]
    EmptyCorpus(PathBuf),

    /// Error from the embedding engine (fastembed/ONNX).
    #[error("embedding error: {0}")]
    Embedding(#[from] casegen_embeddings::EmbeddingError),

    /// A vector did not have the index dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The backend returned a different number of vectors than texts.
    #[error("embedding count mismatch: {texts} texts, {vectors} vectors")]
    CountMismatch { texts: usize, vectors: usize },
}
