//! # casegen-embeddings
//!
//! Local sentence embeddings for casegen using fastembed (ONNX runtime).
//!
//! Turns compliance snippets and requirement texts into fixed-dimension float
//! vectors without any external API key.
//!
//! ## Models
//!
//! The default is [`ModelKind::AllMiniLmL6V2`] (sentence-transformers/all-MiniLM-L6-v2):
//! - 384-dimensional output vectors
//! - Mean pooling (no query/passage prefix needed)
//! - ~80MB model size, cached under the configured cache directory
//!
//! ## Async usage
//!
//! The fastembed ONNX runtime is synchronous. When calling from async code,
//! wrap calls in `tokio::task::spawn_blocking`.
//!
//! ## Seam
//!
//! Consumers depend on the [`Embedder`] trait, not on [`EmbeddingEngine`], so
//! the index can be built over any backend (tests use small deterministic ones).

pub mod error;

pub use error::EmbeddingError;
use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
use std::path::PathBuf;

/// A text embedding backend.
///
/// `&mut self` because the ONNX session is not reentrant; share behind a `Mutex`.
pub trait Embedder: Send {
    /// Embed a batch of texts. Returns one vector per input, in order.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::EmbedFailed`] if inference fails.
    fn embed_batch(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Length of every vector this backend produces.
    fn dimension(&self) -> usize;

    /// Embed a single text.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::EmbedFailed`] if inference fails, or
    /// [`EmbeddingError::EmptyResult`] if the backend returns no vectors.
    fn embed_single(&mut self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut results = self.embed_batch(vec![text.to_string()])?;
        results.pop().ok_or(EmbeddingError::EmptyResult)
    }
}

/// Sentence embedding models casegen knows how to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    AllMiniLmL6V2,
    AllMiniLmL12V2,
    BgeSmallEnV15,
    BgeBaseEnV15,
}

impl ModelKind {
    /// Resolve a configured model name. Accepts the bare name or the
    /// `org/name` form used on the Hugging Face hub.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::UnsupportedModel`] for anything else.
    pub fn from_name(name: &str) -> Result<Self, EmbeddingError> {
        let bare = name.rsplit('/').next().unwrap_or(name).to_ascii_lowercase();
        match bare.as_str() {
            "all-minilm-l6-v2" => Ok(Self::AllMiniLmL6V2),
            "all-minilm-l12-v2" => Ok(Self::AllMiniLmL12V2),
            "bge-small-en-v1.5" => Ok(Self::BgeSmallEnV15),
            "bge-base-en-v1.5" => Ok(Self::BgeBaseEnV15),
            _ => Err(EmbeddingError::UnsupportedModel(name.to_string())),
        }
    }

    #[must_use]
    pub const fn dimension(self) -> usize {
        match self {
            Self::AllMiniLmL6V2 | Self::AllMiniLmL12V2 | Self::BgeSmallEnV15 => 384,
            Self::BgeBaseEnV15 => 768,
        }
    }

    const fn fastembed_model(self) -> EmbeddingModel {
        match self {
            Self::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
            Self::AllMiniLmL12V2 => EmbeddingModel::AllMiniLML12V2,
            Self::BgeSmallEnV15 => EmbeddingModel::BGESmallENV15,
            Self::BgeBaseEnV15 => EmbeddingModel::BGEBaseENV15,
        }
    }
}

/// Local embedding engine backed by fastembed (ONNX runtime).
///
/// Model files are downloaded on first use and cached in `cache_dir`.
pub struct EmbeddingEngine {
    model: TextEmbedding,
    kind: ModelKind,
}

impl EmbeddingEngine {
    /// Load `kind`, downloading it into `cache_dir` if it is not there yet.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::InitFailed`] if model download or ONNX initialization fails.
    pub fn new(kind: ModelKind, cache_dir: PathBuf) -> Result<Self, EmbeddingError> {
        tracing::debug!(?kind, cache_dir = %cache_dir.display(), "loading embedding model");

        let model = TextEmbedding::try_new(
            TextInitOptions::new(kind.fastembed_model())
                .with_cache_dir(cache_dir)
                .with_show_download_progress(false),
        )
        .map_err(|e| EmbeddingError::InitFailed(e.to_string()))?;

        Ok(Self { model, kind })
    }

    /// Resolve `model_name` and load it.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::UnsupportedModel`] for an unknown name, or
    /// [`EmbeddingError::InitFailed`] if loading fails.
    pub fn from_name(model_name: &str, cache_dir: PathBuf) -> Result<Self, EmbeddingError> {
        Self::new(ModelKind::from_name(model_name)?, cache_dir)
    }

    #[must_use]
    pub const fn kind(&self) -> ModelKind {
        self.kind
    }
}

impl Embedder for EmbeddingEngine {
    fn embed_batch(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.model
            .embed(texts, None)
            .map_err(|e| EmbeddingError::EmbedFailed(e.to_string()))
    }

    fn dimension(&self) -> usize {
        self.kind.dimension()
    }
}
