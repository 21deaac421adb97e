//! # casegen-search
//!
//! Compliance snippet retrieval for casegen.
//!
//! Loads the compliance corpus (a JSON array of `{tag, text, source}`
//! records), embeds every snippet with a [`casegen_embeddings::Embedder`],
//! and answers nearest-neighbor queries with a flat L2 index.
//!
//! - [`ComplianceIndex`]: the shared, read-only index. Degrades to "no
//!   results" when the corpus or embedding model is unavailable.
//! - [`vector::FlatL2Index`]: brute-force squared-L2 vector store.
//! - [`corpus::load_corpus`]: corpus file reader.

pub mod corpus;
pub mod error;
pub mod index;
pub mod vector;

pub use error::SearchError;
pub use index::{ComplianceIndex, IndexCapability};
