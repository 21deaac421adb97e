//! Compliance corpus loading.

use std::path::Path;

use casegen_core::entities::ComplianceSnippet;

use crate::error::SearchError;

/// Read a corpus file: a JSON array of `{tag, text, source}` records.
///
/// # Errors
///
/// Returns [`SearchError::CorpusIo`] if the file cannot be read,
/// [`SearchError::CorpusFormat`] if it is not a valid array of records, and
/// [`SearchError::EmptyCorpus`] if the array is empty.
pub fn load_corpus(path: &Path) -> Result<Vec<ComplianceSnippet>, SearchError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SearchError::CorpusIo {
        path: path.to_path_buf(),
        source,
    })?;

    let mut snippets: Vec<ComplianceSnippet> =
        serde_json::from_str(&raw).map_err(|source| SearchError::CorpusFormat {
            path: path.to_path_buf(),
            source,
        })?;

    if snippets.is_empty() {
        return Err(SearchError::EmptyCorpus(path.to_path_buf()));
    }

    // Scores belong to query results only.
    for snippet in &mut snippets {
        snippet.relevance = None;
    }

    tracing::debug!(path = %path.display(), count = snippets.len(), "loaded compliance corpus");
    Ok(snippets)
}
