//! The sample corpus shipped in `data/` loads and indexes.

use std::path::PathBuf;

use casegen_config::CasegenConfig;
use casegen_search::ComplianceIndex;
use casegen_search::corpus::load_corpus;

fn sample_corpus_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join("data")
        .join("compliance_snippets.json")
}

#[test]
fn sample_corpus_is_well_formed() {
    let snippets = load_corpus(&sample_corpus_path()).unwrap();
    assert!(snippets.len() >= 10);
    assert!(
        snippets
            .iter()
            .all(|s| !s.tag.is_empty() && !s.text.is_empty() && !s.source.is_empty())
    );
    assert!(snippets.iter().any(|s| s.tag.starts_with("HIPAA")));
}

#[test]
#[ignore = "downloads the ~80MB all-MiniLM-L6-v2 model"]
fn sample_corpus_retrieves_related_snippets() {
    let mut config = CasegenConfig::default();
    config.corpus.path = sample_corpus_path().to_string_lossy().into_owned();

    let index = ComplianceIndex::load(&config);
    assert!(index.is_available(), "{:?}", index.capability());

    let results = index.query("Log every access to patient records for later review", 3);
    assert_eq!(results.len(), 3);
    assert!(
        results.iter().any(|s| s.tag.contains("Audit")),
        "expected an audit snippet in {results:?}"
    );
}
