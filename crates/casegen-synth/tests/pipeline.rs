//! End-to-end synthesis with in-process generators and embedders.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use casegen_core::entities::ComplianceSnippet;
use casegen_core::enums::Priority;
use casegen_embeddings::{Embedder, EmbeddingError};
use casegen_llm::TextGenerator;
use casegen_search::ComplianceIndex;
use casegen_synth::{SynthSettings, Synthesizer};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── Fakes ──────────────────────────────────────────────────────────

/// Answers every prompt with the output of a closure.
struct FnGenerator<F>(F);

#[async_trait]
impl<F> TextGenerator for FnGenerator<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    async fn generate(&self, prompt: &str, _max_output_tokens: Option<u32>) -> String {
        (self.0)(prompt)
    }
}

/// Records prompts and token limits, answers with a fixed string.
#[derive(Default)]
struct RecordingGenerator {
    output: String,
    calls: Mutex<Vec<(String, Option<u32>)>>,
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, prompt: &str, max_output_tokens: Option<u32>) -> String {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), max_output_tokens));
        self.output.clone()
    }
}

/// Delays each answer; requirements mentioning "slow" take longest.
struct DelayedGenerator;

#[async_trait]
impl TextGenerator for DelayedGenerator {
    async fn generate(&self, prompt: &str, _max_output_tokens: Option<u32>) -> String {
        let delay = if prompt.contains("slow") { 150 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        valid_response(1)
    }
}

const KEYWORDS: [&str; 3] = ["audit", "encrypt", "consent"];

struct KeywordEmbedder;

impl Embedder for KeywordEmbedder {
    fn embed_batch(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts
            .iter()
            .map(|t| {
                let lower = t.to_lowercase();
                KEYWORDS
                    .iter()
                    .map(|k| if lower.contains(k) { 1.0 } else { 0.0 })
                    .collect()
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        KEYWORDS.len()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn snippet(tag: &str, text: &str) -> ComplianceSnippet {
    ComplianceSnippet {
        tag: tag.into(),
        text: text.into(),
        source: "test".into(),
        relevance: None,
    }
}

fn keyword_index() -> Arc<ComplianceIndex> {
    Arc::new(ComplianceIndex::from_parts(
        vec![
            snippet("HIPAA:Audit", "Keep an audit trail."),
            snippet("Security:Encryption", "Encrypt data at rest."),
            snippet("GDPR:Consent", "Record consent."),
        ],
        Box::new(KeywordEmbedder),
    ))
}

fn no_index() -> Arc<ComplianceIndex> {
    Arc::new(ComplianceIndex::degraded("disabled in tests"))
}

fn settings(top_k: usize, concurrency: usize) -> SynthSettings {
    SynthSettings {
        top_k,
        concurrency,
        max_output_tokens: Some(777),
    }
}

fn synthesizer(
    index: Arc<ComplianceIndex>,
    generator: impl TextGenerator + 'static,
    settings: SynthSettings,
) -> Synthesizer {
    Synthesizer::new(index, Arc::new(generator), settings)
}

fn step(n: u32) -> serde_json::Value {
    json!({"step_number": n, "description": format!("step {n}"), "expected_result": "ok"})
}

/// `count` complete entries without explicit ids.
fn valid_response(count: usize) -> String {
    let entries: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "title": format!("case {i}"),
                "description": "d",
                "preconditions": [],
                "test_steps": [step(1), step(2), step(3)],
                "expected_outcome": "works",
                "priority": "high"
            })
        })
        .collect();
    json!({ "test_cases": entries }).to_string()
}

// ── Scenarios ──────────────────────────────────────────────────────

#[tokio::test]
async fn tagged_input_generates_per_requirement() {
    let synth = synthesizer(no_index(), FnGenerator(|_: &str| valid_response(2)), settings(3, 1));
    let (cases, reqs) = synth
        .generate_test_cases("REQ-001: Do X.\n\nREQ-002: Do Y.")
        .await;

    let req_ids: Vec<&str> = reqs.iter().map(|r| r.id()).collect();
    assert_eq!(req_ids, vec!["REQ-001", "REQ-002"]);

    let case_ids: Vec<&str> = cases.iter().map(|c| c.test_id()).collect();
    assert_eq!(
        case_ids,
        vec![
            "TC-REQ-001-001",
            "TC-REQ-001-002",
            "TC-REQ-002-001",
            "TC-REQ-002-002"
        ]
    );
    assert!(cases.iter().all(|c| c.priority() == Priority::High));
    assert_eq!(cases[2].requirement_id(), Some("REQ-002"));
}

#[tokio::test]
async fn numbered_input_ids_are_unpadded() {
    let synth = synthesizer(no_index(), FnGenerator(|_: &str| valid_response(1)), settings(3, 1));
    let (_, reqs) = synth.generate_test_cases("1. Do X.\n2. Do Y.").await;
    let ids: Vec<&str> = reqs.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["REQ-1", "REQ-2"]);
}

#[tokio::test]
async fn empty_output_falls_back() {
    let synth = synthesizer(no_index(), FnGenerator(|_: &str| String::new()), settings(3, 1));
    let (cases, reqs) = synth.generate_test_cases("REQ-001: Do X.").await;

    assert_eq!(reqs.len(), 1);
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].test_id(), "TC-REQ-001-001");
    assert_eq!(cases[0].title(), "Basic Test for REQ-001");
    assert_eq!(cases[0].priority(), Priority::Medium);
}

#[tokio::test]
async fn fenced_empty_list_falls_back() {
    let synth = synthesizer(
        no_index(),
        FnGenerator(|_: &str| "```json\n{\"test_cases\": []}\n```".to_string()),
        settings(3, 1),
    );
    let (cases, _) = synth.generate_test_cases("REQ-001: Do X.").await;
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].test_id(), "TC-REQ-001-001");
    assert_eq!(cases[0].title(), "Basic Test for REQ-001");
}

#[tokio::test]
async fn unusable_outputs_fall_back() {
    for output in [
        "I'm sorry, I can't help with that.",
        r#"{"cases": [1, 2]}"#,
        r#"{"test_cases": "none"}"#,
        "[1, 2, 3]",
    ] {
        let owned = output.to_string();
        let synth = synthesizer(no_index(), FnGenerator(move |_: &str| owned.clone()), settings(3, 1));
        let (cases, _) = synth.generate_test_cases("REQ-5: Something.").await;
        assert_eq!(cases.len(), 1, "output {output:?}");
        assert_eq!(cases[0].title(), "Basic Test for REQ-5");
    }
}

// ── Entry handling ─────────────────────────────────────────────────

#[tokio::test]
async fn invalid_entry_is_dropped_siblings_kept() {
    let output = json!({
        "test_cases": [
            {"title": "first", "test_steps": [step(1)]},
            {"title": "bad priority", "test_steps": [step(1)], "priority": "Urgent"},
            {"title": "third", "test_steps": [step(1)]}
        ]
    })
    .to_string();
    let synth = synthesizer(no_index(), FnGenerator(move |_: &str| output.clone()), settings(3, 1));
    let (cases, _) = synth.generate_test_cases("REQ-001: Do X.").await;

    let ids: Vec<&str> = cases.iter().map(|c| c.test_id()).collect();
    assert_eq!(ids, vec!["TC-REQ-001-001", "TC-REQ-001-003"]);
}

#[tokio::test]
async fn all_entries_invalid_falls_back() {
    let output = json!({
        "test_cases": [
            {"title": "no steps"},
            {"title": "zero step", "test_steps": [{"step_number": 0}]}
        ]
    })
    .to_string();
    let synth = synthesizer(no_index(), FnGenerator(move |_: &str| output.clone()), settings(3, 1));
    let (cases, _) = synth.generate_test_cases("REQ-001: Do X.").await;
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].title(), "Basic Test for REQ-001");
}

#[tokio::test]
async fn sparse_entry_gets_defaults() {
    let output = json!({"test_cases": [{"test_steps": [{}]}]}).to_string();
    let synth = synthesizer(no_index(), FnGenerator(move |_: &str| output.clone()), settings(3, 1));
    let (cases, _) = synth.generate_test_cases("REQ-001: Do X.").await;

    let case = &cases[0];
    assert_eq!(case.test_id(), "TC-REQ-001-001");
    assert_eq!(case.title(), "Test for REQ-001");
    assert_eq!(case.description(), "Do X.");
    assert_eq!(case.expected_outcome(), "Test passes");
    assert_eq!(case.priority(), Priority::Medium);
    assert_eq!(case.test_steps()[0].step_number, 1);
}

// ── Retrieval ──────────────────────────────────────────────────────

#[tokio::test]
async fn retrieved_tags_reach_prompt_and_defaults() {
    let generator = Arc::new(RecordingGenerator {
        output: json!({"test_cases": [{"test_steps": [step(1)]}]}).to_string(),
        ..RecordingGenerator::default()
    });
    let synth = Synthesizer::new(keyword_index(), generator.clone(), settings(1, 1));
    let (cases, _) = synth
        .generate_test_cases("REQ-1: Write an audit entry for every read.")
        .await;

    assert_eq!(cases[0].compliance_tags(), ["HIPAA:Audit".to_string()]);
    let calls = generator.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.contains("Relevant compliance requirements: HIPAA:Audit"));
    assert_eq!(calls[0].1, Some(777));
}

#[tokio::test]
async fn entry_tags_override_retrieved_tags() {
    let output = json!({"test_cases": [{"test_steps": [step(1)], "compliance_tags": ["PCI"]}]}).to_string();
    let synth = synthesizer(keyword_index(), FnGenerator(move |_: &str| output.clone()), settings(1, 1));
    let (cases, _) = synth.generate_test_cases("REQ-1: Encrypt card data.").await;
    assert_eq!(cases[0].compliance_tags(), ["PCI".to_string()]);
}

#[tokio::test]
async fn degraded_index_omits_compliance_clause() {
    let generator = Arc::new(RecordingGenerator {
        output: valid_response(1),
        ..RecordingGenerator::default()
    });
    let synth = Synthesizer::new(no_index(), generator.clone(), settings(3, 1));
    let (cases, _) = synth.generate_test_cases("REQ-1: Write an audit entry.").await;

    assert!(cases[0].compliance_tags().is_empty());
    let calls = generator.calls.lock().unwrap();
    assert!(!calls[0].0.contains("Relevant compliance requirements"));
}

// ── Isolation and ordering ─────────────────────────────────────────

#[tokio::test]
async fn panic_in_one_requirement_is_contained() {
    let synth = synthesizer(
        no_index(),
        FnGenerator(|prompt: &str| {
            assert!(!prompt.contains("explode"), "generator blew up");
            valid_response(1)
        }),
        settings(3, 1),
    );
    let (cases, reqs) = synth
        .generate_test_cases("REQ-1: Normal.\nREQ-2: Please explode.\nREQ-3: Normal again.")
        .await;

    assert_eq!(reqs.len(), 3);
    let titles: Vec<&str> = cases.iter().map(|c| c.title()).collect();
    assert_eq!(titles, vec!["case 0", "Basic Test for REQ-2", "case 0"]);
}

#[tokio::test]
async fn concurrent_generation_keeps_document_order() {
    let synth = synthesizer(no_index(), DelayedGenerator, settings(3, 3));
    let (cases, _) = synth
        .generate_test_cases("REQ-1: This one is slow.\nREQ-2: Fast.\nREQ-3: Fast too.")
        .await;

    let owners: Vec<Option<&str>> = cases.iter().map(|c| c.requirement_id()).collect();
    assert_eq!(owners, vec![Some("REQ-1"), Some("REQ-2"), Some("REQ-3")]);
}

#[tokio::test]
async fn blank_input_yields_nothing() {
    let generator = Arc::new(RecordingGenerator::default());
    let synth = Synthesizer::new(no_index(), generator.clone(), settings(3, 1));
    let (cases, reqs) = synth.generate_test_cases("  \n\t ").await;
    assert!(cases.is_empty());
    assert!(reqs.is_empty());
    assert!(generator.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn every_requirement_gets_at_least_one_case() {
    let outputs = ["", "not json", r#"{"test_cases": []}"#];
    for output in outputs {
        let owned = output.to_string();
        let synth = synthesizer(no_index(), FnGenerator(move |_: &str| owned.clone()), settings(3, 2));
        let (cases, reqs) = synth
            .generate_test_cases("1. Alpha.\n2. Beta.\n3. Gamma.\n4. Delta.")
            .await;
        assert_eq!(reqs.len(), 4);
        for req in &reqs {
            assert!(
                cases.iter().any(|c| c.requirement_id() == Some(req.id())),
                "{} has no test case for output {output:?}",
                req.id()
            );
        }
    }
}
