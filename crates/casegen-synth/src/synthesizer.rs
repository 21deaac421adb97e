//! Requirement → test case pipeline.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use casegen_config::CasegenConfig;
use casegen_core::entities::{Requirement, TestCase};
use casegen_llm::{TextGenerator, build_test_case_prompt, safe_parse_json};
use casegen_search::ComplianceIndex;
use futures::{FutureExt, StreamExt, stream};
use serde_json::Value;

use crate::entry::draft_from_entry;
use crate::error::SynthError;
use crate::fallback::fallback_test_case;
use crate::segment::split_requirements;

/// Knobs for one [`Synthesizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthSettings {
    /// Compliance snippets retrieved per requirement.
    pub top_k: usize,
    /// Requirements generated at once. Output order is unaffected.
    pub concurrency: usize,
    /// Completion length limit; `None` leaves it to the generator.
    pub max_output_tokens: Option<u32>,
}

impl Default for SynthSettings {
    fn default() -> Self {
        Self {
            top_k: 3,
            concurrency: 1,
            max_output_tokens: None,
        }
    }
}

impl SynthSettings {
    #[must_use]
    pub const fn from_config(config: &CasegenConfig) -> Self {
        Self {
            top_k: config.general.top_k,
            concurrency: config.general.concurrency,
            max_output_tokens: Some(config.llm.max_tokens),
        }
    }
}

/// Turns requirements into test cases using a compliance index and a text
/// generator. Every requirement yields at least one test case.
pub struct Synthesizer {
    index: Arc<ComplianceIndex>,
    generator: Arc<dyn TextGenerator>,
    settings: SynthSettings,
}

impl Synthesizer {
    #[must_use]
    pub fn new(
        index: Arc<ComplianceIndex>,
        generator: Arc<dyn TextGenerator>,
        settings: SynthSettings,
    ) -> Self {
        Self {
            index,
            generator,
            settings,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> SynthSettings {
        self.settings
    }

    /// Segment `text` and generate test cases for every requirement.
    ///
    /// Test cases are grouped by requirement in document order. Blank input,
    /// or input with no usable units, yields two empty lists.
    pub async fn generate_test_cases(&self, text: &str) -> (Vec<TestCase>, Vec<Requirement>) {
        let requirements = split_requirements(text);
        if requirements.is_empty() {
            tracing::warn!("no requirements found in input");
            return (Vec::new(), Vec::new());
        }
        tracing::info!(count = requirements.len(), "split input into requirements");

        let per_requirement: Vec<Vec<TestCase>> = stream::iter(&requirements)
            .map(|requirement| self.generate_for_requirement(requirement))
            .buffered(self.settings.concurrency.max(1))
            .collect()
            .await;

        let test_cases: Vec<TestCase> = per_requirement.into_iter().flatten().collect();
        tracing::info!(count = test_cases.len(), "generated test cases");
        (test_cases, requirements)
    }

    /// Generate test cases for one requirement. Never empty: any failure,
    /// including a panic inside the flow, yields the fallback test case.
    pub async fn generate_for_requirement(&self, requirement: &Requirement) -> Vec<TestCase> {
        match AssertUnwindSafe(self.try_generate(requirement))
            .catch_unwind()
            .await
        {
            Ok(Ok(test_cases)) => {
                tracing::info!(
                    req_id = %requirement.id(),
                    count = test_cases.len(),
                    "generated test cases for requirement"
                );
                test_cases
            }
            Ok(Err(error)) => {
                tracing::error!(req_id = %requirement.id(), %error, "using fallback test case");
                vec![fallback_test_case(requirement)]
            }
            Err(panic) => {
                tracing::error!(
                    req_id = %requirement.id(),
                    panic = %panic_message(panic.as_ref()),
                    "generation panicked, using fallback test case"
                );
                vec![fallback_test_case(requirement)]
            }
        }
    }

    async fn try_generate(&self, requirement: &Requirement) -> Result<Vec<TestCase>, SynthError> {
        let tags = self.compliance_tags(requirement.text()).await?;
        tracing::debug!(req_id = %requirement.id(), ?tags, "retrieved compliance tags");

        let prompt = build_test_case_prompt(requirement.text(), &tags);
        let output = self
            .generator
            .generate(&prompt, self.settings.max_output_tokens)
            .await;
        if output.trim().is_empty() {
            return Err(SynthError::EmptyCompletion);
        }

        let response = safe_parse_json(&output);
        if response.is_empty() {
            return Err(SynthError::Unparseable);
        }
        let entries = match response.get("test_cases") {
            Some(Value::Array(entries)) if !entries.is_empty() => entries,
            _ => return Err(SynthError::NoTestCases),
        };

        let mut test_cases = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let position = i + 1;
            let draft = match draft_from_entry(entry, position, requirement, &tags) {
                Ok(draft) => draft,
                Err(error) => {
                    tracing::warn!(req_id = %requirement.id(), position, %error, "dropping test case entry");
                    continue;
                }
            };
            match TestCase::try_from(draft) {
                Ok(test_case) => test_cases.push(test_case),
                Err(error) => {
                    tracing::warn!(req_id = %requirement.id(), position, %error, "dropping invalid test case");
                }
            }
        }

        if test_cases.is_empty() {
            return Err(SynthError::AllEntriesInvalid {
                rejected: entries.len(),
            });
        }
        Ok(test_cases)
    }

    /// Tags of the closest compliance snippets. The index blocks on the
    /// embedding backend, so the query runs on the blocking pool.
    async fn compliance_tags(&self, text: &str) -> Result<Vec<String>, SynthError> {
        if !self.index.is_available() || self.settings.top_k == 0 {
            return Ok(Vec::new());
        }

        let index = Arc::clone(&self.index);
        let text = text.to_string();
        let top_k = self.settings.top_k;
        let snippets = tokio::task::spawn_blocking(move || index.query(&text, top_k))
            .await
            .map_err(|e| SynthError::Retrieval(e.to_string()))?;

        Ok(snippets.into_iter().map(|s| s.tag).collect())
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
