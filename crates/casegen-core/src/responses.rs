//! CLI response types returned as JSON by `casegen` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ComplianceSnippet, Requirement, TestCase};

/// Response from `casegen generate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TestCaseResponse {
    pub test_cases: Vec<TestCase>,
    pub count: usize,
    pub source_requirements: Vec<Requirement>,
}

impl TestCaseResponse {
    #[must_use]
    pub fn new(test_cases: Vec<TestCase>, source_requirements: Vec<Requirement>) -> Self {
        Self {
            count: test_cases.len(),
            test_cases,
            source_requirements,
        }
    }
}

/// Response from `casegen split`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SplitResponse {
    /// Name of the segmentation strategy that produced the units.
    pub strategy: String,
    pub requirements: Vec<Requirement>,
}

/// One rendered prompt from `casegen prompt`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub req_id: String,
    pub compliance_tags: Vec<String>,
    pub prompt: String,
}

/// Response from `casegen compliance`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ComplianceQueryResponse {
    pub query: String,
    pub available: bool,
    pub results: Vec<ComplianceSnippet>,
}
