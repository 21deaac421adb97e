use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Priority;
use crate::errors::ValidationError;
use crate::ids::validate_id;

/// A single action within a test case and what it should produce.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TestStep {
    pub step_number: u32,
    pub description: String,
    pub expected_result: String,
}

impl TestStep {
    #[must_use]
    pub fn new(
        step_number: u32,
        description: impl Into<String>,
        expected_result: impl Into<String>,
    ) -> Self {
        Self {
            step_number,
            description: description.into(),
            expected_result: expected_result.into(),
        }
    }
}

/// Unchecked field values for a [`TestCase`].
///
/// Produced by the synthesizer after filling defaults, or by deserializing a
/// previously emitted test case. `TestCase::try_from` is the only way across.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TestCaseDraft {
    pub test_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub preconditions: Vec<String>,
    pub test_steps: Vec<TestStep>,
    pub expected_outcome: String,
    pub priority: String,
    #[serde(default)]
    pub requirement_id: Option<String>,
    #[serde(default)]
    pub compliance_tags: Vec<String>,
    /// Defaults to the construction time when absent.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A generated, validated test case.
///
/// Invariants: `test_id` (and `requirement_id` when present) match
/// `[A-Za-z0-9_-]+`, there is at least one step, every step number is
/// positive, and the priority is one of the three [`Priority`] values.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(try_from = "TestCaseDraft")]
pub struct TestCase {
    test_id: String,
    title: String,
    description: String,
    preconditions: Vec<String>,
    test_steps: Vec<TestStep>,
    expected_outcome: String,
    priority: Priority,
    requirement_id: Option<String>,
    compliance_tags: Vec<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<TestCaseDraft> for TestCase {
    type Error = ValidationError;

    fn try_from(draft: TestCaseDraft) -> Result<Self, Self::Error> {
        validate_id("test_id", &draft.test_id)?;
        if let Some(req_id) = &draft.requirement_id {
            validate_id("requirement_id", req_id)?;
        }
        let priority: Priority = draft.priority.parse()?;
        if draft.test_steps.is_empty() {
            return Err(ValidationError::NoSteps {
                test_id: draft.test_id,
            });
        }
        if draft.test_steps.iter().any(|step| step.step_number == 0) {
            return Err(ValidationError::InvalidStepNumber {
                test_id: draft.test_id,
            });
        }

        Ok(Self {
            test_id: draft.test_id,
            title: draft.title,
            description: draft.description,
            preconditions: draft.preconditions,
            test_steps: draft.test_steps,
            expected_outcome: draft.expected_outcome,
            priority,
            requirement_id: draft.requirement_id,
            compliance_tags: draft.compliance_tags,
            created_at: draft.created_at.unwrap_or_else(Utc::now),
        })
    }
}

impl TestCase {
    #[must_use]
    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn preconditions(&self) -> &[String] {
        &self.preconditions
    }

    #[must_use]
    pub fn test_steps(&self) -> &[TestStep] {
        &self.test_steps
    }

    #[must_use]
    pub fn expected_outcome(&self) -> &str {
        &self.expected_outcome
    }

    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    #[must_use]
    pub fn requirement_id(&self) -> Option<&str> {
        self.requirement_id.as_deref()
    }

    #[must_use]
    pub fn compliance_tags(&self) -> &[String] {
        &self.compliance_tags
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
