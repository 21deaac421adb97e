//! Validation errors for the entity types.
//!
//! `ValidationError` is raised by the validating constructors of the entity
//! types. Each other crate defines its own error enum (`LlmError`,
//! `SearchError`, ...).

use thiserror::Error;

/// A construction-time check on an entity failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Identifier contains characters outside `[A-Za-z0-9_-]` or is empty.
    #[error("invalid {kind} '{value}': only alphanumeric characters, underscores, and hyphens are allowed")]
    InvalidId { kind: &'static str, value: String },

    /// Priority is not one of High, Medium, Low (any ASCII case).
    #[error("invalid priority '{0}': must be one of High, Medium, Low")]
    InvalidPriority(String),

    /// A test case must carry at least one step.
    #[error("test case '{test_id}' has no test steps")]
    NoSteps { test_id: String },

    /// Step numbers are positive.
    #[error("test case '{test_id}' has a step numbered 0")]
    InvalidStepNumber { test_id: String },

    /// A requirement must carry some text.
    #[error("requirement '{req_id}' has empty text")]
    EmptyRequirement { req_id: String },
}
