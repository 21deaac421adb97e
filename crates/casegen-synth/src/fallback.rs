//! Placeholder test case used whenever generation does not produce one.

use casegen_core::entities::{Requirement, TestCase, TestCaseDraft, TestStep};
use casegen_core::enums::Priority;
use casegen_core::ids::test_case_id;

/// The single test case emitted for a requirement when generation fails.
///
/// # Panics
///
/// Never in practice: requirement ids are validated on construction, so the
/// derived test id is always valid.
#[must_use]
pub fn fallback_test_case(requirement: &Requirement) -> TestCase {
    let draft = TestCaseDraft {
        test_id: test_case_id(requirement.id(), 1),
        title: format!("Basic Test for {}", requirement.id()),
        description: format!("Basic test case for requirement: {}", requirement.text()),
        preconditions: vec![
            "System is available".to_string(),
            "User has appropriate permissions".to_string(),
        ],
        test_steps: vec![TestStep::new(
            1,
            "Execute the functionality described in the requirement",
            "Functionality works as expected",
        )],
        expected_outcome: "Requirement is satisfied".to_string(),
        priority: Priority::Medium.as_str().to_string(),
        requirement_id: Some(requirement.id().to_string()),
        compliance_tags: Vec::new(),
        created_at: None,
    };
    TestCase::try_from(draft).expect("fallback test case derived from a valid requirement")
}
