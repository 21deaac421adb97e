//! Identifier formats.
//!
//! Requirement and test case ids share one alphabet: `[A-Za-z0-9_-]+`.
//! Formatting helpers keep the `REQ-` / `TC-` conventions in one place.

use crate::errors::ValidationError;

/// Prefix used for requirement ids produced by segmentation.
pub const REQUIREMENT_PREFIX: &str = "REQ";

/// Prefix used for generated test case ids.
pub const TEST_CASE_PREFIX: &str = "TC";

/// Whether `value` is a non-empty run of `[A-Za-z0-9_-]`.
#[must_use]
pub fn is_valid_id(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Check an id, naming the field in the error.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidId`] when `value` is empty or contains
/// characters outside the id alphabet.
pub fn validate_id(kind: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_valid_id(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidId {
            kind,
            value: value.to_string(),
        })
    }
}

/// `REQ-<suffix>`, e.g. `REQ-001` or `REQ-7`.
#[must_use]
pub fn requirement_id(suffix: &str) -> String {
    format!("{REQUIREMENT_PREFIX}-{suffix}")
}

/// `TC-<req_id>-<seq>` with the sequence zero-padded to three digits.
#[must_use]
pub fn test_case_id(req_id: &str, seq: usize) -> String {
    format!("{TEST_CASE_PREFIX}-{req_id}-{seq:03}")
}
