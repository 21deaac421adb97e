//! Entity structs for the generation pipeline.
//!
//! Types with invariants (`Requirement`, `TestCase`) keep their fields private
//! and are only built through validating constructors; deserialization runs
//! the same checks. All structs derive `Serialize` and `JsonSchema`.

mod compliance;
mod requirement;
mod test_case;

pub use compliance::ComplianceSnippet;
pub use requirement::Requirement;
pub use test_case::{TestCase, TestCaseDraft, TestStep};
