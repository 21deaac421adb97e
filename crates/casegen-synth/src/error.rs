//! Synthesis error types.

/// Reasons a requirement's generation flow ends in the fallback test case.
///
/// These never reach callers of [`crate::Synthesizer`]; they are logged with
/// the requirement id and replaced by [`crate::fallback_test_case`].
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// The generator returned no text.
    #[error("generator returned no output")]
    EmptyCompletion,

    /// Output was not recoverable as a JSON object.
    #[error("could not parse generator output as a JSON object")]
    Unparseable,

    /// The object had no non-empty `test_cases` array.
    #[error("response contained no test cases")]
    NoTestCases,

    /// Every entry in `test_cases` failed validation.
    #[error("all {rejected} test case entries were invalid")]
    AllEntriesInvalid { rejected: usize },

    /// The compliance lookup task did not complete.
    #[error("compliance retrieval failed: {0}")]
    Retrieval(String),
}
