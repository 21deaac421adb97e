//! # casegen-synth
//!
//! Test case synthesis for casegen.
//!
//! Splits a requirements document into [`Requirement`](casegen_core::entities::Requirement)s
//! ([`segment`]), retrieves related compliance tags for each from a
//! [`ComplianceIndex`](casegen_search::ComplianceIndex), asks a
//! [`TextGenerator`](casegen_llm::TextGenerator) for test cases, and turns the
//! recovered JSON into validated [`TestCase`](casegen_core::entities::TestCase)s.
//!
//! Generation is total: a requirement whose flow fails for any reason gets a
//! single [`fallback_test_case`].

pub mod entry;
pub mod error;
pub mod fallback;
pub mod segment;
pub mod synthesizer;

pub use error::SynthError;
pub use fallback::fallback_test_case;
pub use segment::{Segmentation, Strategy, StrategyOutcome, segment, split_requirements};
pub use synthesizer::{SynthSettings, Synthesizer};
