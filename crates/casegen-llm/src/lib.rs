//! # casegen-llm
//!
//! Language model access for casegen.
//!
//! - [`prompt`]: renders the test case generation prompt and system message.
//! - [`client`]: the [`TextGenerator`] seam and [`ChatClient`], an
//!   OpenAI-compatible chat completions client built on reqwest.
//! - [`normalize`]: recovers a JSON object from loosely formatted model output.
//!
//! Generation never fails from the caller's point of view: errors are logged
//! and surface as empty output.

pub mod client;
pub mod normalize;
pub mod prompt;

mod error;
mod http;

pub use client::{ChatClient, TextGenerator};
pub use error::LlmError;
pub use normalize::safe_parse_json;
pub use prompt::{SYSTEM_PROMPT, build_test_case_prompt};
