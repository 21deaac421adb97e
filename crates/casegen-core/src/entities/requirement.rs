use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::ids::validate_id;

/// One independently testable statement extracted from a requirements document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(try_from = "RawRequirement")]
pub struct Requirement {
    #[serde(rename = "req_id")]
    id: String,
    text: String,
}

/// Unchecked wire form of [`Requirement`].
#[derive(Deserialize, JsonSchema)]
struct RawRequirement {
    req_id: String,
    text: String,
}

impl TryFrom<RawRequirement> for Requirement {
    type Error = ValidationError;

    fn try_from(raw: RawRequirement) -> Result<Self, Self::Error> {
        Self::new(raw.req_id, raw.text)
    }
}

impl Requirement {
    /// Build a requirement, checking the id alphabet and that the text is not blank.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidId`] for a malformed id and
    /// [`ValidationError::EmptyRequirement`] for blank text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let text = text.into();
        validate_id("req_id", &id)?;
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyRequirement { req_id: id });
        }
        Ok(Self { id, text })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
