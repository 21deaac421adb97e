//! Conversion of one model-produced test case entry into a [`TestCaseDraft`].
//!
//! Missing or `null` fields take defaults derived from the requirement.
//! Fields present with the wrong JSON type reject the entry.

use casegen_core::entities::{Requirement, TestCaseDraft, TestStep};
use casegen_core::enums::Priority;
use casegen_core::ids::test_case_id;
use serde_json::{Map, Value};

/// Why an entry could not become a draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("entry is not a JSON object")]
    NotAnObject,

    #[error("field `{field}` should be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

pub(crate) const DEFAULT_EXPECTED_OUTCOME: &str = "Test passes";

/// Build a draft from the entry at 1-based `position`.
///
/// `requirement_id` is always the requirement's own id, whatever the entry
/// says. `compliance_tags` defaults to `retrieved_tags`.
///
/// # Errors
///
/// Returns [`EntryError`] if the entry is not an object or a present field
/// has the wrong type.
pub fn draft_from_entry(
    entry: &Value,
    position: usize,
    requirement: &Requirement,
    retrieved_tags: &[String],
) -> Result<TestCaseDraft, EntryError> {
    let object = entry.as_object().ok_or(EntryError::NotAnObject)?;

    let test_steps = match field(object, "test_steps") {
        Some(Value::Array(steps)) => steps.iter().map(step_from_value).collect::<Result<_, _>>()?,
        Some(_) => {
            return Err(EntryError::WrongType {
                field: "test_steps",
                expected: "an array",
            });
        }
        None => Vec::new(),
    };

    Ok(TestCaseDraft {
        test_id: string_or(object, "test_id", || test_case_id(requirement.id(), position))?,
        title: string_or(object, "title", || format!("Test for {}", requirement.id()))?,
        description: string_or(object, "description", || requirement.text().to_string())?,
        preconditions: strings_or(object, "preconditions", Vec::new)?,
        test_steps,
        expected_outcome: string_or(object, "expected_outcome", || {
            DEFAULT_EXPECTED_OUTCOME.to_string()
        })?,
        priority: string_or(object, "priority", || Priority::Medium.as_str().to_string())?,
        requirement_id: Some(requirement.id().to_string()),
        compliance_tags: strings_or(object, "compliance_tags", || retrieved_tags.to_vec())?,
        created_at: None,
    })
}

fn step_from_value(value: &Value) -> Result<TestStep, EntryError> {
    let object = value.as_object().ok_or(EntryError::WrongType {
        field: "test_steps",
        expected: "an array of objects",
    })?;

    let step_number = match field(object, "step_number") {
        None => 1,
        Some(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or(EntryError::WrongType {
                field: "step_number",
                expected: "a non-negative integer",
            })?,
    };

    Ok(TestStep {
        step_number,
        description: string_or(object, "description", String::new)?,
        expected_result: string_or(object, "expected_result", String::new)?,
    })
}

/// A present, non-null field.
fn field<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name).filter(|v| !v.is_null())
}

fn string_or(
    object: &Map<String, Value>,
    name: &'static str,
    default: impl FnOnce() -> String,
) -> Result<String, EntryError> {
    match field(object, name) {
        None => Ok(default()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(EntryError::WrongType {
            field: name,
            expected: "a string",
        }),
    }
}

fn strings_or(
    object: &Map<String, Value>,
    name: &'static str,
    default: impl FnOnce() -> Vec<String>,
) -> Result<Vec<String>, EntryError> {
    let wrong = EntryError::WrongType {
        field: name,
        expected: "an array of strings",
    };
    match field(object, name) {
        None => Ok(default()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(|| wrong.clone()))
            .collect(),
        Some(_) => Err(wrong),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn requirement() -> Requirement {
        Requirement::new("REQ-004", "Passwords must be hashed.").unwrap()
    }

    fn tags() -> Vec<String> {
        vec!["Security".to_string()]
    }

    #[test]
    fn complete_entry_is_copied() {
        let entry = json!({
            "test_id": "TC-REQ-004-001",
            "title": "Hash on save",
            "description": "Stored password is a hash",
            "preconditions": ["User exists"],
            "test_steps": [
                {"step_number": 1, "description": "Set password", "expected_result": "Saved"}
            ],
            "expected_outcome": "No plaintext stored",
            "priority": "High",
            "compliance_tags": ["HIPAA"]
        });
        let draft = draft_from_entry(&entry, 1, &requirement(), &tags()).unwrap();
        assert_eq!(draft.test_id, "TC-REQ-004-001");
        assert_eq!(draft.title, "Hash on save");
        assert_eq!(draft.preconditions, vec!["User exists".to_string()]);
        assert_eq!(draft.test_steps, vec![TestStep::new(1, "Set password", "Saved")]);
        assert_eq!(draft.priority, "High");
        assert_eq!(draft.compliance_tags, vec!["HIPAA".to_string()]);
        assert_eq!(draft.requirement_id.as_deref(), Some("REQ-004"));
    }

    #[test]
    fn empty_entry_takes_defaults() {
        let draft = draft_from_entry(&json!({}), 2, &requirement(), &tags()).unwrap();
        assert_eq!(draft.test_id, "TC-REQ-004-002");
        assert_eq!(draft.title, "Test for REQ-004");
        assert_eq!(draft.description, "Passwords must be hashed.");
        assert!(draft.preconditions.is_empty());
        assert!(draft.test_steps.is_empty());
        assert_eq!(draft.expected_outcome, "Test passes");
        assert_eq!(draft.priority, "Medium");
        assert_eq!(draft.compliance_tags, tags());
    }

    #[test]
    fn null_fields_take_defaults() {
        let entry = json!({"title": null, "compliance_tags": null, "priority": null});
        let draft = draft_from_entry(&entry, 1, &requirement(), &tags()).unwrap();
        assert_eq!(draft.title, "Test for REQ-004");
        assert_eq!(draft.priority, "Medium");
        assert_eq!(draft.compliance_tags, tags());
    }

    #[test]
    fn empty_tag_list_is_kept() {
        let entry = json!({"compliance_tags": []});
        let draft = draft_from_entry(&entry, 1, &requirement(), &tags()).unwrap();
        assert!(draft.compliance_tags.is_empty());
    }

    #[test]
    fn step_defaults() {
        let entry = json!({"test_steps": [{}]});
        let draft = draft_from_entry(&entry, 1, &requirement(), &tags()).unwrap();
        assert_eq!(draft.test_steps, vec![TestStep::new(1, "", "")]);
    }

    #[test]
    fn entry_requirement_id_is_overridden() {
        let entry = json!({"requirement_id": "REQ-999"});
        let draft = draft_from_entry(&entry, 1, &requirement(), &tags()).unwrap();
        assert_eq!(draft.requirement_id.as_deref(), Some("REQ-004"));
    }

    #[test]
    fn non_object_entry() {
        assert_eq!(
            draft_from_entry(&json!("a test"), 1, &requirement(), &tags()).unwrap_err(),
            EntryError::NotAnObject
        );
    }

    #[test]
    fn wrong_types_reject() {
        let cases = [
            json!({"title": 5}),
            json!({"test_steps": "do things"}),
            json!({"test_steps": ["step one"]}),
            json!({"test_steps": [{"step_number": -1}]}),
            json!({"test_steps": [{"step_number": "1"}]}),
            json!({"preconditions": "User exists"}),
            json!({"compliance_tags": [1, 2]}),
        ];
        for entry in cases {
            assert!(
                draft_from_entry(&entry, 1, &requirement(), &tags()).is_err(),
                "expected rejection for {entry}"
            );
        }
    }
}
