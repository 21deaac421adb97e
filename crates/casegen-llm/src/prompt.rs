//! Test case generation prompt.

/// System message sent with every generation request.
pub const SYSTEM_PROMPT: &str = "You are an expert test case generator for healthcare software. \
Generate comprehensive, detailed test cases that follow best practices for software testing.";

const EXAMPLE_OUTPUT: &str = r#"{
  "test_cases": [
    {
      "test_id": "TC-REQ-001-001",
      "title": "Verify login with valid credentials",
      "description": "Ensures user can log in successfully",
      "preconditions": ["User exists in system"],
      "test_steps": [
        {"step_number": 1, "description": "Navigate to login page", "expected_result": "Login page loads"},
        {"step_number": 2, "description": "Enter valid username and password", "expected_result": "Credentials are accepted"},
        {"step_number": 3, "description": "Click login button", "expected_result": "User is redirected to dashboard"}
      ],
      "expected_outcome": "User successfully logs in",
      "priority": "High",
      "compliance_tags": ["Security"]
    },
    {
      "test_id": "TC-REQ-001-002",
      "title": "Verify login with invalid credentials",
      "description": "Ensures system rejects invalid login attempts",
      "preconditions": ["User exists in system"],
      "test_steps": [
        {"step_number": 1, "description": "Navigate to login page", "expected_result": "Login page loads"},
        {"step_number": 2, "description": "Enter invalid username and password", "expected_result": "Credentials are rejected"},
        {"step_number": 3, "description": "Attempt to login", "expected_result": "Error message is displayed"}
      ],
      "expected_outcome": "System prevents unauthorized access",
      "priority": "High",
      "compliance_tags": ["Security"]
    },
    {
      "test_id": "TC-REQ-002-001",
      "title": "Verify account lock after 3 failed login attempts",
      "description": "Ensures account is locked after multiple failed login attempts",
      "preconditions": ["User account exists and is active"],
      "test_steps": [
        {"step_number": 1, "description": "Navigate to login page", "expected_result": "Login page loads"},
        {"step_number": 2, "description": "Enter incorrect password for first attempt", "expected_result": "Error message displayed"},
        {"step_number": 3, "description": "Enter incorrect password for second attempt", "expected_result": "Error message with warning displayed"},
        {"step_number": 4, "description": "Enter incorrect password for third attempt", "expected_result": "Account locked message displayed"}
      ],
      "expected_outcome": "Account is locked after 3 failed attempts",
      "priority": "High",
      "compliance_tags": ["Security"]
    }
  ]
}"#;

const CRITICAL_RULES: &str = "CRITICAL REQUIREMENTS:
- Generate AT LEAST 3 test cases per requirement
- Each test case MUST have MINIMUM 3 detailed test steps
- Cover positive cases (valid inputs), negative cases (invalid inputs), and edge cases
- Each step must be atomic and actionable with specific expected results
- Use appropriate compliance tags (HIPAA, Security, FHIR, etc.)
- Make test cases specific and measurable, NOT generic statements
- Ensure proper JSON formatting with no errors
- Respond with the JSON object only, with no prose or code fences before or after it
- If multiple requirements are provided, generate separate test cases for each requirement";

/// Render the user prompt for one requirement.
///
/// `compliance_tags` are appended to the `compliance_tags` field rule as
/// `Relevant compliance requirements: a, b`; with no tags the clause is left
/// out. Pure: the same inputs always render the same text.
#[must_use]
pub fn build_test_case_prompt(requirement_text: &str, compliance_tags: &[String]) -> String {
    let mut prompt = String::with_capacity(4096);

    prompt.push_str(
        "You are an expert QA engineer. Generate detailed test cases for each requirement separately.\n\n",
    );
    prompt.push_str("Requirements: ");
    prompt.push_str(requirement_text);
    prompt.push_str("\n\n");

    prompt.push_str("Rules:\n");
    prompt.push_str("1. Create AT LEAST 3 test cases for EACH requirement.\n");
    prompt.push_str("2. Each test case MUST have:\n");
    prompt.push_str("   - test_id (format: TC-REQ-XXX-YYY where XXX is requirement number and YYY is test case number)\n");
    prompt.push_str("   - title (clear, descriptive title)\n");
    prompt.push_str("   - description (detailed explanation of what is being tested)\n");
    prompt.push_str("   - preconditions (list of conditions that must be met before test execution)\n");
    prompt.push_str("   - test_steps (MINIMUM 3 steps per case, each with step_number, description, expected_result)\n");
    prompt.push_str("   - expected_outcome (overall expected result of the test)\n");
    prompt.push_str("   - priority (High/Medium/Low)\n");
    prompt.push_str("   - compliance_tags (e.g., HIPAA, Security, PCI if relevant)");
    if !compliance_tags.is_empty() {
        prompt.push_str("\n\nRelevant compliance requirements: ");
        prompt.push_str(&compliance_tags.join(", "));
    }
    prompt.push('\n');
    prompt.push_str(
        "3. Do NOT merge multiple requirements into one. Each requirement should generate its own set of test cases.\n",
    );
    prompt.push_str("4. Output must be strict JSON in this format:\n\n");
    prompt.push_str(EXAMPLE_OUTPUT);
    prompt.push_str("\n\n");
    prompt.push_str(CRITICAL_RULES);

    prompt.trim().to_string()
}
