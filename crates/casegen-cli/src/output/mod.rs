use casegen_config::CasegenConfig;
use casegen_core::entities::TestCase;
use casegen_core::responses::{
    ComplianceQueryResponse, RenderedPrompt, SplitResponse, TestCaseResponse,
};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Column layout of a response when printed with `--format table`.
pub trait TableView {
    fn headers(&self) -> Vec<&'static str>;
    fn rows(&self) -> Vec<Vec<String>>;
}

/// Render a response to a string in the requested format.
pub fn render<T>(value: &T, format: OutputFormat) -> anyhow::Result<String>
where
    T: Serialize + TableView,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let rows = value.rows();
            if rows.is_empty() {
                return Ok(String::from("(no rows)"));
            }
            let prefs = ui::prefs();
            let options = table::TableOptions {
                max_width: prefs.term_width,
                color: prefs.table_color,
            };
            Ok(table::render_table(&value.headers(), &rows, options))
        }
    }
}

/// Print a response to stdout in the requested format.
pub fn output<T>(value: &T, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + TableView,
{
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

impl TableView for TestCaseResponse {
    fn headers(&self) -> Vec<&'static str> {
        vec!["test_id", "requirement_id", "priority", "steps", "tags", "title"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.test_cases.iter().map(test_case_row).collect()
    }
}

fn test_case_row(test_case: &TestCase) -> Vec<String> {
    vec![
        test_case.test_id().to_string(),
        test_case.requirement_id().unwrap_or("-").to_string(),
        test_case.priority().to_string(),
        test_case.test_steps().len().to_string(),
        join_or_dash(test_case.compliance_tags()),
        test_case.title().to_string(),
    ]
}

impl TableView for SplitResponse {
    fn headers(&self) -> Vec<&'static str> {
        vec!["req_id", "strategy", "text"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.requirements
            .iter()
            .map(|requirement| {
                vec![
                    requirement.id().to_string(),
                    self.strategy.clone(),
                    requirement.text().to_string(),
                ]
            })
            .collect()
    }
}

impl TableView for Vec<RenderedPrompt> {
    fn headers(&self) -> Vec<&'static str> {
        vec!["req_id", "tags", "prompt"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|rendered| {
                vec![
                    rendered.req_id.clone(),
                    join_or_dash(&rendered.compliance_tags),
                    rendered.prompt.clone(),
                ]
            })
            .collect()
    }
}

impl TableView for ComplianceQueryResponse {
    fn headers(&self) -> Vec<&'static str> {
        vec!["tag", "relevance", "source", "text"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        if !self.available {
            return vec![vec![
                "unavailable".to_string(),
                "-".to_string(),
                "-".to_string(),
                "compliance index could not be loaded".to_string(),
            ]];
        }
        self.results
            .iter()
            .map(|snippet| {
                vec![
                    snippet.tag.clone(),
                    snippet
                        .relevance
                        .map_or_else(|| "-".to_string(), |r| format!("{r:.3}")),
                    snippet.source.clone(),
                    snippet.text.clone(),
                ]
            })
            .collect()
    }
}

impl TableView for CasegenConfig {
    fn headers(&self) -> Vec<&'static str> {
        vec!["key", "value"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        if let Ok(value) = serde_json::to_value(self) {
            flatten_into(&mut rows, "", &value);
        }
        rows
    }
}

/// Dotted-path key/value rows for nested objects.
fn flatten_into(rows: &mut Vec<Vec<String>>, prefix: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(rows, &path, child);
            }
        }
        other => rows.push(vec![prefix.to_string(), value_to_cell(other)]),
    }
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::String(v) => v.clone(),
        other => other.to_string(),
    }
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        String::from("-")
    } else {
        items.join(", ")
    }
}
