use casegen_core::entities::{ComplianceSnippet, Requirement, TestCase};
use casegen_core::responses::TestCaseResponse;
use schemars::{Schema, schema_for};

use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::cli::{GlobalFlags, OutputFormat};

/// Handle `casegen schema`. Always JSON; a table view of a schema is not useful.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_of(args.type_name);
    let rendered = match flags.format {
        OutputFormat::Raw => serde_json::to_string(&schema)?,
        OutputFormat::Json | OutputFormat::Table => serde_json::to_string_pretty(&schema)?,
    };
    println!("{rendered}");
    Ok(())
}

fn schema_of(type_name: SchemaType) -> Schema {
    match type_name {
        SchemaType::TestCaseResponse => schema_for!(TestCaseResponse),
        SchemaType::TestCase => schema_for!(TestCase),
        SchemaType::Requirement => schema_for!(Requirement),
        SchemaType::ComplianceSnippet => schema_for!(ComplianceSnippet),
    }
}
