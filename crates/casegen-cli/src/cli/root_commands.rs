use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Generate test cases for every requirement in the input.
    Generate(GenerateArgs),
    /// Show how the input is split into requirements.
    Split(InputArgs),
    /// Render the generation prompt for each requirement (no model call).
    Prompt(InputArgs),
    /// Query the compliance index.
    Compliance(ComplianceArgs),
    /// Show the effective configuration with secrets redacted.
    Config,
    /// Print the JSON schema of an output type.
    Schema(SchemaArgs),
}

/// Where requirements text comes from.
#[derive(Clone, Debug, Args)]
pub struct InputArgs {
    /// Requirements text. Omit when using --file.
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read requirements from a file (`-` for stdin).
    #[arg(long, short = 'i', value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Requirements generated at once (overrides general.concurrency).
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct ComplianceArgs {
    /// Text to match against the compliance corpus.
    pub text: String,

    /// Number of snippets to return (defaults to general.top_k).
    #[arg(long, short = 'k')]
    pub top_k: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type whose schema to print.
    #[arg(value_enum, default_value_t = SchemaType::TestCaseResponse)]
    pub type_name: SchemaType,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    TestCaseResponse,
    TestCase,
    Requirement,
    ComplianceSnippet,
}
