use std::io::Read;
use std::path::Path;

use anyhow::{Context, bail};

use crate::cli::root_commands::InputArgs;

/// Resolve the requirements text from inline text, a file, or stdin (`-`).
pub fn read_input(args: &InputArgs) -> anyhow::Result<String> {
    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) if path == Path::new("-") => read_stdin()?,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read requirements from {}", path.display()))?,
        (None, None) => bail!("provide requirements text or --file <PATH> (use - for stdin)"),
    };

    if text.trim().is_empty() {
        bail!("requirements input is empty");
    }
    Ok(text)
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read requirements from stdin")?;
    Ok(buffer)
}
