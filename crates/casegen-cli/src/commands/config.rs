use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `casegen config`. The API key never leaves the process unmasked.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.config.redacted(), flags.format)
}
