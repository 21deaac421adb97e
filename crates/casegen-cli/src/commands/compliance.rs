use casegen_core::responses::ComplianceQueryResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ComplianceArgs;
use crate::context::{AppContext, query_index};
use crate::output::output;

/// Handle `casegen compliance`.
pub async fn handle(args: &ComplianceArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let top_k = args.top_k.unwrap_or(ctx.config.general.top_k);
    let index = ctx.load_index().await?;

    let results = query_index(&index, &args.text, top_k).await?;
    tracing::debug!(count = results.len(), top_k, "compliance query finished");

    let response = ComplianceQueryResponse {
        query: args.text.clone(),
        available: index.is_available(),
        results,
    };
    output(&response, flags.format)
}
