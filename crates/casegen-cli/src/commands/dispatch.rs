use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Generate(args) => commands::generate::handle(&args, ctx, flags).await,
        Commands::Split(args) => commands::split::handle(&args, flags),
        Commands::Prompt(args) => commands::prompt::handle(&args, ctx, flags).await,
        Commands::Compliance(args) => commands::compliance::handle(&args, ctx, flags).await,
        Commands::Config => commands::config::handle(ctx, flags),
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
