use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Compare(args) => commands::compare::handle(&args, ctx, flags),
        Commands::Dupes(args) => commands::dupes::handle(&args, ctx, flags),
        Commands::Fix(args) => commands::fix::handle(&args, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, ctx, flags),
    }
}
