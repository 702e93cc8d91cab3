use std::path::Path;

use anyhow::Context;
use ref_core::responses::FixInteractionResult;
use ref_fix::{ChoicePresenter, DeclineAll, Diagnostics, run_fix_interaction};
use ref_store::read_check_results;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FixArgs;
use crate::context::AppContext;
use crate::output;
use crate::presenter::{StderrDiagnostics, TerminalPresenter};

/// Handle `refk fix`.
pub async fn handle(args: &FixArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let diagnostics = StderrDiagnostics { quiet: flags.quiet };
    let library = flags.library.as_deref();

    let summary = if args.yes_skip {
        run(&args.results, ctx, library, &mut DeclineAll, &diagnostics).await?
    } else {
        let mut presenter = TerminalPresenter::stdio();
        run(&args.results, ctx, library, &mut presenter, &diagnostics).await?
    };

    output::output(&summary, flags.format)
}

pub async fn run(
    results: &Path,
    ctx: &AppContext,
    library: Option<&Path>,
    presenter: &mut dyn ChoicePresenter,
    diagnostics: &dyn Diagnostics,
) -> anyhow::Result<FixInteractionResult> {
    let results = read_check_results(results, &ctx.schemas)
        .with_context(|| format!("failed to read check results {}", results.display()))?;
    let mut library = ctx.open_library(library)?;

    run_fix_interaction(&results, &mut library, presenter, diagnostics)
        .await
        .with_context(|| format!("fix run did not complete for {}", library.path().display()))
}
