use std::path::Path;

use anyhow::Context;
use ref_core::entities::{BibliographicRecord, RemoteMetadata};
use ref_core::responses::MetadataComparisonResult;
use ref_store::read_json;

use crate::cli::root_commands::CompareArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output;

/// Handle `refk compare`.
pub fn handle(args: &CompareArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = run(args, ctx, flags.library.as_deref())?;

    if flags.format == OutputFormat::Table {
        println!("classification: {}", result.classification);
        if !result.field_diffs.is_empty() {
            println!();
            output::output(&result.field_diffs, flags.format)?;
        }
        return Ok(());
    }
    output::output(&result, flags.format)
}

pub fn run(
    args: &CompareArgs,
    ctx: &AppContext,
    library: Option<&Path>,
) -> anyhow::Result<MetadataComparisonResult> {
    let local = load_local(&args.local, ctx, library)?;
    let remote: RemoteMetadata = read_json(&args.remote)
        .with_context(|| format!("failed to read remote metadata {}", args.remote.display()))?;

    Ok(ctx.comparator().compare(&local, &remote))
}

/// `local` is a record file if one exists at that path, else a citation key.
fn load_local(
    local: &str,
    ctx: &AppContext,
    library: Option<&Path>,
) -> anyhow::Result<BibliographicRecord> {
    let path = Path::new(local);
    if path.is_file() {
        return read_json(path).with_context(|| format!("failed to read record {local}"));
    }

    let library = ctx.open_library(library)?;
    let record = library.require(local).with_context(|| {
        format!(
            "'{local}' is neither a record file nor a key in {}",
            library.path().display()
        )
    })?;
    Ok(record.clone())
}
