use std::path::Path;

use anyhow::Context;
use ref_core::entities::BibliographicRecord;
use ref_core::responses::DuplicateResult;
use ref_match::detect_duplicates;
use ref_store::read_json;
use serde::Serialize;

use crate::cli::root_commands::DupesArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output;

/// One table row per match.
#[derive(Debug, Serialize)]
struct MatchRow<'a> {
    #[serde(rename = "type")]
    kind: String,
    id: &'a str,
    title: Option<&'a str>,
}

/// Handle `refk dupes`.
pub fn handle(args: &DupesArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = run(args, ctx, flags.library.as_deref())?;

    if flags.format == OutputFormat::Table {
        if !result.is_duplicate {
            println!("no duplicates");
            return Ok(());
        }
        let rows: Vec<MatchRow<'_>> = result
            .matches
            .iter()
            .map(|m| MatchRow {
                kind: m.kind.to_string(),
                id: &m.existing.id,
                title: m.existing.title.as_deref(),
            })
            .collect();
        return output::output(&rows, flags.format);
    }
    output::output(&result, flags.format)
}

pub fn run(
    args: &DupesArgs,
    ctx: &AppContext,
    library: Option<&Path>,
) -> anyhow::Result<DuplicateResult> {
    let candidate: BibliographicRecord = read_json(&args.candidate)
        .with_context(|| format!("failed to read candidate {}", args.candidate.display()))?;
    let library = ctx.open_library(library)?;

    let result = detect_duplicates(&candidate, library.records());
    tracing::debug!(
        id = %candidate.id,
        matches = result.matches.len(),
        "duplicate check finished"
    );
    Ok(result)
}
