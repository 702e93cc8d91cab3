use anyhow::bail;
use serde_json::Value;

use crate::cli::root_commands::SchemaArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output;

/// Handle `refk schema`.
pub fn handle(args: &SchemaArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(name) = args.name.as_deref() else {
        return output::output(&ctx.schemas.list(), flags.format);
    };

    let schema = lookup(ctx, name)?;
    // Schemas are nested documents; a key/value table of them is unreadable.
    let format = match flags.format {
        OutputFormat::Table => OutputFormat::Json,
        other => other,
    };
    output::output(schema, format)
}

fn lookup<'a>(ctx: &'a AppContext, name: &str) -> anyhow::Result<&'a Value> {
    match ctx.schemas.get(name) {
        Some(schema) => Ok(schema),
        None => bail!(
            "unknown schema '{name}' (available: {})",
            ctx.schemas.list().join(", ")
        ),
    }
}
