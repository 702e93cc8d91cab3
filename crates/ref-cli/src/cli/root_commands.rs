use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Diff a local record against a remote metadata snapshot.
    Compare(CompareArgs),
    /// Check a candidate record for duplicates in the library.
    Dupes(DupesArgs),
    /// Walk check results and apply fixes interactively.
    Fix(FixArgs),
    /// List schemas, or print one by name.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct CompareArgs {
    /// CSL-JSON record file, or the citation key of a library record.
    #[arg(long)]
    pub local: String,
    /// Remote metadata snapshot (JSON).
    #[arg(long)]
    pub remote: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct DupesArgs {
    /// CSL-JSON record about to be added.
    #[arg(long)]
    pub candidate: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct FixArgs {
    /// Check results (`.jsonl` or JSON array).
    #[arg(long)]
    pub results: PathBuf,
    /// Answer every prompt with "no selection".
    #[arg(long)]
    pub yes_skip: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub name: Option<String>,
}
