use std::path::PathBuf;

use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

impl OutputFormat {
    /// Parse `general.default_format` from configuration.
    pub fn from_config(value: &str) -> anyhow::Result<Self> {
        <Self as ValueEnum>::from_str(value, true).map_err(|_| {
            anyhow::anyhow!(
                "invalid general.default_format '{value}': expected json, table or raw"
            )
        })
    }
}

/// Global flags resolved against configuration, handed to every command.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub library: Option<PathBuf>,
}
