use std::path::PathBuf;

use clap::Parser;
use ref_config::RefConfig;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `refk` binary.
#[derive(Debug, Parser)]
#[command(
    name = "refk",
    version,
    about = "refkeep - keep a reference library consistent with its sources"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to `general.default_format`)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Library file (defaults to `library.path`)
    #[arg(short, long, global = true)]
    pub library: Option<PathBuf>,
}

impl Cli {
    /// Resolve global flags, falling back to configuration for the format.
    pub fn global_flags(&self, config: &RefConfig) -> anyhow::Result<GlobalFlags> {
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_config(&config.general.default_format)?,
        };
        Ok(GlobalFlags {
            format,
            quiet: self.quiet,
            library: self.library.clone(),
        })
    }
}
