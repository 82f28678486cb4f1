use clap::Parser;

pub mod commands;
pub mod global;

pub use commands::Commands;
pub use global::{ColorMode, GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `bourse` binary.
#[derive(Debug, Parser)]
#[command(
    name = "bourse",
    version,
    about = "Bourse - MCP connector manifests for market-analysis assistants"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Manifest path (defaults to general.manifest_path)
    #[arg(short, long, global = true)]
    pub manifest: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Table coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            manifest: self.manifest.clone(),
            quiet: self.quiet,
            color: self.color,
        }
    }
}
