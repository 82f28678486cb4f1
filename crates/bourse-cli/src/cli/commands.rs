use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Write a starter manifest.
    Init(InitArgs),
    /// Validate the manifest structure and cross-references.
    Validate,
    /// List declared connectors.
    Servers,
    /// List storage routes.
    Routes(RoutesArgs),
    /// Show declared security and performance policies.
    Policy,
    /// Print a JSON Schema.
    Schema(SchemaArgs),
    /// Check local prerequisites of every connector.
    Doctor,
}

#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing manifest.
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Debug, Args)]
pub struct RoutesArgs {
    /// Only routes of this integration.
    #[arg(long)]
    pub integration: Option<String>,

    /// Only routes of this tier: primary, persistent, versioned.
    #[arg(long)]
    pub tier: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name.
    #[arg(default_value = "manifest")]
    pub name: String,

    /// List registered schema names instead.
    #[arg(long)]
    pub list: bool,
}
