use bourse_config::BourseConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(
    command: &Commands,
    config: &BourseConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Init(args) => commands::init::handle(args, config, flags),
        Commands::Validate => commands::validate::handle(config, flags),
        Commands::Servers => commands::servers::handle(config, flags),
        Commands::Routes(args) => commands::routes::handle(args, config, flags),
        Commands::Policy => commands::policy::handle(config, flags),
        Commands::Schema(args) => commands::schema::handle(args, flags),
        Commands::Doctor => commands::doctor::handle(config, flags).await,
    }
}
