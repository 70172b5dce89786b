use super::args::{Cli, Commands, ConfigCommand};
use super::handlers;
use crate::logging;
use agdiff_runtime::{Config, resolve_config_path};
use anyhow::{Context, Result};
use tracing::debug;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let config_path = resolve_config_path(cli.config.as_deref())?;
    debug!(path = %config_path.display(), "resolved config path");

    match cli.command {
        Commands::Config { command } => match command {
            ConfigCommand::Show => {
                let config = Config::load_from(&config_path)?;
                handlers::config::show(&config, &config_path, cli.format)
            }
            ConfigCommand::Init { force } => handlers::config::init(&config_path, force),
        },

        Commands::Compare(args) => {
            let config = load_config(&config_path)?;
            handlers::compare::handle(&config, args, cli.format)
        }

        Commands::Batch(args) => {
            let config = load_config(&config_path)?;
            handlers::batch::handle(&config, args, cli.format)
        }
    }
}

fn load_config(path: &std::path::Path) -> Result<Config> {
    let config = Config::load_from(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
