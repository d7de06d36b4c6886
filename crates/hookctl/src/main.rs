mod cli;
mod commands;
mod config;
mod transforms;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    hookable::init_logging();

    let cli = Cli::parse();

    // Handle init command early (doesn't need config)
    if let Commands::Init { path } = &cli.command {
        return commands::init::run_init(path);
    }

    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init { .. } => unreachable!(),
        Commands::Run { input } => commands::run::execute(input, cli.json, &config).await?,
        Commands::Trace { input } => commands::trace::execute(input, cli.json, &config).await?,
        Commands::List => commands::list::execute(cli.json)?,
    }

    Ok(())
}
