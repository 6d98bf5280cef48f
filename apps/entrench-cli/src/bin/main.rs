use anyhow::Context;
use clap::Parser;
use tracing::info;

use entrench_cli::cli::{run_assemble, run_lemmatize, Cli, Command};
use entrench_cli::env_check::{setup_project_dirs, verify_environment};
use entrench_cli::logging::init_tracing;
use entrench_core::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match cli.env.as_deref() {
        Some(env) => Config::load_for_env(env),
        None => Config::load(),
    }
    .context("Error loading config")?;
    let config = config.pipeline()?;
    init_tracing(&config.logging)?;

    match &cli.command {
        Command::Verify => {
            verify_environment(&config)?;
            setup_project_dirs(&config.paths)?;
            info!("Project configuration validated successfully");
        }
        Command::Assemble(args) => {
            let out = run_assemble(&config, args)?;
            info!(path = %out.display(), "Corpus written");
        }
        Command::Lemmatize(args) => {
            let out = run_lemmatize(&config, args)?;
            info!(path = %out.display(), "Lemmas written");
        }
    }
    Ok(())
}
