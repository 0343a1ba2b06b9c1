//! Questlog CLI entry point.

use anyhow::Result;
use clap::Parser;

use questlog::cli::commands::{level, replay};
use questlog::cli::{handle_error, Cli, Commands};
use questlog::infrastructure::config::ConfigLoader;
use questlog::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli.command, cli.config, cli.json).await {
        handle_error(&err, cli.json);
    }
}

async fn run(command: Commands, config_path: Option<std::path::PathBuf>, json: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&config.logging)?;

    match command {
        Commands::Level(args) => level::level(&args, json),
        Commands::Xp(args) => level::xp(&args, json),
        Commands::Replay(args) => replay::execute(args, &config, json).await,
    }
}
