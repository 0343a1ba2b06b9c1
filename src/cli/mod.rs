//! Command-line interface.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::level::{LevelArgs, XpArgs};
use commands::replay::ReplayArgs;

#[derive(Parser)]
#[command(name = "questlog")]
#[command(about = "Questlog - XP, levels and quest completion bonuses", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .questlog/config.yaml)
    #[arg(short, long, global = true, env = "QUESTLOG_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the level and progress for a total XP amount
    Level(LevelArgs),
    /// Show the XP breakdown for a difficulty
    Xp(XpArgs),
    /// Replay scripted quest operations and report the XP events
    Replay(ReplayArgs),
}

/// Print a command error and exit with a failure status.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({ "success": false, "error": format!("{err:#}") });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
