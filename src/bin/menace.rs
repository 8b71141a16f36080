//! MENACE CLI - train, evaluate and inspect matchbox agents
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` to see matchbox
//! restocking and per-worker summaries.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

#[derive(Parser)]
#[command(name = "menace")]
#[command(version, about = "Matchbox learning for noughts and crosses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a MENACE agent against a fixed opponent
    Train(Box<menace::cli::commands::train::TrainArgs>),

    /// Evaluate a trained agent without learning
    Evaluate(menace::cli::commands::evaluate::EvaluateArgs),

    /// Show the learned state table of a saved agent
    Inspect(menace::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => menace::cli::commands::train::execute(*args),
        Commands::Evaluate(args) => menace::cli::commands::evaluate::execute(args),
        Commands::Inspect(args) => menace::cli::commands::inspect::execute(args),
    }
}
