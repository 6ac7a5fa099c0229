//! tdttt CLI - Temporal-difference learners for tic-tac-toe
//!
//! This CLI provides a unified interface for:
//! - Training X and O learners by self-play and against a random player
//! - Competing trained learners against a random player
//! - Playing console games against trained learners

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tdttt")]
#[command(version, about = "Temporal-difference learning for tic-tac-toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train X and O learners
    Train(td_tictactoe::cli::commands::train::TrainArgs),

    /// Compete trained learners against a random player
    Compete(td_tictactoe::cli::commands::compete::CompeteArgs),

    /// Play in the console
    Play(td_tictactoe::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => td_tictactoe::cli::commands::train::execute(args),
        Commands::Compete(args) => td_tictactoe::cli::commands::compete::execute(args),
        Commands::Play(args) => td_tictactoe::cli::commands::play::execute(args),
    }
}
