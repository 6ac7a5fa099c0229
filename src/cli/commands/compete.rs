//! Compete command - Play trained learners against a random player

use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    cli::output::{create_game_progress, format_number, print_kv, print_section, print_subsection},
    pipeline::{CompeteConfig, SideReport, compete_against_random},
    ports::AgentRepository,
    td_learning::LearnerKind,
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Compete trained learners against a random player")]
pub struct CompeteArgs {
    /// Number of games to play per side
    #[arg(long, short = 'g', default_value_t = 20_000)]
    pub num_games: usize,

    /// Learner type (TD or TDS)
    #[arg(long, short = 'l', default_value = "TD")]
    pub learning_type: LearnerKind,

    /// Directory holding the trained agents
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Random seed for the random player
    #[arg(long)]
    pub seed: Option<u64>,
}

fn print_side(side: Player, report: &SideReport) {
    print_subsection(&format!("{side} Results"));
    print_kv(
        "Losses",
        &format!(
            "{} ({:.2}%)",
            format_number(report.losses),
            report.loss_percentage()
        ),
    );

    if !report.losing_moves.is_empty() {
        println!("  Losing moves:");
        for moves in &report.losing_moves {
            let moves: Vec<String> = moves.iter().map(ToString::to_string).collect();
            println!("  - {}", moves.join(", "));
        }
    }
}

pub fn execute(args: CompeteArgs) -> Result<()> {
    let repository = MsgPackRepository::new(&args.data_dir);
    let mut x_agent = repository
        .load(args.learning_type, Player::X)
        .with_context(|| format!("Failed to load {} X learner", args.learning_type))?;
    let mut o_agent = repository
        .load(args.learning_type, Player::O)
        .with_context(|| format!("Failed to load {} O learner", args.learning_type))?;

    let config = CompeteConfig {
        num_games: args.num_games,
        seed: args.seed,
    };

    print_section(&format!(
        "{} vs Random Player",
        args.learning_type.description()
    ));
    print_kv("Games per side", &format_number(config.num_games));

    let pb = create_game_progress(config.num_games as u64)?;
    let report = compete_against_random(&config, &mut x_agent, &mut o_agent, |_| pb.inc(1))?;
    pb.finish_and_clear();

    print_side(Player::X, &report.x);
    print_side(Player::O, &report.o);

    let report_path = args
        .data_dir
        .join(format!("{}LosingResults.json", args.learning_type.file_stem()));
    let file = File::create(&report_path)
        .with_context(|| format!("Failed to create {}", report_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &report)
        .context("Failed to write competition report")?;
    println!();
    print_kv("Report", &report_path.display().to_string());

    Ok(())
}
