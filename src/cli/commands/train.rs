//! Train command - Train a pair of X and O learners

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    cli::output::{create_training_progress, format_number, print_kv, print_section},
    pipeline::{BatchKind, Trainer, TrainerConfig},
    ports::{AgentRepository, Trainable},
    td_learning::{LearnerKind, TdAgent, TdParams},
};

#[derive(Parser, Debug)]
#[command(about = "Train an X and an O learner")]
pub struct TrainArgs {
    /// Number of games to play per batch kind
    #[arg(long, short = 'g', default_value_t = 20_000)]
    pub num_games: usize,

    /// Number of games per statistics batch
    #[arg(long, short = 'b', default_value_t = 1_000)]
    pub num_batches: usize,

    /// Learner type (TD or TDS)
    #[arg(long, short = 'l', default_value = "TD")]
    pub learning_type: LearnerKind,

    /// Learning rate
    #[arg(long, short = 'a')]
    pub alpha: Option<f64>,

    /// Exploration rate
    #[arg(long, short = 'e')]
    pub epsilon: Option<f64>,

    /// Reward for a draw when playing X
    #[arg(long, short = 'x')]
    pub x_draw_reward: Option<f64>,

    /// Reward for a draw when playing O
    #[arg(long, short = 'o')]
    pub o_draw_reward: Option<f64>,

    /// Directory for trained agents and statistics
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl TrainArgs {
    fn params(&self) -> TdParams {
        let defaults = TdParams::default();
        TdParams::default()
            .with_alpha(self.alpha.unwrap_or(defaults.alpha))
            .with_epsilon(self.epsilon.unwrap_or(defaults.epsilon))
            .with_draw_rewards(
                self.x_draw_reward.unwrap_or(defaults.x_draw_reward),
                self.o_draw_reward.unwrap_or(defaults.o_draw_reward),
            )
    }

    fn learner(&self, params: TdParams, seed_offset: u64) -> TdAgent {
        let agent = TdAgent::with_kind(self.learning_type, params);
        match self.seed {
            Some(seed) => agent.with_seed(seed.wrapping_add(seed_offset)),
            None => agent,
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let params = args.params();
    params.validate().context("Invalid learner parameters")?;

    let mut config = TrainerConfig::default()
        .with_num_games(args.num_games)
        .with_batch_size(args.num_batches);
    config.seed = args.seed;

    print_section(&format!("Training {}", args.learning_type.description()));
    print_kv("Games", &format_number(config.num_games));
    print_kv("Batch size", &format_number(config.batch_size));
    print_kv("Alpha", &params.alpha.to_string());
    print_kv("Epsilon", &params.epsilon.to_string());
    print_kv(
        "Draw rewards",
        &format!("X={}, O={}", params.x_draw_reward, params.o_draw_reward),
    );
    println!();

    let mut trainer = Trainer::new(
        config.clone(),
        args.learner(params, 0),
        args.learner(params, 1),
    )?;

    let total_batches = config.num_rounds() * BatchKind::ALL.len();
    let pb = create_training_progress(total_batches as u64)?;
    let batch_size = config.batch_size;
    let stats = trainer.run(|round, kind, batch| {
        if kind == BatchKind::ALL[0] {
            let first_game = round * batch_size + 1;
            pb.println(format!(
                "Game #{}-{}:",
                first_game,
                first_game + batch_size - 1
            ));
        }
        pb.println(format!("- {kind}: {batch}"));
        pb.set_message(kind.label());
        pb.inc(1);
    })?;
    pb.finish_with_message("done");

    let repository = MsgPackRepository::new(&args.data_dir);
    repository
        .save(trainer.x_agent())
        .context("Failed to save X learner")?;
    repository
        .save(trainer.o_agent())
        .context("Failed to save O learner")?;

    let stats_path = args
        .data_dir
        .join(format!("{}Stats.json", args.learning_type.file_stem()));
    stats
        .save(&stats_path)
        .with_context(|| format!("Failed to write statistics to {}", stats_path.display()))?;

    print_section("Training complete");
    for (label, agent) in [("X", trainer.x_agent()), ("O", trainer.o_agent())] {
        print_kv(
            &format!("{label} states"),
            &format_number(agent.num_states()),
        );
        print_kv(
            &format!("{label} agent"),
            &repository
                .path_for(args.learning_type, agent.side())
                .display()
                .to_string(),
        );
    }
    print_kv("Statistics", &stats_path.display().to_string());

    Ok(())
}
