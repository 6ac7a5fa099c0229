//! Batched training of a pair of learners

use std::{fmt, fs::File, io::BufWriter, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    players::RandomPlayer,
    ports::{Agent, Trainable},
    td_learning::TdAgent,
    tictactoe::{GameController, GameOutcome, Player},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Total number of games per batch kind
    pub num_games: usize,

    /// Games per batch; statistics are gathered once per batch
    pub batch_size: usize,

    /// Random seed for the agents and the random opponent
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            num_games: 20_000,
            batch_size: 1_000,
            seed: None,
        }
    }
}

impl TrainerConfig {
    pub fn with_num_games(mut self, num_games: usize) -> Self {
        self.num_games = num_games;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of batch rounds needed to cover `num_games`
    pub fn num_rounds(&self) -> usize {
        self.num_games.div_ceil(self.batch_size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidConfiguration {
                message: "batch size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// The six batches played every round, in play order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchKind {
    TrainSelf,
    TrainXVsRandom,
    TrainOVsRandom,
    CompeteSelf,
    CompeteXVsRandom,
    CompeteOVsRandom,
}

impl BatchKind {
    pub const ALL: [BatchKind; 6] = [
        BatchKind::TrainSelf,
        BatchKind::TrainXVsRandom,
        BatchKind::TrainOVsRandom,
        BatchKind::CompeteSelf,
        BatchKind::CompeteXVsRandom,
        BatchKind::CompeteOVsRandom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BatchKind::TrainSelf => "Train self",
            BatchKind::TrainXVsRandom => "Train X vs. random",
            BatchKind::TrainOVsRandom => "Train O vs. random",
            BatchKind::CompeteSelf => "Compete self",
            BatchKind::CompeteXVsRandom => "Compete X vs. random",
            BatchKind::CompeteOVsRandom => "Compete O vs. random",
        }
    }

    /// Whether the learners update their values during this batch
    pub fn is_training(self) -> bool {
        matches!(
            self,
            BatchKind::TrainSelf | BatchKind::TrainXVsRandom | BatchKind::TrainOVsRandom
        )
    }
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome counts for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl BatchStats {
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }
}

impl fmt::Display for BatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X wins={}, O wins={}, Draw={}",
            self.x_wins, self.o_wins, self.draws
        )
    }
}

/// Per-batch statistics of a whole training run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingStats {
    pub num_games: usize,
    pub batch_size: usize,
    pub train_self: Vec<BatchStats>,
    pub train_x_vs_random: Vec<BatchStats>,
    pub train_o_vs_random: Vec<BatchStats>,
    pub compete_self: Vec<BatchStats>,
    pub compete_x_vs_random: Vec<BatchStats>,
    pub compete_o_vs_random: Vec<BatchStats>,
}

impl TrainingStats {
    pub fn new(config: &TrainerConfig) -> Self {
        Self {
            num_games: config.num_games,
            batch_size: config.batch_size,
            ..Self::default()
        }
    }

    pub fn series(&self, kind: BatchKind) -> &[BatchStats] {
        match kind {
            BatchKind::TrainSelf => &self.train_self,
            BatchKind::TrainXVsRandom => &self.train_x_vs_random,
            BatchKind::TrainOVsRandom => &self.train_o_vs_random,
            BatchKind::CompeteSelf => &self.compete_self,
            BatchKind::CompeteXVsRandom => &self.compete_x_vs_random,
            BatchKind::CompeteOVsRandom => &self.compete_o_vs_random,
        }
    }

    fn series_mut(&mut self, kind: BatchKind) -> &mut Vec<BatchStats> {
        match kind {
            BatchKind::TrainSelf => &mut self.train_self,
            BatchKind::TrainXVsRandom => &mut self.train_x_vs_random,
            BatchKind::TrainOVsRandom => &mut self.train_o_vs_random,
            BatchKind::CompeteSelf => &mut self.compete_self,
            BatchKind::CompeteXVsRandom => &mut self.compete_x_vs_random,
            BatchKind::CompeteOVsRandom => &mut self.compete_o_vs_random,
        }
    }

    /// Save statistics to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load statistics from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}

/// Play one game, recording every position for the learning agents and
/// rewarding them once the game ends.
pub fn play_training_game<'a>(
    x_player: &'a mut dyn Agent,
    o_player: &'a mut dyn Agent,
) -> Result<GameOutcome> {
    let mut controller = GameController::new(x_player, o_player);
    loop {
        let (outcome, _) = controller.advance()?;
        controller.record_states();
        if let Some(outcome) = outcome {
            controller.apply_rewards(outcome)?;
            return Ok(outcome);
        }
    }
}

/// Play one game without learning bookkeeping.
///
/// Returns the outcome and the positions played, in order.
pub fn play_game<'a>(
    x_player: &'a mut dyn Agent,
    o_player: &'a mut dyn Agent,
) -> Result<(GameOutcome, Vec<usize>)> {
    let mut controller = GameController::new(x_player, o_player);
    let mut moves = Vec::with_capacity(9);
    loop {
        let (outcome, position) = controller.advance()?;
        moves.push(position);
        if let Some(outcome) = outcome {
            return Ok((outcome, moves));
        }
    }
}

/// Trains an X learner and an O learner of the same kind.
///
/// Every round plays one batch of each [`BatchKind`] in order: three with
/// learning enabled, then three with learning disabled to measure progress.
pub struct Trainer {
    config: TrainerConfig,
    x_agent: TdAgent,
    o_agent: TdAgent,
    random: RandomPlayer,
}

impl Trainer {
    pub fn new(config: TrainerConfig, mut x_agent: TdAgent, mut o_agent: TdAgent) -> Result<Self> {
        config.validate()?;
        x_agent.params().validate()?;
        o_agent.params().validate()?;
        x_agent.set_side(Player::X);
        o_agent.set_side(Player::O);

        let random = match config.seed {
            Some(seed) => RandomPlayer::default().with_seed(seed.wrapping_add(2)),
            None => RandomPlayer::default(),
        };

        Ok(Self {
            config,
            x_agent,
            o_agent,
            random,
        })
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn x_agent(&self) -> &TdAgent {
        &self.x_agent
    }

    pub fn o_agent(&self) -> &TdAgent {
        &self.o_agent
    }

    /// Release the trained learners as `(x_agent, o_agent)`
    pub fn into_agents(self) -> (TdAgent, TdAgent) {
        (self.x_agent, self.o_agent)
    }

    fn set_learning(&mut self, enabled: bool) {
        for agent in [&mut self.x_agent, &mut self.o_agent] {
            if enabled {
                agent.enable_learning();
            } else {
                agent.disable_learning();
            }
        }
    }

    /// Play `batch_size` games of one kind
    pub fn run_batch(&mut self, kind: BatchKind) -> Result<BatchStats> {
        self.set_learning(kind.is_training());

        let mut stats = BatchStats::default();
        for _ in 0..self.config.batch_size {
            let (x_player, o_player): (&mut dyn Agent, &mut dyn Agent) = match kind {
                BatchKind::TrainSelf | BatchKind::CompeteSelf => (
                    &mut self.x_agent as &mut dyn Agent,
                    &mut self.o_agent as &mut dyn Agent,
                ),
                BatchKind::TrainXVsRandom | BatchKind::CompeteXVsRandom => (
                    &mut self.x_agent as &mut dyn Agent,
                    &mut self.random as &mut dyn Agent,
                ),
                BatchKind::TrainOVsRandom | BatchKind::CompeteOVsRandom => (
                    &mut self.random as &mut dyn Agent,
                    &mut self.o_agent as &mut dyn Agent,
                ),
            };

            let outcome = if kind.is_training() {
                play_training_game(x_player, o_player)?
            } else {
                play_game(x_player, o_player)?.0
            };
            stats.record(outcome);
        }

        Ok(stats)
    }

    /// Run every round, calling `on_batch` after each finished batch
    pub fn run(
        &mut self,
        mut on_batch: impl FnMut(usize, BatchKind, &BatchStats),
    ) -> Result<TrainingStats> {
        let mut stats = TrainingStats::new(&self.config);

        for round in 0..self.config.num_rounds() {
            let first_game = round * self.config.batch_size + 1;
            log::debug!(
                "Game #{}-{}",
                first_game,
                first_game + self.config.batch_size - 1
            );

            for kind in BatchKind::ALL {
                let batch = self.run_batch(kind)?;
                log::debug!("- {kind}: {batch}");
                on_batch(round, kind, &batch);
                stats.series_mut(kind).push(batch);
            }
        }

        self.set_learning(false);
        log::info!(
            "X has trained {} states, O has trained {} states",
            self.x_agent.num_states(),
            self.o_agent.num_states()
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::td_learning::TdParams;

    fn seeded_trainer(num_games: usize, batch_size: usize) -> Trainer {
        let config = TrainerConfig::default()
            .with_num_games(num_games)
            .with_batch_size(batch_size)
            .with_seed(11);
        Trainer::new(
            config,
            TdAgent::new(TdParams::default()).with_seed(11),
            TdAgent::new(TdParams::default()).with_seed(12),
        )
        .unwrap()
    }

    #[test]
    fn test_rounds_cover_partial_batch() {
        let config = TrainerConfig::default()
            .with_num_games(25)
            .with_batch_size(10);
        assert_eq!(config.num_rounds(), 3);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = TrainerConfig::default().with_batch_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_learner_params_rejected() {
        let config = TrainerConfig::default().with_batch_size(10);
        let result = Trainer::new(
            config.clone(),
            TdAgent::new(TdParams::default()),
            TdAgent::new(TdParams::default().with_alpha(5.0)),
        );
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));

        let result = Trainer::new(
            config,
            TdAgent::new(TdParams::default().with_epsilon(-0.1)),
            TdAgent::new(TdParams::default()),
        );
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_run_collects_every_series() {
        let mut trainer = seeded_trainer(20, 10);
        let mut calls = 0;
        let stats = trainer.run(|_, _, _| calls += 1).unwrap();

        assert_eq!(calls, 12);
        for kind in BatchKind::ALL {
            let series = stats.series(kind);
            assert_eq!(series.len(), 2, "{kind}");
            assert!(series.iter().all(|batch| batch.total() == 10));
        }
        assert!(trainer.x_agent().num_states() > 0);
        assert!(trainer.o_agent().num_states() > 0);
        assert!(!trainer.x_agent().is_learning());
    }

    #[test]
    fn test_compete_batch_does_not_learn() {
        let mut trainer = seeded_trainer(10, 10);
        trainer.run_batch(BatchKind::CompeteSelf).unwrap();
        let before = trainer.x_agent().values().clone();

        trainer.run_batch(BatchKind::CompeteXVsRandom).unwrap();
        // greedy lookups may add fresh entries but never change stored ones
        for (key, value) in before.iter() {
            assert_eq!(trainer.x_agent().values().get(key), Some(*value));
        }
    }

    #[test]
    fn test_batch_stats_display() {
        let mut stats = BatchStats::default();
        stats.record(GameOutcome::Win(Player::X));
        stats.record(GameOutcome::Draw);
        stats.record(GameOutcome::Draw);
        assert_eq!(stats.to_string(), "X wins=1, O wins=0, Draw=2");
    }
}
