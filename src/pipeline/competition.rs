//! Evaluation of trained learners against a random player

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::training::play_game;
use crate::{
    Result,
    players::RandomPlayer,
    ports::Trainable,
    td_learning::TdAgent,
    tictactoe::{GameOutcome, Player},
};

/// Competition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompeteConfig {
    /// Games played per side
    pub num_games: usize,

    /// Random seed for the random opponent
    pub seed: Option<u64>,
}

impl Default for CompeteConfig {
    fn default() -> Self {
        Self {
            num_games: 20_000,
            seed: None,
        }
    }
}

/// Losses of one learner against the random player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideReport {
    pub games: usize,
    pub losses: usize,
    /// Distinct move sequences of the lost games, sorted
    pub losing_moves: BTreeSet<Vec<usize>>,
}

impl SideReport {
    pub fn loss_percentage(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            100.0 * self.losses as f64 / self.games as f64
        }
    }

    fn record(&mut self, outcome: GameOutcome, side: Player, moves: Vec<usize>) {
        self.games += 1;
        if outcome == GameOutcome::Win(side.opponent()) {
            self.losses += 1;
            self.losing_moves.insert(moves);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionReport {
    pub x: SideReport,
    pub o: SideReport,
}

impl CompetitionReport {
    pub fn side(&self, side: Player) -> &SideReport {
        match side {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }
}

/// Play `x_agent` as X and `o_agent` as O against a random player,
/// `num_games` times each, with learning disabled.
///
/// `on_game` is called with the number of finished game pairs.
pub fn compete_against_random(
    config: &CompeteConfig,
    x_agent: &mut TdAgent,
    o_agent: &mut TdAgent,
    mut on_game: impl FnMut(usize),
) -> Result<CompetitionReport> {
    let mut random = match config.seed {
        Some(seed) => RandomPlayer::default().with_seed(seed),
        None => RandomPlayer::default(),
    };
    x_agent.disable_learning();
    o_agent.disable_learning();

    let mut report = CompetitionReport::default();
    for game in 1..=config.num_games {
        let (outcome, moves) = play_game(x_agent, &mut random)?;
        report.x.record(outcome, Player::X, moves);

        let (outcome, moves) = play_game(&mut random, o_agent)?;
        report.o.record(outcome, Player::O, moves);

        on_game(game);
    }

    log::info!(
        "X lost {} of {} games, O lost {} of {} games",
        report.x.losses,
        report.x.games,
        report.o.losses,
        report.o.games
    );
    Ok(report)
}
