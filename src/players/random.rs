//! Uniformly random baseline player

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{Error, Result, ports::Agent, tictactoe::Grid};

/// Plays a uniformly random empty cell
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new("Random Player")
    }
}

impl Agent for RandomPlayer {
    fn select_move(&mut self, grid: &Grid) -> Result<usize> {
        grid.available_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
