//! Value-table agent with ε-greedy play and backward TD updates

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::{
    params::TdParams,
    value_table::{LearnerKind, ValueTable},
};
use crate::{
    Error, Result,
    ports::{Agent, Trainable},
    tictactoe::{Cells, GameOutcome, Grid, Player},
};

/// Value given to a non-terminal state the first time it is seen
pub const INITIAL_VALUE: f64 = 0.5;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular TD(0) agent estimating its own win probability per board.
///
/// Values are created lazily: the first lookup of a board stores
/// [`INITIAL_VALUE`], or the closed-form reward if the board is terminal.
/// Learning starts disabled; while disabled the agent plays greedily and
/// ignores rewards.
#[derive(Debug, Clone)]
pub struct TdAgent {
    kind: LearnerKind,
    params: TdParams,
    values: ValueTable,
    side: Player,
    trajectory: Vec<Cells>,
    learning: bool,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl TdAgent {
    /// Create an agent keyed on literal boards
    pub fn new(params: TdParams) -> Self {
        Self::with_kind(LearnerKind::Td, params)
    }

    /// Create an agent that folds symmetric boards into one entry
    pub fn symmetric(params: TdParams) -> Self {
        Self::with_kind(LearnerKind::TdSymmetric, params)
    }

    pub fn with_kind(kind: LearnerKind, params: TdParams) -> Self {
        Self {
            kind,
            params,
            values: ValueTable::new(),
            side: Player::X,
            trajectory: Vec::new(),
            learning: false,
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// Replace the learned values, e.g. after loading
    pub fn with_values(mut self, values: ValueTable) -> Self {
        self.values = values;
        self
    }

    pub fn kind(&self) -> LearnerKind {
        self.kind
    }

    pub fn params(&self) -> &TdParams {
        &self.params
    }

    /// Replace the hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any parameter is out of
    /// range; the current parameters are kept in that case.
    pub fn set_params(&mut self, params: TdParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn side(&self) -> Player {
        self.side
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn trajectory(&self) -> &[Cells] {
        &self.trajectory
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Stored value of a board under this agent's key resolution, without
    /// initializing missing entries
    pub fn value(&self, cells: &Cells) -> Option<f64> {
        let key = self.values.resolve_key(cells, self.kind);
        self.values.get(&key)
    }

    /// Store a value for a board under this agent's key resolution
    pub fn set_value(&mut self, cells: &Cells, value: f64) {
        let key = self.values.resolve_key(cells, self.kind);
        self.values.insert(key, value);
    }

    /// Value of a board, initializing it on first sight.
    ///
    /// `outcome` is the board's own outcome and decides the initial value
    /// of a missing entry; an existing entry is returned untouched.
    pub fn state_value(&mut self, cells: &Cells, outcome: Option<GameOutcome>) -> f64 {
        self.value_entry(cells, outcome).0
    }

    fn value_entry(&mut self, cells: &Cells, outcome: Option<GameOutcome>) -> (f64, Cells) {
        let key = self.values.resolve_key(cells, self.kind);
        if let Some(value) = self.values.get(&key) {
            return (value, key);
        }

        let value = match outcome {
            None => INITIAL_VALUE,
            Some(outcome) => self.reward(outcome),
        };
        self.values.insert(key, value);
        (value, key)
    }

    fn reward(&self, outcome: GameOutcome) -> f64 {
        match outcome {
            GameOutcome::Win(winner) if winner == self.side => 1.0,
            GameOutcome::Win(_) => 0.0,
            GameOutcome::Draw => self.params.draw_reward(self.side),
        }
    }

    /// Value of playing each available move, in ascending position order.
    ///
    /// Candidates are simulated on a scratch copy of the grid; unseen
    /// resulting boards are added to the value table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] if the grid already has an outcome.
    pub fn move_values(&mut self, grid: &Grid) -> Result<Vec<(usize, f64)>> {
        let mut scratch = *grid;
        let mut values = Vec::with_capacity(9);

        for position in grid.available_moves() {
            let simulated = scratch.simulate_move(position, self.side)?;
            let value = self.state_value(simulated.snapshot(), simulated.outcome());
            values.push((position, value));
        }

        Ok(values)
    }

    fn choose_random_move(&mut self, grid: &Grid) -> Result<usize> {
        grid.available_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn choose_best_move(&mut self, grid: &Grid) -> Result<usize> {
        let move_values = self.move_values(grid)?;
        let best_value = move_values
            .iter()
            .map(|&(_, value)| value)
            .fold(f64::NEG_INFINITY, f64::max);
        let best_moves: Vec<usize> = move_values
            .iter()
            .filter(|&&(_, value)| value == best_value)
            .map(|&(position, _)| position)
            .collect();

        best_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }
}

impl Agent for TdAgent {
    fn select_move(&mut self, grid: &Grid) -> Result<usize> {
        if self.learning && self.rng.random::<f64>() < self.params.epsilon {
            self.choose_random_move(grid)
        } else {
            self.choose_best_move(grid)
        }
    }

    fn name(&self) -> &str {
        self.kind.description()
    }

    fn set_side(&mut self, side: Player) {
        self.side = side;
    }

    fn as_trainable(&mut self) -> Option<&mut dyn Trainable> {
        Some(self)
    }
}

impl Trainable for TdAgent {
    fn reset_trajectory(&mut self) {
        self.trajectory.clear();
    }

    fn store_state(&mut self, grid: &Grid) {
        self.trajectory.push(*grid.cells());
    }

    fn set_reward(&mut self, outcome: GameOutcome) -> Result<()> {
        if !self.learning {
            return Ok(());
        }

        let trajectory = std::mem::take(&mut self.trajectory);
        let Some((last, earlier)) = trajectory.split_last() else {
            return Err(Error::EmptyTrajectory);
        };

        let mut next_value = self.state_value(last, Some(outcome));
        for cells in earlier.iter().rev() {
            let (current, key) = self.value_entry(cells, None);
            let updated = current + self.params.alpha * (next_value - current);
            self.values.insert(key, updated);
            next_value = updated;
        }

        self.trajectory = trajectory;
        Ok(())
    }

    fn enable_learning(&mut self) {
        self.learning = true;
    }

    fn disable_learning(&mut self) {
        self.learning = false;
    }

    fn is_learning(&self) -> bool {
        self.learning
    }

    fn num_states(&self) -> usize {
        self.values.len()
    }
}
