//! Trainable port - the learning capability of an agent

use crate::{
    Result,
    tictactoe::{GameOutcome, Grid},
};

/// Operations a training driver performs on a learning agent.
///
/// The driver resets the trajectory when a game starts (the controller does
/// this on construction), stores the grid after every move by either side,
/// and hands over the final outcome exactly once.
pub trait Trainable {
    /// Forget the states recorded during the previous game.
    fn reset_trajectory(&mut self);

    /// Append the current board to this game's trajectory.
    fn store_state(&mut self, grid: &Grid);

    /// Apply the end-of-game value update.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyTrajectory`] if learning is enabled and no
    /// state was stored.
    fn set_reward(&mut self, outcome: GameOutcome) -> Result<()>;

    fn enable_learning(&mut self);

    fn disable_learning(&mut self);

    fn is_learning(&self) -> bool;

    /// Number of distinct states with a learned value.
    fn num_states(&self) -> usize;
}
