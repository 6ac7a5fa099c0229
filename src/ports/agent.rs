//! Agent port - anything that can produce a move for the side it is seated on

use crate::{
    Result,
    ports::Trainable,
    tictactoe::{Grid, Player},
};

/// Move producer seated at one side of a [`GameController`].
///
/// Capabilities beyond choosing a move are discovered through the `as_*`
/// accessors rather than by inspecting concrete types: a learner answers
/// [`Agent::as_trainable`], a player fed from outside answers
/// [`Agent::as_interactive`].
///
/// # Examples
///
/// ```
/// use td_tictactoe::{
///     Result,
///     ports::Agent,
///     tictactoe::Grid,
/// };
///
/// struct FirstFree;
///
/// impl Agent for FirstFree {
///     fn select_move(&mut self, grid: &Grid) -> Result<usize> {
///         grid.available_moves()
///             .first()
///             .copied()
///             .ok_or(td_tictactoe::Error::NoValidMoves)
///     }
///
///     fn name(&self) -> &str {
///         "First Free"
///     }
/// }
/// ```
///
/// [`GameController`]: crate::tictactoe::GameController
pub trait Agent: Send {
    /// Choose a position (0-8) to play on the given grid.
    ///
    /// # Errors
    ///
    /// Returns an error if no move can be produced, e.g. the board is full
    /// or an interactive player has not been given a move yet.
    fn select_move(&mut self, grid: &Grid) -> Result<usize>;

    /// Human readable name used in logs and menus.
    fn name(&self) -> &str;

    /// Called by the controller when the agent is seated for a new game.
    fn set_side(&mut self, _side: Player) {}

    /// Learning capability, if this agent learns from play.
    fn as_trainable(&mut self) -> Option<&mut dyn Trainable> {
        None
    }

    /// Externally supplied moves, if this agent takes them.
    fn as_interactive(&mut self) -> Option<&mut dyn Interactive> {
        None
    }
}

/// Capability of agents whose next move is handed to them from outside.
pub trait Interactive {
    /// Queue the position (0-8) to return from the next `select_move`.
    fn set_move(&mut self, position: usize);
}

impl<A: Agent + ?Sized> Agent for &mut A {
    fn select_move(&mut self, grid: &Grid) -> Result<usize> {
        (**self).select_move(grid)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_side(&mut self, side: Player) {
        (**self).set_side(side)
    }

    fn as_trainable(&mut self) -> Option<&mut dyn Trainable> {
        (**self).as_trainable()
    }

    fn as_interactive(&mut self) -> Option<&mut dyn Interactive> {
        (**self).as_interactive()
    }
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn select_move(&mut self, grid: &Grid) -> Result<usize> {
        (**self).select_move(grid)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_side(&mut self, side: Player) {
        (**self).set_side(side)
    }

    fn as_trainable(&mut self) -> Option<&mut dyn Trainable> {
        (**self).as_trainable()
    }

    fn as_interactive(&mut self) -> Option<&mut dyn Interactive> {
        (**self).as_interactive()
    }
}
