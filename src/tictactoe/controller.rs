//! Turn progression between two agents sharing one grid

use super::{
    board::{Grid, Player},
    game::GameOutcome,
};
use crate::{Error, Result, ports::Agent};

/// Drives one game: X moves first, then sides alternate until the grid
/// reports an outcome.
///
/// The controller owns the grid for the whole game. Agents are seated on
/// construction; learning agents get their trajectory cleared there, so an
/// agent must be re-seated (by building a new controller) for every game.
///
/// `P` is usually `&mut dyn Agent` for training loops that keep their
/// agents, or `Box<dyn Agent>` for long-lived sessions.
pub struct GameController<P> {
    players: [P; 2],
    grid: Grid,
    turn: Player,
}

impl<P: Agent> GameController<P> {
    /// Seat `x_player` as X and `o_player` as O on a fresh grid
    pub fn new(mut x_player: P, mut o_player: P) -> Self {
        for (player, side) in [(&mut x_player, Player::X), (&mut o_player, Player::O)] {
            if let Some(trainable) = player.as_trainable() {
                trainable.reset_trajectory();
            }
            player.set_side(side);
        }

        Self {
            players: [x_player, o_player],
            grid: Grid::new(),
            turn: Player::X,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Side to move next
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Agent to move next
    pub fn current_player(&self) -> &P {
        &self.players[self.turn.index()]
    }

    pub fn current_player_mut(&mut self) -> &mut P {
        &mut self.players[self.turn.index()]
    }

    pub fn player(&self, side: Player) -> &P {
        &self.players[side.index()]
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.grid.outcome()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }

    /// Ask the side to move for a move, play it and hand the turn over.
    ///
    /// Returns the outcome after the move together with the position played.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] if the game has already finished
    /// - any error from the agent's move selection
    /// - [`Error::InvalidMove`] / [`Error::InvalidPosition`] if the agent
    ///   produced an illegal move; the grid and turn are left unchanged
    pub fn advance(&mut self) -> Result<(Option<GameOutcome>, usize)> {
        if self.is_finished() {
            return Err(Error::GameOver);
        }

        let side = self.turn;
        let position = self.players[side.index()].select_move(&self.grid)?;
        self.grid.check_move(position)?;
        self.grid.apply_move(position, side);
        self.turn = side.opponent();

        log::trace!(
            "{} ({side}) played {position}",
            self.players[side.index()].name()
        );

        Ok((self.grid.outcome(), position))
    }

    /// Store the current grid in the trajectory of every learning agent
    pub fn record_states(&mut self) {
        for player in &mut self.players {
            if let Some(trainable) = player.as_trainable() {
                trainable.store_state(&self.grid);
            }
        }
    }

    /// Hand the final outcome to every learning agent
    pub fn apply_rewards(&mut self, outcome: GameOutcome) -> Result<()> {
        for player in &mut self.players {
            if let Some(trainable) = player.as_trainable() {
                trainable.set_reward(outcome)?;
            }
        }
        Ok(())
    }

    /// Release the agents as `(x_player, o_player)`
    pub fn into_players(self) -> (P, P) {
        let [x_player, o_player] = self.players;
        (x_player, o_player)
    }
}
