//! Player whose moves are supplied from outside the game loop

use crate::{
    Error, Result,
    ports::{Agent, Interactive},
    tictactoe::{Grid, Player},
};

/// Returns whatever move was queued last with [`Interactive::set_move`].
///
/// Presentation layers (web sessions, scripted tests) feed the move before
/// asking the controller to advance. Validation happens in the controller.
#[derive(Debug, Clone, Default)]
pub struct HumanPlayer {
    pending: Option<usize>,
}

impl HumanPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Agent for HumanPlayer {
    fn select_move(&mut self, _grid: &Grid) -> Result<usize> {
        self.pending.take().ok_or(Error::AwaitingInput)
    }

    fn name(&self) -> &str {
        "Human Player"
    }

    fn set_side(&mut self, _side: Player) {
        self.pending = None;
    }

    fn as_interactive(&mut self) -> Option<&mut dyn Interactive> {
        Some(self)
    }
}

impl Interactive for HumanPlayer {
    fn set_move(&mut self, position: usize) {
        self.pending = Some(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_is_consumed() {
        let mut human = HumanPlayer::new();
        human.set_move(6);
        assert_eq!(human.select_move(&Grid::new()).unwrap(), 6);
        assert!(matches!(
            human.select_move(&Grid::new()),
            Err(Error::AwaitingInput)
        ));
    }

    #[test]
    fn test_reseating_drops_queued_move() {
        let mut human = HumanPlayer::new();
        human.set_move(2);
        human.set_side(Player::O);
        assert!(matches!(
            human.select_move(&Grid::new()),
            Err(Error::AwaitingInput)
        ));
    }
}
