//! One game between two agents chosen by player type

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    players::{AgentFactory, PlayerKind},
    ports::Agent,
    tictactoe::{Cells, GameController, GameOutcome, Player},
};

/// Snapshot of a game after a move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    /// `None` while the game continues
    pub outcome: Option<GameOutcome>,
    pub winning_line: Option<[usize; 3]>,
    /// Side to move next
    pub turn: Player,
    pub board: Cells,
}

/// A sequence of games played in one session.
///
/// Agents survive between games: starting a new game with the same player
/// type on a side keeps that side's agent instead of building a new one.
pub struct GameSession {
    factory: AgentFactory,
    kinds: [Option<PlayerKind>; 2],
    idle: [Option<Box<dyn Agent>>; 2],
    controller: Option<GameController<Box<dyn Agent>>>,
}

impl GameSession {
    pub fn new(factory: AgentFactory) -> Self {
        Self {
            factory,
            kinds: [None, None],
            idle: [None, None],
            controller: None,
        }
    }

    /// Player types of the current or last game, as `(x, o)`
    pub fn kinds(&self) -> (Option<PlayerKind>, Option<PlayerKind>) {
        (self.kinds[0], self.kinds[1])
    }

    pub fn controller(&self) -> Option<&GameController<Box<dyn Agent>>> {
        self.controller.as_ref()
    }

    /// Start a new game, replacing any game in progress.
    ///
    /// # Errors
    ///
    /// Returns an error if an agent has to be built and building it fails;
    /// the session then has no active game.
    pub fn start_game(&mut self, x_kind: PlayerKind, o_kind: PlayerKind) -> Result<GameInfo> {
        if let Some(controller) = self.controller.take() {
            let (x_player, o_player) = controller.into_players();
            self.idle = [Some(x_player), Some(o_player)];
        }

        let x_player = self.seat(x_kind, Player::X)?;
        let o_player = match self.seat(o_kind, Player::O) {
            Ok(agent) => agent,
            Err(err) => {
                self.idle[Player::X.index()] = Some(x_player);
                return Err(err);
            }
        };
        self.controller = Some(GameController::new(x_player, o_player));

        log::debug!("started game {x_kind} vs {o_kind}");
        self.info()
    }

    fn seat(&mut self, kind: PlayerKind, side: Player) -> Result<Box<dyn Agent>> {
        let slot = side.index();
        match self.idle[slot].take() {
            Some(agent) if self.kinds[slot] == Some(kind) => Ok(agent),
            _ => {
                self.kinds[slot] = None;
                let agent = self.factory.create(kind, side)?;
                self.kinds[slot] = Some(kind);
                Ok(agent)
            }
        }
    }

    fn controller_mut(&mut self) -> Result<&mut GameController<Box<dyn Agent>>> {
        self.controller.as_mut().ok_or(Error::NoActiveGame)
    }

    /// Let the side to move pick and play its move
    pub fn make_computer_move(&mut self) -> Result<GameInfo> {
        self.controller_mut()?.advance()?;
        self.info()
    }

    /// Play `position` (0-8) for the side to move, which must take moves
    /// from outside.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] if the game has finished; nothing is queued
    /// - [`Error::NotInteractive`] if the side to move is not a human
    /// - the controller's move validation errors; the game is unchanged
    pub fn make_human_move(&mut self, position: usize) -> Result<GameInfo> {
        let controller = self.controller_mut()?;
        if controller.is_finished() {
            return Err(Error::GameOver);
        }
        let side = controller.turn();
        controller
            .current_player_mut()
            .as_interactive()
            .ok_or(Error::NotInteractive { side })?
            .set_move(position);
        controller.advance()?;
        self.info()
    }

    /// Current board, turn and outcome
    pub fn info(&self) -> Result<GameInfo> {
        let controller = self.controller.as_ref().ok_or(Error::NoActiveGame)?;
        let grid = controller.grid();
        Ok(GameInfo {
            outcome: grid.outcome(),
            winning_line: grid.winning_line(),
            turn: controller.turn(),
            board: *grid.cells(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        adapters::InMemoryRepository,
        ports::AgentRepository,
        td_learning::{LearnerKind, TdAgent, TdParams},
        tictactoe::Cell,
    };

    #[test]
    fn test_human_game_to_win() {
        let mut session = GameSession::new(AgentFactory::default());
        let info = session
            .start_game(PlayerKind::Human, PlayerKind::Human)
            .unwrap();
        assert_eq!(info.turn, Player::X);
        assert_eq!(info.board, [Cell::Empty; 9]);

        for position in [0, 3, 1, 4] {
            assert_eq!(session.make_human_move(position).unwrap().outcome, None);
        }
        let info = session.make_human_move(2).unwrap();
        assert_eq!(info.outcome, Some(GameOutcome::Win(Player::X)));
        assert_eq!(info.winning_line, Some([0, 1, 2]));
        assert!(matches!(session.make_human_move(5), Err(Error::GameOver)));
    }

    #[test]
    fn test_invalid_human_move_keeps_turn() {
        let mut session = GameSession::new(AgentFactory::default());
        session
            .start_game(PlayerKind::Human, PlayerKind::Human)
            .unwrap();
        session.make_human_move(4).unwrap();

        assert!(matches!(
            session.make_human_move(4),
            Err(Error::InvalidMove { position: 4 })
        ));
        assert!(matches!(
            session.make_human_move(9),
            Err(Error::InvalidPosition { position: 9 })
        ));
        assert_eq!(session.info().unwrap().turn, Player::O);
    }

    #[test]
    fn test_human_move_rejected_for_computer() {
        let mut session = GameSession::new(AgentFactory::default());
        session
            .start_game(PlayerKind::Random, PlayerKind::Human)
            .unwrap();
        assert!(matches!(
            session.make_human_move(0),
            Err(Error::NotInteractive { side: Player::X })
        ));

        let info = session.make_computer_move().unwrap();
        assert_eq!(info.turn, Player::O);
        assert_eq!(info.board.iter().filter(|&&c| c == Cell::X).count(), 1);
    }

    #[test]
    fn test_move_after_game_over_not_carried_into_next_game() {
        let mut session = GameSession::new(AgentFactory::default());
        session
            .start_game(PlayerKind::Human, PlayerKind::Human)
            .unwrap();
        for position in [0, 3, 1, 4, 2] {
            session.make_human_move(position).unwrap();
        }
        assert!(matches!(session.make_human_move(8), Err(Error::GameOver)));

        session
            .start_game(PlayerKind::Human, PlayerKind::Human)
            .unwrap();
        session.make_human_move(0).unwrap();
        assert!(matches!(
            session.make_computer_move(),
            Err(Error::AwaitingInput)
        ));
        assert_eq!(session.info().unwrap().board[8], Cell::Empty);
    }

    #[test]
    fn test_failed_start_keeps_x_agent() {
        let repository = InMemoryRepository::new();
        repository
            .save(&TdAgent::new(TdParams::default()))
            .unwrap();
        let factory = AgentFactory::default().with_repository(Arc::new(repository));
        let learner = PlayerKind::Learner(LearnerKind::Td);
        let mut session = GameSession::new(factory);

        session.start_game(learner, PlayerKind::Random).unwrap();
        // the greedy lookup fills the loaded, empty table
        session.make_computer_move().unwrap();

        // no O learner is stored, so seating O fails
        assert!(session.start_game(learner, learner).is_err());
        assert!(matches!(session.info(), Err(Error::NoActiveGame)));

        session.start_game(learner, PlayerKind::Random).unwrap();
        let x_player = session.controller_mut().unwrap().current_player_mut();
        assert!(x_player.as_trainable().unwrap().num_states() > 0);
    }

    #[test]
    fn test_no_game_started() {
        let mut session = GameSession::new(AgentFactory::default());
        assert!(matches!(session.info(), Err(Error::NoActiveGame)));
        assert!(matches!(
            session.make_computer_move(),
            Err(Error::NoActiveGame)
        ));
    }

    #[test]
    fn test_same_kind_keeps_learned_values() {
        let learner = PlayerKind::Learner(LearnerKind::Td);
        let mut session = GameSession::new(AgentFactory::default());

        session.start_game(learner, PlayerKind::Human).unwrap();
        // the greedy lookup adds the candidate boards to the learner's table
        session.make_computer_move().unwrap();
        session.start_game(learner, PlayerKind::Human).unwrap();

        let x_player = session.controller_mut().unwrap().current_player_mut();
        assert_eq!(x_player.name(), learner.description());
        assert!(x_player.as_trainable().unwrap().num_states() > 0);
        assert_eq!(session.kinds(), (Some(learner), Some(PlayerKind::Human)));
    }
}
