//! Construction of agents from player types

use std::sync::Arc;

use super::{HumanPlayer, PlayerKind, RandomPlayer};
use crate::{
    Result,
    ports::{Agent, AgentRepository},
    td_learning::{LearnerKind, TdAgent, TdParams},
    tictactoe::Player,
};

/// Builds agents for a side, loading learners from a repository when one is
/// configured.
///
/// # Examples
///
/// ```
/// use td_tictactoe::players::{AgentFactory, PlayerKind};
/// use td_tictactoe::ports::Agent;
/// use td_tictactoe::tictactoe::Player;
///
/// let factory = AgentFactory::default();
/// let agent = factory.create(PlayerKind::Random, Player::O)?;
/// assert_eq!(agent.name(), "Random Player");
/// # Ok::<(), td_tictactoe::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct AgentFactory {
    params: TdParams,
    repository: Option<Arc<dyn AgentRepository + Send + Sync>>,
}

impl AgentFactory {
    /// Factory for fresh learners using `params`
    pub fn new(params: TdParams) -> Self {
        Self {
            params,
            repository: None,
        }
    }

    /// Load learners from `repository` instead of starting them untrained
    pub fn with_repository(mut self, repository: Arc<dyn AgentRepository + Send + Sync>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn params(&self) -> &TdParams {
        &self.params
    }

    /// Build an agent of the given type, already seated on `side`.
    ///
    /// # Errors
    ///
    /// Returns an error if a learner must be loaded and loading fails.
    pub fn create(&self, kind: PlayerKind, side: Player) -> Result<Box<dyn Agent>> {
        let mut agent: Box<dyn Agent> = match kind {
            PlayerKind::Human => Box::new(HumanPlayer::new()),
            PlayerKind::Random => Box::new(RandomPlayer::default()),
            PlayerKind::Learner(learner) => Box::new(self.create_learner(learner, side)?),
        };
        agent.set_side(side);
        Ok(agent)
    }

    /// Build a learner seated on `side`.
    ///
    /// # Errors
    ///
    /// Returns an error if a repository is configured and loading fails.
    pub fn create_learner(&self, kind: LearnerKind, side: Player) -> Result<TdAgent> {
        match &self.repository {
            Some(repository) => repository.load(kind, side),
            None => {
                self.params.validate()?;
                let mut agent = TdAgent::with_kind(kind, self.params);
                agent.set_side(side);
                Ok(agent)
            }
        }
    }
}
