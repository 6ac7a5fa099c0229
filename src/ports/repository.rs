//! Repository port for learned agent persistence.

use crate::{
    Result,
    td_learning::{LearnerKind, TdAgent},
    tictactoe::Player,
};

/// Port for persisting and loading TD agents.
///
/// One agent is stored per learner kind and side; the agent's value table
/// and its four hyperparameters must survive a round trip unchanged.
///
/// # Examples
///
/// ```no_run
/// use td_tictactoe::ports::AgentRepository;
/// use td_tictactoe::td_learning::{LearnerKind, TdAgent};
/// use td_tictactoe::tictactoe::Player;
///
/// fn reload<R: AgentRepository>(repo: &R, agent: &TdAgent) -> td_tictactoe::Result<TdAgent> {
///     repo.save(agent)?;
///     repo.load(agent.kind(), agent.side())
/// }
/// ```
pub trait AgentRepository {
    /// Save an agent under its kind and current side.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage location cannot be written or
    /// serialization fails.
    fn save(&self, agent: &TdAgent) -> Result<()>;

    /// Load the agent stored for `kind` and `side`, seated on `side`.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored, the data is corrupted, or it
    /// was written by an incompatible format version.
    fn load(&self, kind: LearnerKind, side: Player) -> Result<TdAgent>;
}
