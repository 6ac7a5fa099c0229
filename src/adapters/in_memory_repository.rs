//! In-memory agent repository for testing.
//!
//! Stores encoded agents in a shared map, avoiding file system I/O entirely.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    Result,
    error::Error,
    ports::AgentRepository,
    td_learning::{LearnerKind, SavedTdAgent, TdAgent},
    tictactoe::Player,
};

type Storage = HashMap<(LearnerKind, Player), Vec<u8>>;

/// In-memory repository.
///
/// Agents are still encoded with MessagePack so a round trip exercises the
/// same serialization as the file-based adapter. All clones share the same
/// storage.
///
/// # Examples
///
/// ```
/// use td_tictactoe::adapters::InMemoryRepository;
/// use td_tictactoe::ports::AgentRepository;
/// use td_tictactoe::td_learning::{LearnerKind, TdAgent, TdParams};
/// use td_tictactoe::tictactoe::Player;
///
/// let repo = InMemoryRepository::new();
/// repo.save(&TdAgent::symmetric(TdParams::default()))?;
///
/// let loaded = repo.load(LearnerKind::TdSymmetric, Player::X)?;
/// assert_eq!(loaded.kind(), LearnerKind::TdSymmetric);
/// # Ok::<(), td_tictactoe::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<Storage>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of agents currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    pub fn contains(&self, kind: LearnerKind, side: Player) -> bool {
        self.storage().contains_key(&(kind, side))
    }

    fn storage(&self) -> MutexGuard<'_, Storage> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AgentRepository for InMemoryRepository {
    fn save(&self, agent: &TdAgent) -> Result<()> {
        let bytes = rmp_serde::to_vec(&SavedTdAgent::from_agent(agent)).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize agent for in-memory storage".to_string(),
                message: e.to_string(),
            }
        })?;

        self.storage().insert((agent.kind(), agent.side()), bytes);
        Ok(())
    }

    fn load(&self, kind: LearnerKind, side: Player) -> Result<TdAgent> {
        let storage = self.storage();
        let bytes = storage.get(&(kind, side)).ok_or_else(|| Error::Io {
            operation: format!("load {kind} agent for {side} from in-memory storage"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        let saved: SavedTdAgent =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize agent from in-memory storage".to_string(),
                message: e.to_string(),
            })?;
        saved.to_agent(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ports::Agent, td_learning::TdParams};

    #[test]
    fn test_sides_stored_separately() {
        let repo = InMemoryRepository::new();
        let mut agent = TdAgent::new(TdParams::default());
        repo.save(&agent).unwrap();
        agent.set_side(Player::O);
        repo.save(&agent).unwrap();

        assert_eq!(repo.count(), 2);
        assert!(repo.contains(LearnerKind::Td, Player::X));
        assert!(repo.contains(LearnerKind::Td, Player::O));
        assert!(!repo.contains(LearnerKind::TdSymmetric, Player::X));
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = InMemoryRepository::new();
        assert!(repo.load(LearnerKind::Td, Player::X).is_err());
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();

        repo1.save(&TdAgent::new(TdParams::default())).unwrap();
        assert!(repo2.load(LearnerKind::Td, Player::X).is_ok());
        assert_eq!(repo2.count(), 1);
    }
}
