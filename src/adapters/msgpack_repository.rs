//! MessagePack implementation of the agent repository.
//!
//! Each agent lives in its own file under a configured directory, named after
//! the learner kind and the side it was trained for.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    Result,
    error::Error,
    ports::AgentRepository,
    td_learning::{LearnerKind, SavedTdAgent, TdAgent},
    tictactoe::Player,
};

/// MessagePack-based agent repository.
///
/// # Examples
///
/// ```no_run
/// use td_tictactoe::adapters::MsgPackRepository;
/// use td_tictactoe::ports::AgentRepository;
/// use td_tictactoe::td_learning::{LearnerKind, TdAgent, TdParams};
/// use td_tictactoe::tictactoe::Player;
///
/// let repo = MsgPackRepository::new("data");
/// let agent = TdAgent::new(TdParams::default());
///
/// // Writes data/td_learningX.msgpack
/// repo.save(&agent)?;
/// let loaded = repo.load(LearnerKind::Td, Player::X)?;
/// # Ok::<(), td_tictactoe::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MsgPackRepository {
    root: PathBuf,
}

impl MsgPackRepository {
    /// Repository storing agents under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the agent of `kind` trained for `side`
    pub fn path_for(&self, kind: LearnerKind, side: Player) -> PathBuf {
        self.root.join(format!("{}{}.msgpack", kind.file_stem(), side))
    }
}

impl AgentRepository for MsgPackRepository {
    fn save(&self, agent: &TdAgent) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|source| Error::Io {
            operation: format!("create directory {:?}", self.root),
            source,
        })?;

        let path = self.path_for(agent.kind(), agent.side());
        let file = File::create(&path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, &SavedTdAgent::from_agent(agent)).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize agent to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("write file {path:?}"),
            source,
        })?;

        log::info!(
            "saved {} agent for {} ({} states) to {}",
            agent.kind(),
            agent.side(),
            agent.values().len(),
            path.display()
        );
        Ok(())
    }

    fn load(&self, kind: LearnerKind, side: Player) -> Result<TdAgent> {
        let path = self.path_for(kind, side);
        let file = File::open(&path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let saved: SavedTdAgent = rmp_serde::decode::from_read(BufReader::new(file)).map_err(
            |e| Error::SerializationContext {
                operation: "deserialize agent from MessagePack".to_string(),
                message: e.to_string(),
            },
        )?;

        if saved.kind != kind {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "{} holds a {} agent, expected {kind}",
                    path.display(),
                    saved.kind
                ),
            });
        }

        log::debug!("loaded {kind} agent for {side} from {}", path.display());
        saved.to_agent(side)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::td_learning::TdParams;

    #[test]
    fn test_file_naming() {
        let repo = MsgPackRepository::new("/data");
        assert_eq!(
            repo.path_for(LearnerKind::TdSymmetric, Player::O),
            Path::new("/data/td_symmetric_learningO.msgpack")
        );
    }

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = MsgPackRepository::new(temp_dir.path().join("nested"));

        let mut agent = TdAgent::new(TdParams::default().with_alpha(0.3));
        agent.set_value(&[crate::tictactoe::Cell::Empty; 9], 0.42);

        repo.save(&agent).expect("Failed to save");
        let loaded = repo.load(LearnerKind::Td, Player::X).expect("Failed to load");

        assert_eq!(loaded.values(), agent.values());
        assert_eq!(loaded.params(), agent.params());
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = MsgPackRepository::new(temp_dir.path());
        let result = repo.load(LearnerKind::Td, Player::O);
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
