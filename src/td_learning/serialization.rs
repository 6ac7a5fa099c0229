//! Serializable snapshot of a TD agent.

use serde::{Deserialize, Serialize};

use super::{
    agent::TdAgent,
    params::TdParams,
    value_table::{LearnerKind, ValueTable},
};
use crate::{Error, Result, ports::Agent, tictactoe::Player};

/// Everything needed to rebuild a trained agent: its kind, the four
/// hyperparameters and the value table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTdAgent {
    pub version: u32,
    pub kind: LearnerKind,
    pub params: TdParams,
    pub values: ValueTable,
}

impl SavedTdAgent {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &TdAgent) -> Self {
        Self {
            version: Self::VERSION,
            kind: agent.kind(),
            params: *agent.params(),
            values: agent.values().clone(),
        }
    }

    /// Rebuild the agent seated on `side`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot was written by another format version
    /// or carries out-of-range parameters.
    pub fn to_agent(&self, side: Player) -> Result<TdAgent> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedFormatVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        self.params.validate()?;

        let mut agent = TdAgent::with_kind(self.kind, self.params).with_values(self.values.clone());
        agent.set_side(side);
        Ok(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ports::Trainable,
        tictactoe::{GameOutcome, Grid},
    };

    fn trained_agent() -> TdAgent {
        let mut agent = TdAgent::symmetric(TdParams::default().with_draw_rewards(0.4, 0.6));
        agent.enable_learning();
        let mut grid = Grid::new();
        for (pos, player) in [(4, Player::X), (0, Player::O), (8, Player::X)] {
            grid.apply_move(pos, player);
            agent.store_state(&grid);
        }
        agent.set_reward(GameOutcome::Draw).unwrap();
        agent
    }

    #[test]
    fn test_msgpack_roundtrip() {
        let agent = trained_agent();
        let saved = SavedTdAgent::from_agent(&agent);

        let bytes = rmp_serde::to_vec(&saved).unwrap();
        let loaded: SavedTdAgent = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(loaded, saved);

        let restored = loaded.to_agent(Player::O).unwrap();
        assert_eq!(restored.kind(), LearnerKind::TdSymmetric);
        assert_eq!(restored.side(), Player::O);
        assert_eq!(restored.params(), agent.params());
        assert_eq!(restored.values(), agent.values());
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let mut saved = SavedTdAgent::from_agent(&trained_agent());
        saved.version = 99;
        assert!(matches!(
            saved.to_agent(Player::X),
            Err(Error::UnsupportedFormatVersion { found: 99, .. })
        ));
    }
}
