//! Registry of selectable player types

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, td_learning::LearnerKind};

/// Every player type a game can be set up with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Random,
    Learner(LearnerKind),
}

impl PlayerKind {
    /// All player types, sorted by code
    pub const ALL: [PlayerKind; 4] = [
        PlayerKind::Human,
        PlayerKind::Random,
        PlayerKind::Learner(LearnerKind::Td),
        PlayerKind::Learner(LearnerKind::TdSymmetric),
    ];

    pub fn code(self) -> &'static str {
        match self {
            PlayerKind::Human => "Human",
            PlayerKind::Random => "Random",
            PlayerKind::Learner(kind) => kind.code(),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PlayerKind::Human => "Human Player",
            PlayerKind::Random => "Random Player",
            PlayerKind::Learner(kind) => kind.description(),
        }
    }

    /// The learner behind this type, if it learns
    pub fn learner_kind(self) -> Option<LearnerKind> {
        match self {
            PlayerKind::Learner(kind) => Some(kind),
            PlayerKind::Human | PlayerKind::Random => None,
        }
    }

    pub fn is_learner(self) -> bool {
        self.learner_kind().is_some()
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PlayerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerKind::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownPlayerType {
                input: s.to_string(),
                expected: PlayerKind::ALL
                    .iter()
                    .map(|kind| kind.code())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_sorted() {
        let codes: Vec<_> = PlayerKind::ALL.iter().map(|kind| kind.code()).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_parse_roundtrip() {
        for kind in PlayerKind::ALL {
            assert_eq!(kind.to_string().parse::<PlayerKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_lists_choices() {
        let err = "Minimax".parse::<PlayerKind>().unwrap_err();
        assert!(err.to_string().contains("Human, Random, TD, TDS"));
    }

    #[test]
    fn test_only_td_kinds_learn() {
        assert!(!PlayerKind::Human.is_learner());
        assert!(!PlayerKind::Random.is_learner());
        assert_eq!(
            PlayerKind::Learner(LearnerKind::TdSymmetric).learner_kind(),
            Some(LearnerKind::TdSymmetric)
        );
    }
}
