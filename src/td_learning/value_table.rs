//! State value storage with literal or symmetry-aware keys

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    tictactoe::{Cells, Symmetry},
};

/// How a board is turned into a value table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnerKind {
    /// Key is the literal board
    #[default]
    Td,
    /// Key is the first symmetric form of the board already present in the
    /// table, or the literal board when the class is new
    TdSymmetric,
}

impl LearnerKind {
    pub const ALL: [LearnerKind; 2] = [LearnerKind::Td, LearnerKind::TdSymmetric];

    /// Short code used on the command line
    pub fn code(self) -> &'static str {
        match self {
            LearnerKind::Td => "TD",
            LearnerKind::TdSymmetric => "TDS",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            LearnerKind::Td => "Temporal Difference Learning Player",
            LearnerKind::TdSymmetric => "Temporal Difference Symmetric Learning Player",
        }
    }

    /// File name prefix for persisted agents of this kind
    pub fn file_stem(self) -> &'static str {
        match self {
            LearnerKind::Td => "td_learning",
            LearnerKind::TdSymmetric => "td_symmetric_learning",
        }
    }
}

impl fmt::Display for LearnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LearnerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LearnerKind::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownPlayerType {
                input: s.to_string(),
                expected: "TD, TDS".to_string(),
            })
    }
}

/// Learned value per board key.
///
/// Serialized as a list of `(board, value)` entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(Cells, f64)>", into = "Vec<(Cells, f64)>")]
pub struct ValueTable {
    values: HashMap<Cells, f64>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under exactly this key
    pub fn get(&self, key: &Cells) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn insert(&mut self, key: Cells, value: f64) {
        self.values.insert(key, value);
    }

    pub fn contains_key(&self, key: &Cells) -> bool {
        self.values.contains_key(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Cells, &f64)> {
        self.values.iter()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// The key a board is stored under for the given learner kind.
    ///
    /// For [`LearnerKind::TdSymmetric`] the eight forms are scanned in
    /// [`Symmetry::ALL`] order; once one form of an equivalence class has
    /// been inserted every other form resolves to it.
    pub fn resolve_key(&self, cells: &Cells, kind: LearnerKind) -> Cells {
        match kind {
            LearnerKind::Td => *cells,
            LearnerKind::TdSymmetric => Symmetry::ALL
                .iter()
                .map(|symmetry| symmetry.apply(cells))
                .find(|form| self.values.contains_key(form))
                .unwrap_or(*cells),
        }
    }
}

impl From<Vec<(Cells, f64)>> for ValueTable {
    fn from(entries: Vec<(Cells, f64)>) -> Self {
        Self {
            values: entries.into_iter().collect(),
        }
    }
}

impl From<ValueTable> for Vec<(Cells, f64)> {
    fn from(table: ValueTable) -> Self {
        table.values.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Cell;

    fn corner_x() -> Cells {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells
    }

    #[test]
    fn test_literal_key_is_identity() {
        let mut table = ValueTable::new();
        let mut other_corner = [Cell::Empty; 9];
        other_corner[8] = Cell::X;
        table.insert(other_corner, 0.7);

        assert_eq!(table.resolve_key(&corner_x(), LearnerKind::Td), corner_x());
    }

    #[test]
    fn test_symmetric_key_finds_existing_form() {
        let mut table = ValueTable::new();
        let mut other_corner = [Cell::Empty; 9];
        other_corner[8] = Cell::X;
        table.insert(other_corner, 0.7);

        assert_eq!(
            table.resolve_key(&corner_x(), LearnerKind::TdSymmetric),
            other_corner
        );
    }

    #[test]
    fn test_symmetric_key_defaults_to_literal() {
        let table = ValueTable::new();
        assert_eq!(
            table.resolve_key(&corner_x(), LearnerKind::TdSymmetric),
            corner_x()
        );
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("tds".parse::<LearnerKind>().unwrap(), LearnerKind::TdSymmetric);
        assert_eq!("TD".parse::<LearnerKind>().unwrap(), LearnerKind::Td);
        assert!("Q".parse::<LearnerKind>().is_err());
    }

    #[test]
    fn test_entries_conversion_preserves_values() {
        let mut table = ValueTable::new();
        table.insert(corner_x(), 0.25);
        table.insert([Cell::Empty; 9], 0.5);

        let entries: Vec<(Cells, f64)> = table.clone().into();
        let rebuilt = ValueTable::from(entries);
        assert_eq!(rebuilt, table);
    }
}
