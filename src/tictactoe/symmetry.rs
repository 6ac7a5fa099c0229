//! The eight geometric symmetries of the 3x3 board

use serde::{Deserialize, Serialize};

use super::board::{CELL_COUNT, Cell, Cells, Grid};

/// A rotation or reflection of the board (dihedral group of the square)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symmetry {
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
    /// Mirror across the horizontal axis (top and bottom rows swap)
    ReflectHorizontal,
    /// Mirror across the vertical axis (left and right columns swap)
    ReflectVertical,
    /// Mirror across the main diagonal (0, 4, 8)
    ReflectLeftDiagonal,
    /// Mirror across the anti-diagonal (2, 4, 6)
    ReflectRightDiagonal,
}

impl Symmetry {
    /// All symmetries in lookup order, identity first
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::Rotate90,
        Symmetry::Rotate180,
        Symmetry::Rotate270,
        Symmetry::ReflectHorizontal,
        Symmetry::ReflectVertical,
        Symmetry::ReflectLeftDiagonal,
        Symmetry::ReflectRightDiagonal,
    ];

    /// Where the cell at `(row, col)` lands under this symmetry
    pub fn map_coordinates(self, row: usize, col: usize) -> (usize, usize) {
        match self {
            Symmetry::Identity => (row, col),
            Symmetry::Rotate90 => (2 - col, row),
            Symmetry::Rotate180 => (2 - row, 2 - col),
            Symmetry::Rotate270 => (col, 2 - row),
            Symmetry::ReflectHorizontal => (2 - row, col),
            Symmetry::ReflectVertical => (row, 2 - col),
            Symmetry::ReflectLeftDiagonal => (col, row),
            Symmetry::ReflectRightDiagonal => (2 - col, 2 - row),
        }
    }

    /// Apply the symmetry to a position (0-8)
    pub fn transform_position(self, pos: usize) -> usize {
        let (row, col) = self.map_coordinates(pos / 3, pos % 3);
        row * 3 + col
    }

    /// The symmetry that undoes this one
    pub fn inverse(self) -> Symmetry {
        match self {
            Symmetry::Rotate90 => Symmetry::Rotate270,
            Symmetry::Rotate270 => Symmetry::Rotate90,
            // remaining elements are involutions
            other => other,
        }
    }

    /// Rebuild the board with every cell moved to its mapped position
    pub fn apply(self, cells: &Cells) -> Cells {
        let mut transformed = [Cell::Empty; CELL_COUNT];
        for (pos, &cell) in cells.iter().enumerate() {
            transformed[self.transform_position(pos)] = cell;
        }
        transformed
    }

    /// All eight forms of a board, in [`Symmetry::ALL`] order
    pub fn forms(cells: &Cells) -> [Cells; 8] {
        Symmetry::ALL.map(|symmetry| symmetry.apply(cells))
    }
}

impl Grid {
    /// Apply a symmetry to the grid
    pub fn transform(&self, symmetry: Symmetry) -> Self {
        Grid::from_cells(symmetry.apply(self.cells()))
    }
}
