//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Cells};

/// Winning line indices on the 3x3 board, in scan priority order
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// The first line whose three cells are equal and non-empty.
    ///
    /// Only one line is ever reported, even when several are complete.
    pub fn winning_line(cells: &Cells) -> Option<[usize; 3]> {
        WINNING_LINES
            .iter()
            .copied()
            .find(|&line| Self::is_complete(cells, &line))
    }

    fn is_complete(cells: &Cells, &[a, b, c]: &[usize; 3]) -> bool {
        cells[a] != Cell::Empty && cells[a] == cells[b] && cells[a] == cells[c]
    }
}
