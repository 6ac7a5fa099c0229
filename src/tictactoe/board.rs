//! Grid representation, rule checks and reversible move simulation

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{game::GameOutcome, lines::LineAnalyzer};
use crate::{Error, Result};

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// Literal board contents, row-major
pub type Cells = [Cell; CELL_COUNT];

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// The player occupying this cell, if any
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }
}

/// A side in the game. X always opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Seat index: X is 0, O is 1
    pub fn index(self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// The live board of one game.
///
/// The grid knows nothing about turn order: it only enforces which cells may
/// still be claimed and derives the outcome from its contents on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: Cells,
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Grid {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Build a grid from literal cell contents
    pub fn from_cells(cells: Cells) -> Self {
        Grid { cells }
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Classify why a move would be illegal.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPosition`] when `pos` is outside 0-8
    /// - [`Error::GameOver`] when an outcome has already been decided
    /// - [`Error::InvalidMove`] when the cell is occupied
    pub fn check_move(&self, pos: usize) -> Result<()> {
        if pos >= CELL_COUNT {
            return Err(Error::InvalidPosition { position: pos });
        }
        if self.outcome().is_some() {
            return Err(Error::GameOver);
        }
        if self.cells[pos] != Cell::Empty {
            return Err(Error::InvalidMove { position: pos });
        }
        Ok(())
    }

    /// True iff the position is on the board, empty, and the game is undecided
    pub fn is_valid_move(&self, pos: usize) -> bool {
        self.check_move(pos).is_ok()
    }

    /// Place a piece without validation.
    ///
    /// Callers are expected to have checked the move with [`Grid::check_move`].
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside 0-8.
    pub fn apply_move(&mut self, pos: usize, player: Player) {
        self.cells[pos] = player.to_cell();
    }

    /// Empty cell indices in ascending order
    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether no empty cell remains
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// First completed line in row, column, diagonal order
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        LineAnalyzer::winning_line(&self.cells)
    }

    /// Derive the outcome; `None` while the game continues
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.winning_line() {
            Some([first, _, _]) => self.cells[first].to_player().map(GameOutcome::Win),
            None if self.is_full() => Some(GameOutcome::Draw),
            None => None,
        }
    }

    /// Tentatively play a move.
    ///
    /// The returned guard exposes the resulting outcome and board snapshot and
    /// empties the cell again when dropped, including during unwinding.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Grid::check_move`].
    pub fn simulate_move(&mut self, pos: usize, player: Player) -> Result<SimulatedMove<'_>> {
        self.check_move(pos)?;
        self.apply_move(pos, player);
        Ok(SimulatedMove {
            grid: self,
            position: pos,
        })
    }

    /// Closure form of [`Grid::simulate_move`]
    pub fn with_simulated_move<T>(
        &mut self,
        pos: usize,
        player: Player,
        f: impl FnOnce(Option<GameOutcome>, &Cells) -> T,
    ) -> Result<T> {
        let simulated = self.simulate_move(pos, player)?;
        Ok(f(simulated.outcome(), simulated.snapshot()))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let winning = self.winning_line().unwrap_or([usize::MAX; 3]);
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            for col in 0..3 {
                let pos = row * 3 + col;
                if col > 0 {
                    write!(f, "|")?;
                }
                let (prefix, suffix) = if winning.contains(&pos) {
                    ('(', ')')
                } else {
                    (' ', ' ')
                };
                match self.cells[pos] {
                    Cell::Empty => write!(f, "{prefix}{}{suffix}", pos + 1)?,
                    cell => write!(f, "{prefix}{}{suffix}", cell.to_char())?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A move applied to a grid for inspection only.
///
/// Dropping the guard restores the simulated cell to empty.
#[derive(Debug)]
pub struct SimulatedMove<'a> {
    grid: &'a mut Grid,
    position: usize,
}

impl SimulatedMove<'_> {
    pub fn position(&self) -> usize {
        self.position
    }

    /// Outcome of the board with the move applied
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.grid.outcome()
    }

    /// Board contents with the move applied
    pub fn snapshot(&self) -> &Cells {
        &self.grid.cells
    }
}

impl Drop for SimulatedMove<'_> {
    fn drop(&mut self) {
        self.grid.cells[self.position] = Cell::Empty;
    }
}
