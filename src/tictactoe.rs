//! Tic-Tac-Toe rules engine

pub mod board;
pub mod controller;
pub mod game;
pub mod lines;
pub mod symmetry;

pub use board::{CELL_COUNT, Cell, Cells, Grid, Player, SimulatedMove};
pub use controller::GameController;
pub use game::GameOutcome;
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use symmetry::Symmetry;
