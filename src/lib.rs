//! Temporal-difference learning for tic-tac-toe
//!
//! This crate provides:
//! - A 3×3 tic-tac-toe rules engine with move simulation and symmetry transforms
//! - Tabular TD(0) learners, plain and symmetry-folding
//! - A turn controller driving games between any two agents
//! - Batched training and evaluation pipelines
//! - MessagePack persistence of trained learners
//! - A concurrent game-session registry with idle expiry

pub mod adapters;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod players;
pub mod ports;
pub mod sessions;
pub mod td_learning;
pub mod tictactoe;

pub use error::{Error, Result};
