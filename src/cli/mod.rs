//! CLI infrastructure for the tic-tac-toe learners
//!
//! This module provides the command-line interface for training learners,
//! measuring them against a random player and playing games in the console.

pub mod commands;
pub mod output;
