//! Training and evaluation pipeline
//!
//! This module drives whole games between agents:
//! - Batched training of two learners against each other and against a
//!   random player, with win/draw statistics per batch
//! - Evaluation of trained learners against a random player

pub mod competition;
pub mod training;

pub use competition::{CompeteConfig, CompetitionReport, SideReport, compete_against_random};
pub use training::{
    BatchKind, BatchStats, Trainer, TrainerConfig, TrainingStats, play_game, play_training_game,
};
