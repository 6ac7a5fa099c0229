//! Command implementations for the CLI

pub mod compete;
pub mod play;
pub mod train;
