//! Ports (trait boundaries) between the game core and its collaborators.
//!
//! Move producers implement [`Agent`]; learning is an optional capability
//! exposed through [`Trainable`], and persistence goes through
//! [`AgentRepository`].

pub mod agent;
pub mod repository;
pub mod trainable;

pub use agent::{Agent, Interactive};
pub use repository::AgentRepository;
pub use trainable::Trainable;
