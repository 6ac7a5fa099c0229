//! Move producers other than the learners, plus the player type registry

pub mod factory;
pub mod human;
pub mod kind;
pub mod random;

pub use factory::AgentFactory;
pub use human::HumanPlayer;
pub use kind::PlayerKind;
pub use random::RandomPlayer;
