//! Tabular temporal difference learning
//!
//! A [`TdAgent`] learns the probability of winning from every board it has
//! seen. After each game it walks its trajectory backwards, pulling every
//! state's value towards the value of its successor:
//!
//! ```text
//! V(s) ← V(s) + α [V(s') − V(s)]
//! ```
//!
//! Terminal states are anchored to a fixed reward (1 for a win, 0 for a loss,
//! a per-side constant for a draw) and never move afterwards.
//!
//! ## Learner kinds
//!
//! | Kind | Value table key |
//! |------|-----------------|
//! | [`LearnerKind::Td`] | the literal board |
//! | [`LearnerKind::TdSymmetric`] | the first of the board's 8 symmetric forms already in the table |
//!
//! ## Usage Example
//!
//! ```
//! use td_tictactoe::td_learning::{TdAgent, TdParams};
//!
//! let params = TdParams::default().with_alpha(0.2).with_epsilon(0.05);
//! let agent = TdAgent::symmetric(params).with_seed(7);
//! assert_eq!(agent.params().alpha, 0.2);
//! ```

pub mod agent;
pub mod params;
pub mod serialization;
pub mod value_table;

pub use agent::{INITIAL_VALUE, TdAgent};
pub use params::TdParams;
pub use serialization::SavedTdAgent;
pub use value_table::{LearnerKind, ValueTable};
