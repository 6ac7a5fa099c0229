//! Concurrent game sessions.
//!
//! A [`SessionManager`] maps random session ids to [`GameSession`]s behind a
//! single lock and drops sessions that have been idle for too long. Each
//! session wraps one game between two agents chosen by [`PlayerKind`] and
//! reports [`GameInfo`] snapshots suitable for a presentation layer.
//!
//! [`PlayerKind`]: crate::players::PlayerKind

pub mod game;
pub mod manager;

pub use game::{GameInfo, GameSession};
pub use manager::{DEFAULT_EXPIRY, SessionManager, spawn_expiry_thread};
