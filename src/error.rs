//! Error types for the td-tictactoe crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: position {position} is already occupied")]
    InvalidMove { position: usize },

    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("game already over")]
    GameOver,

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("waiting for a move to be supplied")]
    AwaitingInput,

    #[error("trajectory has no states")]
    EmptyTrajectory,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("unknown player type '{input}'. Expected one of: {expected}")]
    UnknownPlayerType { input: String, expected: String },

    #[error("no game has been started")]
    NoActiveGame,

    #[error("{side} does not take moves from outside the game")]
    NotInteractive { side: crate::tictactoe::Player },

    #[error("unknown session '{id}'")]
    UnknownSession { id: String },

    #[error("unsupported save format version {found} (expected {expected})")]
    UnsupportedFormatVersion { found: u32, expected: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
