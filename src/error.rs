//! Error types for the pipe grid engine and its file formats.

use crate::pipe::Pipe;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations raised by the walker and builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipeError {
    #[error("no starting position has been set")]
    NoStartingPosition,

    #[error("initial step already complete")]
    InitialStepTaken,

    #[error("walk already returned to the start cell")]
    WalkCompleted,

    #[error("next pipe not found at ({x}, {y})")]
    MissingPipe { x: i32, y: i32 },

    #[error("pipe '{pipe}' at ({x}, {y}) does not connect to the previous cell")]
    Disconnected { x: i32, y: i32, pipe: Pipe },

    #[error("no neighbour of ({x}, {y}) connects to it")]
    NoConnection { x: i32, y: i32 },

    #[error("walk did not close after {moves} moves")]
    Unterminated { moves: usize },

    #[error("'{0}' is not a valid pipe")]
    InvalidSymbol(char),

    #[error("puzzle has no start cell")]
    NoStart,

    #[error("walk has not returned to the start cell")]
    NotCompleted,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Pipe(#[from] PipeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}
