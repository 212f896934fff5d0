use thiserror::Error;

/// Errors that can occur while playing or searching a game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UtttError {
    /// The move was refused by the board. The board is left unchanged.
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    /// A move string could not be parsed.
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    /// A non-terminal position produced no legal moves.
    ///
    /// This can only happen if the board's state machine is broken, so
    /// callers should treat it as fatal rather than as a game result.
    #[error("No legal moves available")]
    NoAvailableMoves,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience Result type for engine operations
pub type Result<T> = std::result::Result<T, UtttError>;
