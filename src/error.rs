//! Error types for the move engine.

use thiserror::Error;

use crate::board::Mark;

/// Errors raised while validating input or driving a game.
///
/// Every variant is a local validation failure: the engine never starts a
/// search on input that produced one of these.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid board size: expected 9 cells, got {got}")]
    InvalidBoardSize { got: usize },

    #[error("invalid cell symbol '{symbol}' at position {position}")]
    InvalidCellSymbol { symbol: String, position: usize },

    #[error("invalid queue index {index} for {mark} (must be 0-8)")]
    InvalidQueueIndex { mark: Mark, index: i64 },

    #[error("queue for {mark} holds {len} entries (at most 3 allowed)")]
    QueueOverflow { mark: Mark, len: usize },

    #[error("queue for {mark} disagrees with the board at cell {index}")]
    QueueBoardMismatch { mark: Mark, index: usize },

    #[error("cell {index} is off the board (must be 0-8)")]
    InvalidCell { index: i64 },

    #[error("cell {index} is already occupied")]
    CellOccupied { index: usize },

    #[error("invalid mark '{0}' (expected 'X' or 'O')")]
    InvalidMark(String),

    #[error("invalid depth '{0}'")]
    InvalidDepth(String),

    #[error("game over")]
    GameOver,

    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
