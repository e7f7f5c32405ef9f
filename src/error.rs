//! Error types for the engine
//!
//! Every failure here is a modeling error: the caller handed the engine
//! something that cannot exist on a real board. They are reported at the
//! point of detection and never retried.

/// Engine errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Board dimension outside the supported range
    #[error("board size {0} is out of range (3-20)")]
    InvalidSize(usize),

    /// Position index past the end of the board
    #[error("position {position} is out of range for a board of {cells} cells")]
    InvalidPosition { position: usize, cells: usize },

    /// Position already holds a marker
    #[error("position {0} is already occupied")]
    Occupied(usize),

    /// Marker symbol that is neither X nor O
    #[error("invalid marker {0:?}")]
    InvalidMarker(String),

    /// Cell count does not match `size * size`
    #[error("board has {actual} cells, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Move requested on a full board
    #[error("no moves available")]
    NoMovesAvailable,

    /// A policy produced a move outside the available set
    #[error("policy chose position {0}, which is not an available move")]
    IllegalChoice(usize),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
