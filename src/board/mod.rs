//! Board representation for N×N Tic-Tac-Toe

pub mod board;
pub mod lines;

#[cfg(test)]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

// Re-exports
pub use board::Board;
pub use lines::{lines_for, CellClass, LineSet};

/// Smallest supported board dimension
pub const MIN_SIZE: usize = 3;
/// Largest supported board dimension
pub const MAX_SIZE: usize = 20;
/// Dimension used when nothing better is known (e.g. a corrupt history record)
pub const DEFAULT_SIZE: usize = 3;

/// Player markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get opponent marker
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    /// Parse a marker symbol (`"X"` or `"O"`, case-insensitive).
    pub fn from_symbol(symbol: &str) -> EngineResult<Player> {
        match symbol.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(EngineError::InvalidMarker(other.to_string())),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A board cell: a marker or empty
pub type Cell = Option<Player>;

/// A single placement in a game's move list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

impl Move {
    #[inline]
    pub fn new(position: usize, player: Player) -> Self {
        Self { position, player }
    }
}

/// Fail unless `size` is a supported board dimension.
#[inline]
pub fn validate_size(size: usize) -> EngineResult<()> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(EngineError::InvalidSize(size))
    }
}

/// Row and column of a position on a board of the given dimension
#[inline]
pub fn row_col(pos: usize, size: usize) -> (usize, usize) {
    (pos / size, pos % size)
}
