//! Game records for storage and replay
//!
//! A finished game is stored as JSON:
//!
//! ```json
//! {"board":"XOX-O-X--","moves":[{"position":0,"player":"X"}],"size":3,"timestamp":"2024-05-01T12:00:00Z"}
//! ```
//!
//! `board` uses the same encoding as [`Board::key`]. Reading is defensive:
//! [`deserialize_board_state`] turns any malformed record into an empty
//! default one, so a corrupt entry cannot break a history viewer.

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::board::{validate_size, Board, Move, DEFAULT_SIZE};
use crate::error::EngineError;

/// Reasons a stored record cannot be read
#[derive(thiserror::Error, Debug)]
pub enum HistoryError {
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid board: {0}")]
    Board(#[from] EngineError),
    #[error("move {index} targets position {position} on a board of {cells} cells")]
    MoveOutOfRange {
        index: usize,
        position: usize,
        cells: usize,
    },
}

/// On-disk form
#[derive(Serialize, Deserialize)]
struct StoredRecord {
    board: String,
    moves: Vec<Move>,
    size: usize,
    timestamp: DateTime<Utc>,
}

/// A game's final board, its move list and when it was recorded
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub board: Board,
    pub moves: Vec<Move>,
    pub size: usize,
    pub timestamp: DateTime<Utc>,
}

impl GameRecord {
    /// Record a game now.
    pub fn new(board: Board, moves: Vec<Move>) -> Self {
        Self {
            size: board.size(),
            board,
            moves,
            timestamp: Utc::now(),
        }
    }

    /// Empty board of the default size, no moves, epoch timestamp.
    pub fn empty() -> Self {
        Self {
            board: Board::default(),
            moves: Vec::new(),
            size: DEFAULT_SIZE,
            timestamp: DateTime::<Utc>::default(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&StoredRecord {
            board: self.board.key(),
            moves: self.moves.clone(),
            size: self.size,
            timestamp: self.timestamp,
        })
    }

    /// Strict parse: any inconsistency is an error.
    pub fn from_json(text: &str) -> Result<Self, HistoryError> {
        let stored: StoredRecord = serde_json::from_str(text)?;
        validate_size(stored.size)?;
        let board = Board::parse(&stored.board, stored.size)?;
        let cells = board.cell_count();
        if let Some((index, m)) = stored
            .moves
            .iter()
            .enumerate()
            .find(|(_, m)| m.position >= cells)
        {
            return Err(HistoryError::MoveOutOfRange {
                index,
                position: m.position,
                cells,
            });
        }
        Ok(Self {
            board,
            moves: stored.moves,
            size: stored.size,
            timestamp: stored.timestamp,
        })
    }
}

/// Serialize a board and its move list, stamped with the current time.
pub fn serialize_board_state(board: &Board, moves: &[Move]) -> serde_json::Result<String> {
    GameRecord::new(board.clone(), moves.to_vec()).to_json()
}

/// Read a stored record. Malformed input yields [`GameRecord::empty`].
pub fn deserialize_board_state(text: &str) -> GameRecord {
    GameRecord::from_json(text).unwrap_or_else(|e| {
        warn!("discarding unreadable game record: {e}");
        GameRecord::empty()
    })
}

/// Board snapshots of a replay: the empty board, then one per move.
///
/// Stops at the first move that cannot be applied. An invalid `size`
/// yields no snapshots.
pub fn replay_game(moves: &[Move], size: usize) -> Vec<Board> {
    let mut board = match Board::new(size) {
        Ok(board) => board,
        Err(e) => {
            warn!("cannot replay game: {e}");
            return Vec::new();
        }
    };
    let mut snapshots = Vec::with_capacity(moves.len() + 1);
    snapshots.push(board.clone());
    for (i, m) in moves.iter().enumerate() {
        match board.make_move(m.position, m.player) {
            Ok(next) => {
                board = next;
                snapshots.push(board.clone());
            }
            Err(e) => {
                warn!("replay stopped at move {i}: {e}");
                break;
            }
        }
    }
    snapshots
}
