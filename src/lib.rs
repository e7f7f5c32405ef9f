//! Adaptive AI opponent for N×N Tic-Tac-Toe
//!
//! Boards range from 3×3 to 20×20. A player wins by filling a whole row,
//! column or main diagonal.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation, markers and winning-line geometry
//! - [`rules`]: Win, tie and immediate-win detection
//! - [`eval`]: Position evaluation, threats and forks
//! - [`cache`]: Bounded LRU cache used for memoization
//! - [`search`]: Minimax with alpha-beta, transposition table, iterative deepening
//! - [`engine`]: Difficulty policies and the fail-safe move boundary
//! - [`history`]: Game records and replay
//!
//! # Quick Start
//!
//! ```
//! use tictactoe::{check_winner, AIEngine, Board, Difficulty, GameResult, Player};
//!
//! let mut engine = AIEngine::new();
//! let mut board = Board::new(3).unwrap();
//! board = board.make_move(0, Player::X).unwrap();
//!
//! // AI responds as O
//! if let Some(pos) = engine.get_move(&board, Player::O, Difficulty::Medium) {
//!     board = board.make_move(pos, Player::O).unwrap();
//! }
//! assert_eq!(board.filled_count(), 2);
//! assert_eq!(check_winner(&board), GameResult::InProgress);
//! ```
//!
//! # Difficulty
//!
//! - Easy: random with occasional sensible moves
//! - Medium: win, block, fork, fork block, center/corner, heuristic
//! - Hard: exact search on small boards, Medium above 7×7

pub mod board;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod history;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Move, Player};
pub use config::{ConfigError, Difficulty, EngineConfig};
pub use engine::{AIEngine, EngineCacheStats, MoveFailure, MoveResult, MoveSource};
pub use error::{EngineError, EngineResult};
pub use history::{deserialize_board_state, replay_game, serialize_board_state, GameRecord};
pub use rules::{check_winner, GameResult};
