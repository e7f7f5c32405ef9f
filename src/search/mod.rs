//! Search module for N×N Tic-Tac-Toe AI
//!
//! Contains:
//! - Transposition table for caching search results
//! - Move ordering heuristics
//! - Minimax with alpha-beta pruning and time-bounded iterative deepening

pub mod alphabeta;
pub mod ordering;
pub mod tt;

pub use alphabeta::{
    is_loss_score, is_win_score, max_depth_for, SearchResult, SearchStats, Searcher, INF,
};
pub use ordering::{order_moves, score_move};
pub use tt::{EntryType, TTEntry, TranspositionTable};
