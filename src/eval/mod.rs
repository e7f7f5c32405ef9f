//! Position evaluation
//!
//! Contains:
//! - Scoring weights and terminal score scaling
//! - Threat and fork detection
//! - The heuristic evaluator and its memoizing wrapper

pub mod heuristic;
pub mod threats;
pub mod weights;

pub use heuristic::{evaluate, terminal_score, Evaluator, FORK_MIN_SIZE};
pub use threats::{
    count_fork_cells, count_threats, creates_fork, find_fork_move, lines_contested,
    threats_blocked, threats_created, LineCounts,
};
pub use weights::{fork_bonus, line_potential, positional_bonus, win_score, Weights};
