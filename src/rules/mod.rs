//! Game rules for N×N Tic-Tac-Toe
//!
//! This module implements win, tie and immediate-win detection.

pub mod win;

// Re-exports for convenient access
pub use win::{
    check_winner, completes_line, find_winning_move, winner_by_lines, winner_by_scan, GameResult,
    LINE_SCAN_THRESHOLD,
};
