//! Win condition checking for N×N Tic-Tac-Toe
//!
//! A player wins by filling a whole row, column or main diagonal.
//!
//! Two detectors exist and must agree on every board:
//! - [`winner_by_lines`] walks the precomputed winning combinations
//! - [`winner_by_scan`] treats each cell as a potential line start and looks
//!   `size` cells ahead in four directions
//!
//! [`check_winner`] picks the first for small boards and the second for
//! larger ones. When both players own a complete line (only possible on
//! hand-built boards) X is reported, on both paths.

use std::fmt;

use crate::board::{Board, Player};

/// Largest size resolved through the combination list
pub const LINE_SCAN_THRESHOLD: usize = 5;

/// Direction vectors (row, col): right, down, down-right, down-left
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Outcome of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Winner(Player),
    /// Board full, no complete line
    Tie,
    /// Game not decided yet
    InProgress,
}

impl GameResult {
    #[inline]
    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::Winner(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn is_over(self) -> bool {
        !matches!(self, GameResult::InProgress)
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Winner(p) => write!(f, "{p}"),
            GameResult::Tie => write!(f, "tie"),
            GameResult::InProgress => write!(f, "in progress"),
        }
    }
}

/// Check for a winner, a tie, or an undecided game.
pub fn check_winner(board: &Board) -> GameResult {
    if board.size() <= LINE_SCAN_THRESHOLD {
        winner_by_lines(board)
    } else {
        winner_by_scan(board)
    }
}

/// Winner detection over the precomputed combination set.
pub fn winner_by_lines(board: &Board) -> GameResult {
    let mut found = Found::default();
    for line in board.lines().lines() {
        if let Some(p) = line_owner(board, line) {
            if found.record(p) {
                break;
            }
        }
    }
    found.resolve(board)
}

/// Winner detection by scanning every cell in four directions.
///
/// Never materializes the combination list.
pub fn winner_by_scan(board: &Board) -> GameResult {
    let size = board.size() as isize;
    let mut found = Found::default();

    'cells: for r in 0..size {
        for c in 0..size {
            let Some(first) = board.get((r * size + c) as usize) else {
                continue;
            };
            for (dr, dc) in DIRECTIONS {
                let end_r = r + dr * (size - 1);
                let end_c = c + dc * (size - 1);
                if end_r < 0 || end_r >= size || end_c < 0 || end_c >= size {
                    continue;
                }
                let complete = (1..size).all(|i| {
                    let pos = (r + dr * i) * size + (c + dc * i);
                    board.get(pos as usize) == Some(first)
                });
                if complete && found.record(first) {
                    break 'cells;
                }
            }
        }
    }
    found.resolve(board)
}

/// Check whether `player` owns a complete line through `pos`.
///
/// Only the lines through the cell are examined, so this is the cheap test
/// to run right after a placement.
pub fn completes_line(board: &Board, pos: usize, player: Player) -> bool {
    let lines = board.lines();
    lines
        .lines_through(pos)
        .iter()
        .any(|&idx| lines.line(idx).iter().all(|&p| board.get(p) == Some(player)))
}

/// Find the first empty cell (ascending index) that wins on the spot for `player`.
pub fn find_winning_move(board: &Board, player: Player) -> Option<usize> {
    let lines = board.lines();
    board.available_moves().into_iter().find(|&pos| {
        lines.lines_through(pos).iter().any(|&idx| {
            lines
                .line(idx)
                .iter()
                .all(|&p| p == pos || board.get(p) == Some(player))
        })
    })
}

fn line_owner(board: &Board, line: &[usize]) -> Option<Player> {
    let first = board.get(line[0])?;
    line[1..]
        .iter()
        .all(|&p| board.get(p) == Some(first))
        .then_some(first)
}

/// Complete lines seen so far, per player
#[derive(Default)]
struct Found {
    x: bool,
    o: bool,
}

impl Found {
    /// Record a complete line. Returns true once both players are seen.
    fn record(&mut self, player: Player) -> bool {
        match player {
            Player::X => self.x = true,
            Player::O => self.o = true,
        }
        self.x && self.o
    }

    fn resolve(&self, board: &Board) -> GameResult {
        if self.x {
            GameResult::Winner(Player::X)
        } else if self.o {
            GameResult::Winner(Player::O)
        } else if board.is_full() {
            GameResult::Tie
        } else {
            GameResult::InProgress
        }
    }
}
