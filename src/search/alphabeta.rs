//! Minimax search with alpha-beta pruning and iterative deepening
//!
//! This module implements the exhaustive search behind the Hard difficulty.
//! Scores are always relative to one fixed side (the *perspective*): that
//! side maximizes, the opponent minimizes.
//!
//! # Features
//!
//! - Alpha-beta pruning with fail-soft bounds
//! - Transposition table with exact/lower/upper bound entries
//! - Move ordering (TT move, wins, blocks, threats, position)
//! - Wall-clock deadline: nodes past the deadline return the static
//!   evaluation, and the interrupted iteration is discarded
//! - Early exit from iterative deepening once a forced win is proven
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use tictactoe::board::{Board, Player};
//! use tictactoe::eval::Evaluator;
//! use tictactoe::search::{Searcher, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(10_000);
//! let mut evaluator = Evaluator::new(10_000);
//! let board = Board::parse("OO. XX. ...", 3).unwrap();
//!
//! let mut searcher = Searcher::new(&mut tt, &mut evaluator, Player::O);
//! let result = searcher.search_timed(&board, Duration::from_secs(5));
//! assert_eq!(result.best_move, Some(2));
//! ```

use std::time::{Duration, Instant};

use log::debug;

use crate::board::{Board, Player};
use crate::eval::{terminal_score, win_score, Evaluator};
use crate::rules::check_winner;

use super::ordering::order_moves;
use super::tt::{EntryType, TranspositionTable};

/// Infinity score for alpha-beta bounds
pub const INF: i64 = i64::MAX / 4;

/// Maximum search depth for a board dimension.
///
/// A non-increasing step function: 3×3 is searched to the end of the game,
/// 8×8 and above only two plies.
#[must_use]
pub fn max_depth_for(size: usize) -> u32 {
    match size {
        0..=3 => 9,
        4 => 6,
        5 => 4,
        6 | 7 => 3,
        _ => 2,
    }
}

/// Check whether a score proves a win for the perspective side.
#[inline]
#[must_use]
pub fn is_win_score(score: i64, size: usize) -> bool {
    score >= win_score(size) - (size * size) as i64
}

/// Check whether a score proves a loss for the perspective side.
#[inline]
#[must_use]
pub fn is_loss_score(score: i64, size: usize) -> bool {
    is_win_score(-score, size)
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Total alpha-beta cutoffs
    pub beta_cutoffs: u64,
    /// Cutoffs on the first move tried (measures move ordering quality)
    pub first_move_cutoffs: u64,
    /// Total TT lookups
    pub tt_lookups: u64,
    /// TT lookups that returned a usable score
    pub tt_score_hits: u64,
    /// TT lookups that provided a best move for ordering
    pub tt_move_hits: u64,
}

impl SearchStats {
    /// First-move cutoff rate in percent
    pub fn first_move_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64 * 100.0
        }
    }

    /// TT score hit rate in percent
    pub fn tt_score_rate(&self) -> f64 {
        if self.tt_lookups == 0 {
            0.0
        } else {
            self.tt_score_hits as f64 / self.tt_lookups as f64 * 100.0
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<usize>,
    /// Score of the best move for the perspective side
    pub score: i64,
    /// Deepest completed iteration (0 if none completed)
    pub depth: u32,
    /// Total nodes searched
    pub nodes: u64,
    /// An iteration was abandoned at the deadline
    pub timed_out: bool,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Alpha-beta searcher borrowing an engine's caches.
pub struct Searcher<'a> {
    tt: &'a mut TranspositionTable,
    evaluator: &'a mut Evaluator,
    perspective: Player,
    deadline: Option<Instant>,
    nodes: u64,
    timed_out: bool,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    /// Create a searcher scoring positions for `perspective`.
    pub fn new(
        tt: &'a mut TranspositionTable,
        evaluator: &'a mut Evaluator,
        perspective: Player,
    ) -> Self {
        Self {
            tt,
            evaluator,
            perspective,
            deadline: None,
            nodes: 0,
            timed_out: false,
            stats: SearchStats::default(),
        }
    }

    /// Search to a fixed depth with no deadline.
    ///
    /// Used for the endgame solve, where `depth` is the number of empty
    /// cells and the search runs to the end of the game.
    pub fn search(&mut self, board: &Board, depth: u32) -> SearchResult {
        self.reset(None);
        let depth = depth.max(1);
        let mut work = board.clone();
        let (best_move, score, depth) = match self.search_root(&mut work, depth) {
            Some((mv, score)) => (Some(mv), score, depth),
            None => (None, 0, 0),
        };
        self.finish(best_move, score, depth)
    }

    /// Iterative deepening under a wall-clock budget.
    ///
    /// Runs depth 1, 2, ... up to [`max_depth_for`] (capped by the number of
    /// empty cells) and returns the best move of the deepest completed
    /// iteration. Stops early on a proven win. If not even the first
    /// iteration completes, the first available move is returned with
    /// `depth == 0`.
    pub fn search_timed(&mut self, board: &Board, budget: Duration) -> SearchResult {
        let start = Instant::now();
        self.reset(Some(start + budget));

        let size = board.size();
        let max_depth = max_depth_for(size).min(board.empty_count() as u32);
        let mut work = board.clone();
        let mut best: Option<(usize, i64, u32)> = None;

        for depth in 1..=max_depth {
            let Some((mv, score)) = self.search_root(&mut work, depth) else {
                debug!(
                    "depth {depth} abandoned after {}ms ({} nodes)",
                    start.elapsed().as_millis(),
                    self.nodes
                );
                break;
            };
            debug!(
                "depth {depth}: move {mv} score {score} nodes {} ({}ms)",
                self.nodes,
                start.elapsed().as_millis()
            );
            best = Some((mv, score, depth));
            if is_win_score(score, size) {
                break;
            }
        }

        match best {
            Some((mv, score, depth)) => self.finish(Some(mv), score, depth),
            None => {
                let first = board.available_moves().first().copied();
                self.finish(first, 0, 0)
            }
        }
    }

    fn reset(&mut self, deadline: Option<Instant>) {
        self.deadline = deadline;
        self.nodes = 0;
        self.timed_out = false;
        self.stats = SearchStats::default();
    }

    fn finish(&mut self, best_move: Option<usize>, score: i64, depth: u32) -> SearchResult {
        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
            timed_out: self.timed_out,
            stats: std::mem::take(&mut self.stats),
        }
    }

    fn out_of_time(&mut self) -> bool {
        if !self.timed_out {
            if let Some(deadline) = self.deadline {
                self.timed_out = Instant::now() >= deadline;
            }
        }
        self.timed_out
    }

    /// Search every root move to `depth` plies.
    ///
    /// Returns `None` when there is nothing to play or the deadline
    /// interrupted the iteration.
    fn search_root(&mut self, board: &mut Board, depth: u32) -> Option<(usize, i64)> {
        let me = self.perspective;
        let key = TranspositionTable::key_for(board, me, true);
        let mut moves = board.available_moves();
        if moves.is_empty() {
            return None;
        }
        let tt_move = self.tt.best_move(&key);
        order_moves(board, &mut moves, me, tt_move);

        let mut alpha = -INF;
        let mut best_score = -INF;
        let mut best_move = moves[0];

        for &pos in &moves {
            board.place(pos, me);
            let score = self.minimax(board, depth - 1, alpha, INF, false);
            board.remove(pos);

            if self.timed_out {
                return None;
            }
            if score > best_score {
                best_score = score;
                best_move = pos;
            }
            alpha = alpha.max(best_score);
        }

        self.tt
            .store(key, depth, best_score, EntryType::Exact, Some(best_move));
        Some((best_move, best_score))
    }

    /// Minimax with alpha-beta pruning.
    ///
    /// `maximizing` is true when the perspective side is to move. Returns
    /// the static evaluation at depth 0 or once the deadline has passed.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
    ) -> i64 {
        self.nodes += 1;

        if self.out_of_time() || depth == 0 {
            return self.evaluator.evaluate(board, self.perspective);
        }
        if let Some(score) = terminal_score(board, check_winner(board), self.perspective) {
            return score;
        }

        let key = TranspositionTable::key_for(board, self.perspective, maximizing);
        self.stats.tt_lookups += 1;
        if let Some((score, _)) = self.tt.lookup(&key, depth, alpha, beta) {
            self.stats.tt_score_hits += 1;
            return score;
        }
        let tt_move = self.tt.best_move(&key);
        if tt_move.is_some() {
            self.stats.tt_move_hits += 1;
        }

        let mover = if maximizing {
            self.perspective
        } else {
            self.perspective.opponent()
        };
        let mut moves = board.available_moves();
        order_moves(board, &mut moves, mover, tt_move);

        let (alpha0, beta0) = (alpha, beta);
        let mut best = if maximizing { -INF } else { INF };
        let mut best_move = None;

        for (i, &pos) in moves.iter().enumerate() {
            board.place(pos, mover);
            let score = self.minimax(board, depth - 1, alpha, beta, !maximizing);
            board.remove(pos);

            if maximizing {
                if score > best {
                    best = score;
                    best_move = Some(pos);
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                    best_move = Some(pos);
                }
                beta = beta.min(best);
            }

            if beta <= alpha {
                self.stats.beta_cutoffs += 1;
                if i == 0 {
                    self.stats.first_move_cutoffs += 1;
                }
                break;
            }
        }

        // Scores below an interrupted node are not trustworthy
        if !self.timed_out {
            let entry_type = EntryType::classify(best, alpha0, beta0);
            self.tt.store(key, depth, best, entry_type, best_move);
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caches() -> (TranspositionTable, Evaluator) {
        (TranspositionTable::new(50_000), Evaluator::new(50_000))
    }

    #[test]
    fn test_max_depth_non_increasing() {
        assert_eq!(max_depth_for(3), 9);
        assert_eq!(max_depth_for(8), 2);
        assert_eq!(max_depth_for(20), 2);
        for size in 3..20 {
            assert!(max_depth_for(size) >= max_depth_for(size + 1));
        }
    }

    #[test]
    fn test_search_finds_winning_move() {
        let (mut tt, mut ev) = caches();
        let board = Board::parse("OO. XX. ...", 3).unwrap();
        let mut searcher = Searcher::new(&mut tt, &mut ev, Player::O);
        let result = searcher.search(&board, 3);
        assert_eq!(result.best_move, Some(2));
        assert!(is_win_score(result.score, 3));
    }

    #[test]
    fn test_search_blocks_opponent_win() {
        let (mut tt, mut ev) = caches();
        let board = Board::parse("XX. .O. ...", 3).unwrap();
        let mut searcher = Searcher::new(&mut tt, &mut ev, Player::O);
        let result = searcher.search(&board, board.empty_count() as u32);
        assert_eq!(result.best_move, Some(2));
    }

    #[test]
    fn test_search_prefers_faster_win() {
        let (mut tt, mut ev) = caches();
        // O wins now at 2, or later elsewhere
        let board = Board::parse("OO. XX. X..", 3).unwrap();
        let mut searcher = Searcher::new(&mut tt, &mut ev, Player::O);
        let result = searcher.search(&board, 4);
        assert_eq!(result.best_move, Some(2));
        assert_eq!(result.score, win_score(3) - 6);
    }

    #[test]
    fn test_losing_score() {
        let (mut tt, mut ev) = caches();
        // X has two open threats; O can only block one
        let board = Board::parse("XX. X.. ..O", 3).unwrap();
        let mut searcher = Searcher::new(&mut tt, &mut ev, Player::O);
        let result = searcher.search(&board, board.empty_count() as u32);
        assert!(is_loss_score(result.score, 3), "score {}", result.score);
    }

    #[test]
    fn test_full_solve_of_empty_board_is_draw() {
        let (mut tt, mut ev) = caches();
        let board = Board::new(3).unwrap();
        let mut searcher = Searcher::new(&mut tt, &mut ev, Player::X);
        let result = searcher.search(&board, 9);
        assert_eq!(result.score, 0);
        assert!(result.best_move.is_some());
        assert!(result.stats.beta_cutoffs > 0);
    }

    #[test]
    fn test_iterative_deepening_completes_small_board() {
        let (mut tt, mut ev) = caches();
        let board = Board::parse("X.. .O. ...", 3).unwrap();
        let mut searcher = Searcher::new(&mut tt, &mut ev, Player::X);
        let result = searcher.search_timed(&board, Duration::from_secs(30));
        assert_eq!(result.depth, 7);
        assert!(!result.timed_out);
        assert!(board.is_empty_at(result.best_move.unwrap()));
    }

    #[test]
    fn test_iterative_deepening_stops_on_forced_win() {
        let (mut tt, mut ev) = caches();
        let board = Board::parse("OO. XX. ...", 3).unwrap();
        let mut searcher = Searcher::new(&mut tt, &mut ev, Player::O);
        let result = searcher.search_timed(&board, Duration::from_secs(30));
        assert_eq!(result.best_move, Some(2));
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn test_zero_budget_falls_back_to_first_move() {
        let (mut tt, mut ev) = caches();
        let board = Board::parse("X.... ..... ..O.. ..... .....", 5).unwrap();
        let mut searcher = Searcher::new(&mut tt, &mut ev, Player::X);
        let result = searcher.search_timed(&board, Duration::ZERO);
        assert_eq!(result.depth, 0);
        assert!(result.timed_out);
        assert_eq!(result.best_move, Some(1));
    }

    #[test]
    fn test_timed_out_nodes_not_stored() {
        let (mut tt, mut ev) = caches();
        let board = Board::new(6).unwrap();
        {
            let mut searcher = Searcher::new(&mut tt, &mut ev, Player::X);
            let result = searcher.search_timed(&board, Duration::ZERO);
            assert_eq!(result.depth, 0);
        }
        assert_eq!(tt.stats().len, 0);
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let (mut tt, mut ev) = caches();
        let board = Board::parse("X... .O.. .... ....", 4).unwrap();
        let copy = board.clone();
        let mut searcher = Searcher::new(&mut tt, &mut ev, Player::X);
        let _ = searcher.search(&board, 2);
        assert_eq!(board, copy);
    }

    #[test]
    fn test_tt_reused_across_searches() {
        let (mut tt, mut ev) = caches();
        let board = Board::parse("X.. ... ...", 3).unwrap();
        let first = Searcher::new(&mut tt, &mut ev, Player::O).search(&board, 8);
        let second = Searcher::new(&mut tt, &mut ev, Player::O).search(&board, 8);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
        assert!(second.nodes < first.nodes);
    }
}
