//! Heuristic evaluation function for N×N Tic-Tac-Toe positions
//!
//! A position is scored from X's point of view and negated for O, so
//! `evaluate(board, X) == -evaluate(board, O)` holds for every board. The
//! score blends:
//! - terminal detection (win, loss, tie)
//! - per-line potential for unblocked lines
//! - positional bonuses (center > corner > edge)
//! - double-threat and fork bonuses (4×4 and larger)
//!
//! [`Evaluator`] memoizes scores by board contents in a bounded LRU cache.

use log::trace;

use crate::board::{Board, Player};
use crate::cache::{CacheStats, LruCache};
use crate::rules::{check_winner, GameResult};

use super::threats::{count_fork_cells, LineCounts};
use super::weights::{fork_bonus, line_potential, positional_bonus, win_score};

/// Smallest board where fork detection is worth running
pub const FORK_MIN_SIZE: usize = 4;

/// Score of a decided game for `perspective`.
///
/// The filled-cell count is subtracted so that faster wins score higher and
/// slower losses score lower, independently of where the search started.
#[must_use]
pub fn terminal_score(board: &Board, result: GameResult, perspective: Player) -> Option<i64> {
    let magnitude = win_score(board.size()) - board.filled_count() as i64;
    match result {
        GameResult::Winner(p) if p == perspective => Some(magnitude),
        GameResult::Winner(_) => Some(-magnitude),
        GameResult::Tie => Some(0),
        GameResult::InProgress => None,
    }
}

/// Evaluate the board from the perspective of the given player (uncached).
///
/// Returns a score where:
/// - Positive values indicate advantage for `perspective`
/// - Negative values indicate disadvantage for `perspective`
/// - Decided games score close to `±win_score(size)`, ties score 0
#[must_use]
pub fn evaluate(board: &Board, perspective: Player) -> i64 {
    let score = evaluate_for_x(board);
    match perspective {
        Player::X => score,
        Player::O => -score,
    }
}

fn evaluate_for_x(board: &Board) -> i64 {
    let result = check_winner(board);
    if let Some(score) = terminal_score(board, result, Player::X) {
        return score;
    }

    let size = board.size();
    let lines = board.lines();

    // Line potential, with a bonus for standing double threats
    let mut line_score = 0i64;
    let mut x_threats = 0usize;
    let mut o_threats = 0usize;
    for line in lines.lines() {
        let c = LineCounts::of(board, line, Player::X);
        match (c.own, c.opp) {
            (0, 0) => {}
            (x, 0) => {
                line_score += line_potential(x, size);
                if c.is_threat() {
                    x_threats += 1;
                }
            }
            (0, o) => {
                line_score -= line_potential(o, size);
                if c.empty == 1 {
                    o_threats += 1;
                }
            }
            _ => {} // dead line
        }
    }
    if x_threats >= 2 {
        line_score += fork_bonus(size);
    }
    if o_threats >= 2 {
        line_score -= fork_bonus(size);
    }

    let position_score: i64 = board
        .cells()
        .iter()
        .enumerate()
        .filter_map(|(pos, cell)| {
            cell.map(|p| {
                let bonus = positional_bonus(lines.class(pos));
                if p == Player::X { bonus } else { -bonus }
            })
        })
        .sum();

    let fork_score = if size >= FORK_MIN_SIZE {
        let x_forks = count_fork_cells(board, Player::X) as i64;
        let o_forks = count_fork_cells(board, Player::O) as i64;
        (x_forks - o_forks) * fork_bonus(size)
    } else {
        0
    };

    line_score + position_score + fork_score
}

/// Memoizing evaluator.
///
/// Scores are cached by board contents only; the perspective is applied on
/// the way out, so one entry serves both players.
#[derive(Debug)]
pub struct Evaluator {
    cache: LruCache<String, i64>,
}

impl Evaluator {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Evaluate `board` for `perspective`, consulting the cache first.
    pub fn evaluate(&mut self, board: &Board, perspective: Player) -> i64 {
        let key = board.key();
        let score = match self.cache.get(key.as_str()) {
            Some(&score) => score,
            None => {
                let score = evaluate_for_x(board);
                trace!("eval miss {key} -> {score}");
                self.cache.put(key, score);
                score
            }
        };
        match perspective {
            Player::X => score,
            Player::O => -score,
        }
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_zero() {
        for size in [3, 4, 7, 12] {
            let board = Board::new(size).unwrap();
            assert_eq!(evaluate(&board, Player::X), 0);
            assert_eq!(evaluate(&board, Player::O), 0);
        }
    }

    #[test]
    fn test_win_and_loss() {
        let board = Board::parse("XXX OO. ...", 3).unwrap();
        let score = evaluate(&board, Player::X);
        assert_eq!(score, win_score(3) - 5);
        assert_eq!(evaluate(&board, Player::O), -score);
    }

    #[test]
    fn test_tie_is_zero() {
        let board = Board::parse("XOX XOO OXX", 3).unwrap();
        assert_eq!(evaluate(&board, Player::X), 0);
    }

    #[test]
    fn test_center_beats_corner_beats_edge() {
        let center = Board::parse("... .X. ...", 3).unwrap();
        let corner = Board::parse("X.. ... ...", 3).unwrap();
        let edge = Board::parse(".X. ... ...", 3).unwrap();
        let c = evaluate(&center, Player::X);
        let k = evaluate(&corner, Player::X);
        let e = evaluate(&edge, Player::X);
        assert!(c > k, "center {c} <= corner {k}");
        assert!(k > e, "corner {k} <= edge {e}");
    }

    #[test]
    fn test_negamax_symmetry() {
        let boards = [
            ("XO. .X. ..O", 3),
            ("X... .O.. ..X. ....", 4),
            ("XX.. O... ..O. ...X", 4),
            (".X... .O... ..X.. ...O. X....", 5),
        ];
        for (text, size) in boards {
            let board = Board::parse(text, size).unwrap();
            assert_eq!(
                evaluate(&board, Player::X),
                -evaluate(&board, Player::O),
                "asymmetric on {text}"
            );
        }
    }

    #[test]
    fn test_dead_line_scores_nothing() {
        // Row 0 holds both markers; only position and other lines remain
        let mixed = Board::parse("XO. ... ...", 3).unwrap();
        let mirrored = Board::parse("OX. ... ...", 3).unwrap();
        assert_eq!(
            evaluate(&mixed, Player::X),
            evaluate(&mirrored, Player::O)
        );
    }

    #[test]
    fn test_fork_bonus_applies_from_four() {
        // X threatens row 0 and column 3 at once through cell 3
        let board = Board::parse("XX.. .... ...X ...X", 4).unwrap();
        let score = evaluate(&board, Player::X);
        assert!(score >= fork_bonus(4), "score {score} misses fork bonus");
    }

    #[test]
    fn test_double_threat_bonus() {
        // X holds two open near-complete lines on 3×3
        let board = Board::parse("XX. X.. ..O", 3).unwrap();
        assert!(evaluate(&board, Player::X) >= fork_bonus(3));
    }

    #[test]
    fn test_evaluator_idempotent() {
        let mut evaluator = Evaluator::new(16);
        let board = Board::parse("X... .O.. ..X. ....", 4).unwrap();

        let first = evaluator.evaluate(&board, Player::X);
        let second = evaluator.evaluate(&board, Player::X);
        assert_eq!(first, second);
        assert_eq!(first, evaluate(&board, Player::X));

        let stats = evaluator.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn test_evaluator_shares_entry_across_perspectives() {
        let mut evaluator = Evaluator::new(16);
        let board = Board::parse("X.. .O. ..X", 3).unwrap();
        let x = evaluator.evaluate(&board, Player::X);
        let o = evaluator.evaluate(&board, Player::O);
        assert_eq!(x, -o);
        assert_eq!(evaluator.stats().len, 1);
    }

    #[test]
    fn test_evaluator_clear() {
        let mut evaluator = Evaluator::new(16);
        let board = Board::parse("X.. ... ...", 3).unwrap();
        evaluator.evaluate(&board, Player::X);
        evaluator.clear();
        assert_eq!(evaluator.stats().len, 0);
    }
}
