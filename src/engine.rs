//! Main AI engine dispatching the difficulty policies
//!
//! The engine owns its caches (evaluation cache and transposition table) and
//! picks a move with one of three policies:
//!
//! - **Easy**: mostly random, sometimes defers to Medium, with a bias toward
//!   center and corner cells
//! - **Medium**: priority chain of immediate win, block, fork (4×4 and up),
//!   fork block, center/corner, an occasional random move, and finally the
//!   best one-ply evaluation
//! - **Hard**: immediate win, then Medium on large boards, an exact solve
//!   near the end of the game, and time-bounded iterative deepening
//!   otherwise
//!
//! [`AIEngine::get_ai_move`] is the boundary for game loops: it never fails.
//! Any internal error is logged, recorded in [`AIEngine::last_failure`], and
//! replaced by the first available move.
//!
//! # Example
//!
//! ```
//! use tictactoe::{AIEngine, Difficulty, EngineConfig, Player};
//!
//! let mut engine = AIEngine::with_config(EngineConfig {
//!     seed: Some(1),
//!     ..EngineConfig::default()
//! });
//!
//! // O to move: completing the top row beats blocking the middle one
//! let cells = vec![
//!     Some(Player::O), Some(Player::O), None,
//!     Some(Player::X), Some(Player::X), None,
//!     None, None, None,
//! ];
//! assert_eq!(engine.get_ai_move(&cells, Difficulty::Hard, 3), Some(2));
//! ```

use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::board::{Board, Cell, CellClass, Player, DEFAULT_SIZE};
use crate::cache::{capacity_for, CacheStats};
use crate::config::{Difficulty, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::eval::{find_fork_move, win_score, Evaluator, FORK_MIN_SIZE};
use crate::rules::find_winning_move;
use crate::search::{SearchResult, Searcher, TranspositionTable};

/// Rule or search phase that produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveSource {
    /// Completes a line on the spot
    ImmediateWin,
    /// Stops the opponent completing a line next turn
    Block,
    /// Creates two threats at once
    Fork,
    /// Occupies the cell where the opponent would fork
    ForkBlock,
    /// Center or corner preference
    Strategic,
    /// Uniform random choice
    Random,
    /// Best one-ply evaluation
    Heuristic,
    /// Exact search to the end of the game
    EndgameSolve,
    /// Deepest completed iteration under the time budget
    IterativeDeepening,
    /// No search iteration completed; first available move
    Fallback,
}

/// Result of a move selection with search statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveResult {
    pub best_move: usize,
    /// Score for the moving side (0 when the rule that fired has none)
    pub score: i64,
    pub source: MoveSource,
    /// Search depth reached (0 for rule-based moves)
    pub depth: u32,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Nodes searched
    pub nodes: u64,
}

impl MoveResult {
    /// Create a result for a rule-based choice
    #[inline]
    fn rule(pos: usize, score: i64, source: MoveSource) -> Self {
        Self {
            best_move: pos,
            score,
            source,
            depth: 0,
            time_ms: 0,
            nodes: 0,
        }
    }

    /// Create a result from a search
    #[inline]
    fn from_search(pos: usize, result: &SearchResult, source: MoveSource) -> Self {
        Self {
            best_move: pos,
            score: result.score,
            source,
            depth: result.depth,
            time_ms: 0,
            nodes: result.nodes,
        }
    }
}

/// A move selection that failed and was answered with a fallback move
#[derive(Debug, Clone, PartialEq)]
pub struct MoveFailure {
    pub error: EngineError,
    pub difficulty: Difficulty,
    pub size: usize,
    /// Move returned instead (`None` if the board had no empty cell)
    pub fallback: Option<usize>,
}

/// Occupancy of both engine caches
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineCacheStats {
    pub evaluation: CacheStats,
    pub transposition: CacheStats,
}

/// Main AI engine for N×N Tic-Tac-Toe.
///
/// Not meant for concurrent use: each engine owns its caches, so parallel
/// callers should create one engine each.
pub struct AIEngine {
    config: EngineConfig,
    rng: StdRng,
    /// Board dimension the caches are sized for
    size: usize,
    evaluator: Evaluator,
    tt: TranspositionTable,
    last_failure: Option<MoveFailure>,
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AIEngine {
    /// Create a new AI engine with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with explicit settings.
    ///
    /// Out-of-range probabilities are clamped into [0, 1].
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let config = config.sanitized();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let capacity = capacity_for(DEFAULT_SIZE);
        Self {
            config,
            rng,
            size: DEFAULT_SIZE,
            evaluator: Evaluator::new(capacity),
            tt: TranspositionTable::new(capacity),
            last_failure: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Pick a move for the configured AI side. Never fails.
    ///
    /// Returns `None` only when `cells` has no empty cell. Any other
    /// failure (bad size, length mismatch, internal error) is logged,
    /// recorded in [`AIEngine::last_failure`], and answered with the first
    /// empty cell.
    pub fn get_ai_move(
        &mut self,
        cells: &[Cell],
        difficulty: Difficulty,
        size: usize,
    ) -> Option<usize> {
        self.last_failure = None;
        let player = self.config.ai_player;
        let outcome = Board::from_cells(cells.to_vec(), size)
            .and_then(|board| self.get_move_with_stats(&board, player, difficulty));

        match outcome {
            Ok(result) => Some(result.best_move),
            Err(error) => {
                let fallback = cells.iter().position(Option::is_none);
                warn!("{difficulty} move failed on size {size}: {error}; playing {fallback:?}");
                self.last_failure = Some(MoveFailure {
                    error,
                    difficulty,
                    size,
                    fallback,
                });
                fallback
            }
        }
    }

    /// Pick a move for `player`, or `None` if selection fails.
    pub fn get_move(
        &mut self,
        board: &Board,
        player: Player,
        difficulty: Difficulty,
    ) -> Option<usize> {
        self.get_move_with_stats(board, player, difficulty)
            .ok()
            .map(|r| r.best_move)
    }

    /// Pick a move for `player` and report how it was found.
    ///
    /// # Errors
    ///
    /// `NoMovesAvailable` on a full board, `IllegalChoice` if a policy
    /// produced an occupied or out-of-range cell.
    pub fn get_move_with_stats(
        &mut self,
        board: &Board,
        player: Player,
        difficulty: Difficulty,
    ) -> EngineResult<MoveResult> {
        let start = Instant::now();
        self.prepare(board.size());

        let moves = board.available_moves();
        if moves.is_empty() {
            return Err(EngineError::NoMovesAvailable);
        }

        let mut result = match difficulty {
            Difficulty::Easy => self.easy_move(board, player, &moves),
            Difficulty::Medium => self.medium_move(board, player, &moves),
            Difficulty::Hard => self.hard_move(board, player, &moves),
        };
        if !board.is_empty_at(result.best_move) {
            return Err(EngineError::IllegalChoice(result.best_move));
        }

        result.time_ms = start.elapsed().as_millis() as u64;
        let r = &result;
        debug!(
            "{difficulty} {player}: {} via {:?} (score {}, depth {}, {} nodes, {}ms)",
            r.best_move, r.source, r.score, r.depth, r.nodes, r.time_ms
        );
        Ok(result)
    }

    /// Failure recorded by the last [`AIEngine::get_ai_move`] call, if any
    #[inline]
    pub fn last_failure(&self) -> Option<&MoveFailure> {
        self.last_failure.as_ref()
    }

    #[must_use]
    pub fn cache_stats(&self) -> EngineCacheStats {
        EngineCacheStats {
            evaluation: self.evaluator.stats(),
            transposition: self.tt.stats(),
        }
    }

    /// Empty both caches and forget the last failure.
    pub fn clear_caches(&mut self) {
        self.evaluator.clear();
        self.tt.clear();
        self.last_failure = None;
    }

    /// Resize the caches when a board of a new dimension arrives.
    fn prepare(&mut self, size: usize) {
        if size == self.size {
            return;
        }
        let capacity = capacity_for(size);
        info!(
            "board size changed {} -> {size}; rebuilding caches with capacity {capacity}",
            self.size
        );
        self.size = size;
        self.evaluator = Evaluator::new(capacity);
        self.tt = TranspositionTable::new(capacity);
    }

    fn easy_move(&mut self, board: &Board, player: Player, moves: &[usize]) -> MoveResult {
        if self.rng.gen_bool(self.config.easy_smart_chance) {
            debug!("easy defers to medium");
            return self.medium_move(board, player, moves);
        }

        let lines = board.lines();
        let strategic: Vec<usize> = moves
            .iter()
            .copied()
            .filter(|&pos| matches!(lines.class(pos), CellClass::Center | CellClass::Corner))
            .collect();
        if !strategic.is_empty() && self.rng.gen_bool(self.config.easy_strategic_bias) {
            let pos = strategic
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(strategic[0]);
            return MoveResult::rule(pos, 0, MoveSource::Strategic);
        }

        let pos = moves.choose(&mut self.rng).copied().unwrap_or(moves[0]);
        MoveResult::rule(pos, 0, MoveSource::Random)
    }

    fn medium_move(&mut self, board: &Board, player: Player, moves: &[usize]) -> MoveResult {
        let opponent = player.opponent();
        let win = win_score(board.size());

        if let Some(pos) = find_winning_move(board, player) {
            return MoveResult::rule(pos, win, MoveSource::ImmediateWin);
        }
        if let Some(pos) = find_winning_move(board, opponent) {
            return MoveResult::rule(pos, 0, MoveSource::Block);
        }
        if board.size() >= FORK_MIN_SIZE {
            if let Some(pos) = find_fork_move(board, player) {
                return MoveResult::rule(pos, 0, MoveSource::Fork);
            }
            if let Some(pos) = find_fork_move(board, opponent) {
                return MoveResult::rule(pos, 0, MoveSource::ForkBlock);
            }
        }
        if let Some(pos) = strategic_cell(board) {
            return MoveResult::rule(pos, 0, MoveSource::Strategic);
        }
        if self.rng.gen_bool(self.config.medium_random_chance) {
            let pos = moves.choose(&mut self.rng).copied().unwrap_or(moves[0]);
            return MoveResult::rule(pos, 0, MoveSource::Random);
        }

        let (pos, score) = self.best_heuristic_move(board, player, moves);
        MoveResult::rule(pos, score, MoveSource::Heuristic)
    }

    fn hard_move(&mut self, board: &Board, player: Player, moves: &[usize]) -> MoveResult {
        if let Some(pos) = find_winning_move(board, player) {
            return MoveResult::rule(pos, win_score(board.size()), MoveSource::ImmediateWin);
        }
        if board.size() > self.config.large_board_threshold {
            debug!(
                "size {} above large-board threshold {}; playing medium",
                board.size(),
                self.config.large_board_threshold
            );
            return self.medium_move(board, player, moves);
        }

        let empties = moves.len();
        let budget = self.config.time_budget();
        let mut searcher = Searcher::new(&mut self.tt, &mut self.evaluator, player);

        if empties <= self.config.endgame_threshold {
            let result = searcher.search(board, empties as u32);
            let pos = result.best_move.unwrap_or(moves[0]);
            return MoveResult::from_search(pos, &result, MoveSource::EndgameSolve);
        }

        let result = searcher.search_timed(board, budget);
        let source = if result.depth == 0 {
            MoveSource::Fallback
        } else {
            MoveSource::IterativeDeepening
        };
        let pos = result.best_move.unwrap_or(moves[0]);
        MoveResult::from_search(pos, &result, source)
    }

    /// Move with the best static evaluation after one ply.
    ///
    /// Ties go to the lowest index.
    fn best_heuristic_move(
        &mut self,
        board: &Board,
        player: Player,
        moves: &[usize],
    ) -> (usize, i64) {
        let mut work = board.clone();
        let mut best = (moves[0], i64::MIN);
        for &pos in moves {
            work.place(pos, player);
            let score = self.evaluator.evaluate(&work, player);
            work.remove(pos);
            if score > best.1 {
                best = (pos, score);
            }
        }
        best
    }
}

/// First empty center cell, else first empty corner.
fn strategic_cell(board: &Board) -> Option<usize> {
    let lines = board.lines();
    lines
        .centers()
        .iter()
        .chain(lines.corners().iter())
        .copied()
        .find(|&pos| board.is_empty_at(pos))
}
