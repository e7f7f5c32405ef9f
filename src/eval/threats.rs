//! Threat and fork detection
//!
//! A *threat* is a line holding only one side's markers with exactly one
//! empty cell left: the next placement there wins. A *fork* is a placement
//! that creates two or more threats at once, so the opponent cannot block
//! them all.

use crate::board::{Board, Player};

/// Marker census of a single line, from one side's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineCounts {
    pub own: usize,
    pub opp: usize,
    pub empty: usize,
}

impl LineCounts {
    /// Count a line's cells for `player`.
    pub fn of(board: &Board, line: &[usize], player: Player) -> Self {
        line.iter().fold(Self::default(), |mut acc, &pos| {
            match board.get(pos) {
                Some(p) if p == player => acc.own += 1,
                Some(_) => acc.opp += 1,
                None => acc.empty += 1,
            }
            acc
        })
    }

    /// Line still completable by the counting side
    #[inline]
    pub fn is_live(&self) -> bool {
        self.opp == 0
    }

    /// One placement away from completion for the counting side
    #[inline]
    pub fn is_threat(&self) -> bool {
        self.opp == 0 && self.empty == 1
    }
}

/// Number of threats `player` would create by placing at the empty cell `pos`.
///
/// Counts lines through `pos` that would then hold only `player`'s markers
/// and exactly one empty cell.
pub fn threats_created(board: &Board, pos: usize, player: Player) -> usize {
    let lines = board.lines();
    lines
        .lines_through(pos)
        .iter()
        .filter(|&&idx| {
            let c = LineCounts::of(board, lines.line(idx), player);
            // `pos` itself is still empty, so a threat needs two empties now
            c.opp == 0 && c.empty == 2
        })
        .count()
}

/// Number of `opponent` threats that a placement at `pos` would block.
pub fn threats_blocked(board: &Board, pos: usize, player: Player) -> usize {
    let lines = board.lines();
    let opponent = player.opponent();
    lines
        .lines_through(pos)
        .iter()
        .filter(|&&idx| LineCounts::of(board, lines.line(idx), opponent).is_threat())
        .count()
}

/// Number of lines through `pos` that the opponent can still complete.
pub fn lines_contested(board: &Board, pos: usize, player: Player) -> usize {
    let lines = board.lines();
    let opponent = player.opponent();
    lines
        .lines_through(pos)
        .iter()
        .filter(|&&idx| {
            let c = LineCounts::of(board, lines.line(idx), opponent);
            c.own > 0 && c.is_live()
        })
        .count()
}

/// Check whether a placement at `pos` gives `player` two or more threats.
#[inline]
pub fn creates_fork(board: &Board, pos: usize, player: Player) -> bool {
    threats_created(board, pos, player) >= 2
}

/// First empty cell (ascending index) where `player` would fork.
pub fn find_fork_move(board: &Board, player: Player) -> Option<usize> {
    board
        .available_moves()
        .into_iter()
        .find(|&pos| creates_fork(board, pos, player))
}

/// Number of empty cells where `player` would fork.
pub fn count_fork_cells(board: &Board, player: Player) -> usize {
    board
        .available_moves()
        .into_iter()
        .filter(|&pos| creates_fork(board, pos, player))
        .count()
}

/// Number of threats `player` currently holds.
pub fn count_threats(board: &Board, player: Player) -> usize {
    board
        .lines()
        .lines()
        .iter()
        .filter(|line| LineCounts::of(board, line, player).is_threat())
        .count()
}
