//! Scoring weights for position evaluation
//!
//! Terminal scores scale with the number of cells so that heuristic totals,
//! which grow with the board, always stay well below a decided game.

use crate::board::CellClass;

/// Scoring weights for evaluation
pub struct Weights;

impl Weights {
    /// Base of the per-line potential: a live line holding `k` markers
    /// is worth `LINE_BASE^k`
    pub const LINE_BASE: i64 = 3;

    /// Multiplier for a line one placement away from completion
    pub const NEAR_COMPLETE_FACTOR: i64 = 2;

    // Positional bonuses per controlled cell
    pub const CENTER: i64 = 30;
    pub const CORNER: i64 = 20;
    pub const EDGE: i64 = 10;

    /// Terminal score multiplier per board cell
    pub const WIN_PER_CELL: i64 = 1_000_000_000;

    /// Fork bonus multiplier per board cell
    pub const FORK_PER_CELL: i64 = 100_000;
}

/// Magnitude of a decided game on a board of dimension `size`.
#[inline]
#[must_use]
pub fn win_score(size: usize) -> i64 {
    (size * size) as i64 * Weights::WIN_PER_CELL
}

/// Bonus for a double threat (two lines completable at once).
#[inline]
#[must_use]
pub fn fork_bonus(size: usize) -> i64 {
    (size * size) as i64 * Weights::FORK_PER_CELL
}

/// Potential of an unblocked line holding `count` markers of one side.
///
/// Zero for an untouched line. Lines one placement from completion are
/// weighted double.
#[must_use]
pub fn line_potential(count: usize, size: usize) -> i64 {
    if count == 0 {
        return 0;
    }
    let base = Weights::LINE_BASE.pow(count as u32);
    if count + 1 == size {
        base * Weights::NEAR_COMPLETE_FACTOR
    } else {
        base
    }
}

/// Bonus for holding a cell of the given class.
#[inline]
#[must_use]
pub fn positional_bonus(class: CellClass) -> i64 {
    match class {
        CellClass::Center => Weights::CENTER,
        CellClass::Corner => Weights::CORNER,
        CellClass::Edge => Weights::EDGE,
        CellClass::Inner => 0,
    }
}
