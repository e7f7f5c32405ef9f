//! Bounded memoization shared by the evaluator and the search
//!
//! Both caches are [`LruCache`] instances owned by an engine. Their capacity
//! depends on the board dimension: positions on small boards recur often, so
//! they get the most room.

pub mod lru;

pub use lru::{CacheStats, LruCache};

/// Capacity for boards up to 3×3
pub const SMALL_BOARD_CAPACITY: usize = 50_000;
/// Capacity for boards up to 6×6
pub const MEDIUM_BOARD_CAPACITY: usize = 10_000;
/// Capacity for anything larger
pub const LARGE_BOARD_CAPACITY: usize = 2_000;

/// Cache capacity for a board dimension.
///
/// Non-increasing in `size`.
#[must_use]
pub fn capacity_for(size: usize) -> usize {
    match size {
        0..=3 => SMALL_BOARD_CAPACITY,
        4..=6 => MEDIUM_BOARD_CAPACITY,
        _ => LARGE_BOARD_CAPACITY,
    }
}
