//! Transposition table for caching search results
//!
//! Entries are keyed by the board contents together with the searching side
//! and whose turn it is, and stored in a bounded [`LruCache`]. A stored score
//! is only reused when the entry was searched at least as deep as the
//! current request and its bound permits a cutoff.
//!
//! # Example
//!
//! ```
//! use tictactoe::board::{Board, Player};
//! use tictactoe::search::{EntryType, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1024);
//! let board = Board::parse("X.. .O. ...", 3).unwrap();
//! let key = TranspositionTable::key_for(&board, Player::O, true);
//!
//! tt.store(key.clone(), 5, 100, EntryType::Exact, Some(8));
//! assert_eq!(tt.lookup(&key, 5, -1000, 1000), Some((100, Some(8))));
//! ```

use crate::board::{Board, Player};
use crate::cache::{CacheStats, LruCache};

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

impl EntryType {
    /// Classify a fail-soft result against the window it was searched with.
    #[inline]
    pub fn classify(score: i64, alpha: i64, beta: i64) -> Self {
        if score <= alpha {
            EntryType::UpperBound
        } else if score >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        }
    }
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Remaining depth this entry was searched to
    pub depth: u32,
    pub score: i64,
    pub entry_type: EntryType,
    /// Best move found for this position
    pub best_move: Option<usize>,
}

/// Transposition table backed by a bounded LRU cache.
#[derive(Debug)]
pub struct TranspositionTable {
    entries: LruCache<String, TTEntry>,
}

impl TranspositionTable {
    /// Create a table holding at most `capacity` positions.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Build the key for a search node.
    ///
    /// `perspective` is the side the scores are relative to and
    /// `maximizing` tells whether that side is to move.
    #[must_use]
    pub fn key_for(board: &Board, perspective: Player, maximizing: bool) -> String {
        let mut key = board.key();
        key.push('|');
        key.push(perspective.symbol());
        key.push(if maximizing { '+' } else { '-' });
        key
    }

    /// Look up a position in the table.
    ///
    /// Returns `Some((score, best_move))` only when the entry is at least
    /// `depth` deep and its bound allows a cutoff inside `[alpha, beta]`.
    /// Use [`TranspositionTable::best_move`] for move ordering otherwise.
    pub fn lookup(
        &mut self,
        key: &str,
        depth: u32,
        alpha: i64,
        beta: i64,
    ) -> Option<(i64, Option<usize>)> {
        let entry = *self.entries.get(key)?;

        if entry.depth < depth {
            return None;
        }
        let usable = match entry.entry_type {
            EntryType::Exact => true,
            EntryType::LowerBound => entry.score >= beta,
            EntryType::UpperBound => entry.score <= alpha,
        };
        usable.then_some((entry.score, entry.best_move))
    }

    /// Best move recorded for a position, regardless of depth or bound.
    #[must_use]
    pub fn best_move(&self, key: &str) -> Option<usize> {
        self.entries.peek(key).and_then(|e| e.best_move)
    }

    /// Store a search result.
    ///
    /// Depth-preferred: an existing deeper entry for the same position is
    /// kept.
    pub fn store(
        &mut self,
        key: String,
        depth: u32,
        score: i64,
        entry_type: EntryType,
        best_move: Option<usize>,
    ) {
        if let Some(existing) = self.entries.peek(key.as_str()) {
            if existing.depth > depth {
                return;
            }
        }
        self.entries.put(
            key,
            TTEntry {
                depth,
                score,
                entry_type,
                best_move,
            },
        );
    }

    /// Clear all entries in the table.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.entries.stats()
    }
}
