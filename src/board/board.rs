//! Board structure
//!
//! Cells are stored row-major: position `p` is row `p / size`, column
//! `p % size`. The cell vector always has exactly `size * size` entries;
//! every constructor enforces it.

use std::fmt;

use super::lines::{default_lines, lines_for, LineSet};
use super::{Cell, Player, DEFAULT_SIZE};
use crate::error::{EngineError, EngineResult};

/// Game board
#[derive(Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    lines: &'static LineSet,
}

impl Board {
    /// Create an empty board. Fails unless `size` is in 3..=20.
    pub fn new(size: usize) -> EngineResult<Self> {
        let lines = lines_for(size)?;
        Ok(Self {
            size,
            cells: vec![None; size * size],
            lines,
        })
    }

    /// Wrap an existing cell vector, checking its length against `size`.
    pub fn from_cells(cells: Vec<Cell>, size: usize) -> EngineResult<Self> {
        let lines = lines_for(size)?;
        let expected = size * size;
        if cells.len() != expected {
            return Err(EngineError::LengthMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { size, cells, lines })
    }

    /// Parse a row-major text board: `X`/`O` for markers, `.`, `-` or `_`
    /// for empty cells. Whitespace is ignored.
    pub fn parse(text: &str, size: usize) -> EngineResult<Self> {
        let cells = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '.' | '-' | '_' => Ok(None),
                other => Player::from_symbol(other.encode_utf8(&mut [0; 4])).map(Some),
            })
            .collect::<EngineResult<Vec<Cell>>>()?;
        Self::from_cells(cells, size)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells (`size * size`)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Winning lines for this board's size
    #[inline]
    pub fn lines(&self) -> &'static LineSet {
        self.lines
    }

    /// Get marker at position (out-of-range positions read as empty)
    #[inline]
    pub fn get(&self, pos: usize) -> Cell {
        self.cells.get(pos).copied().flatten()
    }

    #[inline]
    pub fn is_empty_at(&self, pos: usize) -> bool {
        pos < self.cells.len() && self.cells[pos].is_none()
    }

    /// Empty positions in ascending index order.
    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.is_none().then_some(i))
            .collect()
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    #[inline]
    pub fn filled_count(&self) -> usize {
        self.cells.len() - self.empty_count()
    }

    #[inline]
    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&c| c == Some(player)).count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Check if no marker has been placed yet
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Player to move, assuming X opened and turns alternated.
    pub fn side_to_move(&self) -> Player {
        if self.count(Player::X) > self.count(Player::O) {
            Player::O
        } else {
            Player::X
        }
    }

    /// Return a new board with `player` placed at `pos`.
    ///
    /// Fails if the position is off the board or already occupied.
    pub fn make_move(&self, pos: usize, player: Player) -> EngineResult<Board> {
        if pos >= self.cells.len() {
            return Err(EngineError::InvalidPosition {
                position: pos,
                cells: self.cells.len(),
            });
        }
        if self.cells[pos].is_some() {
            return Err(EngineError::Occupied(pos));
        }
        let mut next = self.clone();
        next.cells[pos] = Some(player);
        Ok(next)
    }

    /// Place a marker in place (search only; caller guarantees legality)
    #[inline]
    pub(crate) fn place(&mut self, pos: usize, player: Player) {
        debug_assert!(self.cells[pos].is_none());
        self.cells[pos] = Some(player);
    }

    /// Remove a marker placed with `place`
    #[inline]
    pub(crate) fn remove(&mut self, pos: usize) {
        self.cells[pos] = None;
    }

    /// Canonical string encoding of the cell contents, used as cache key.
    pub fn key(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.map_or('-', Player::symbol))
            .collect()
    }
}

impl Default for Board {
    /// Empty board of [`DEFAULT_SIZE`]
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            cells: vec![None; DEFAULT_SIZE * DEFAULT_SIZE],
            lines: default_lines(),
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.cells == other.cells
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("cells", &self.key())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: Vec<String> = row
                .iter()
                .map(|c| c.map_or('.', Player::symbol).to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
