//! Winning lines and cell geometry per board size
//!
//! A [`LineSet`] is a pure function of the board dimension: every row, every
//! column and the two full diagonals, plus the reverse index from each cell to
//! the lines passing through it. Sets are built lazily, once per size, and
//! shared for the rest of the process. There are only eighteen legal sizes so
//! the cache never needs eviction.

use once_cell::sync::{Lazy, OnceCell};

use super::{validate_size, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
use crate::error::EngineResult;

static LINE_SETS: Lazy<Vec<OnceCell<LineSet>>> =
    Lazy::new(|| (MIN_SIZE..=MAX_SIZE).map(|_| OnceCell::new()).collect());

/// Get the line set for a board dimension, building it on first use.
pub fn lines_for(size: usize) -> EngineResult<&'static LineSet> {
    validate_size(size)?;
    Ok(LINE_SETS[size - MIN_SIZE].get_or_init(|| LineSet::build(size)))
}

/// Line set for [`DEFAULT_SIZE`], which needs no validation
pub(crate) fn default_lines() -> &'static LineSet {
    LINE_SETS[DEFAULT_SIZE - MIN_SIZE].get_or_init(|| LineSet::build(DEFAULT_SIZE))
}

/// Strategic class of a cell, used for positional bonuses and move ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    /// The middle cell (odd sizes) or one of the middle four (even sizes)
    Center,
    Corner,
    /// Border cell that is not a corner
    Edge,
    Inner,
}

/// Winning combinations and cell classes for one board size
#[derive(Debug)]
pub struct LineSet {
    size: usize,
    lines: Vec<Vec<usize>>,
    /// Indices into `lines` for each cell
    by_cell: Vec<Vec<usize>>,
    centers: Vec<usize>,
    corners: [usize; 4],
}

impl LineSet {
    fn build(size: usize) -> Self {
        let mut lines: Vec<Vec<usize>> = Vec::with_capacity(2 * size + 2);

        for r in 0..size {
            lines.push((0..size).map(|c| r * size + c).collect());
        }
        for c in 0..size {
            lines.push((0..size).map(|r| r * size + c).collect());
        }
        lines.push((0..size).map(|i| i * size + i).collect());
        lines.push((0..size).map(|i| i * size + (size - 1 - i)).collect());

        let mut by_cell = vec![Vec::new(); size * size];
        for (idx, line) in lines.iter().enumerate() {
            for &pos in line.iter() {
                by_cell[pos].push(idx);
            }
        }

        let mid = size / 2;
        let centers = if size % 2 == 1 {
            vec![mid * size + mid]
        } else {
            vec![
                (mid - 1) * size + (mid - 1),
                (mid - 1) * size + mid,
                mid * size + (mid - 1),
                mid * size + mid,
            ]
        };

        let last = size - 1;
        let corners = [0, last, last * size, last * size + last];

        Self {
            size,
            lines,
            by_cell,
            centers,
            corners,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All winning combinations: rows, then columns, then both diagonals
    #[inline]
    pub fn lines(&self) -> &[Vec<usize>] {
        &self.lines
    }

    #[inline]
    pub fn line(&self, idx: usize) -> &[usize] {
        &self.lines[idx]
    }

    /// Indices of the lines passing through `pos`
    #[inline]
    pub fn lines_through(&self, pos: usize) -> &[usize] {
        self.by_cell.get(pos).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline]
    pub fn centers(&self) -> &[usize] {
        &self.centers
    }

    #[inline]
    pub fn corners(&self) -> &[usize; 4] {
        &self.corners
    }

    /// Classify a cell. Center takes precedence over corner and edge.
    pub fn class(&self, pos: usize) -> CellClass {
        if self.centers.contains(&pos) {
            return CellClass::Center;
        }
        if self.corners.contains(&pos) {
            return CellClass::Corner;
        }
        let (r, c) = super::row_col(pos, self.size);
        let last = self.size - 1;
        if r == 0 || c == 0 || r == last || c == last {
            CellClass::Edge
        } else {
            CellClass::Inner
        }
    }
}
