//! Board state.
//!
//! Holds the orb grid and the session's refill generator. The grid is a
//! fixed-size rows x cols rectangle stored row-major; a cell is empty only
//! transiently, between a clear and the refill that follows it. Gravity is
//! per-column toward the bottom row, and refill enters from the top edge.
//!
//! The refill generator is owned by the board and threaded through every
//! refill explicitly; there is no process-wide randomness source. Cloning a
//! board clones the generator state, so a clone replays the same refill
//! stream as the original -- this is what makes evaluation simulations
//! predictive of the real `apply`.

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::orb::{OrbKind, ALL_ORB_KINDS};
use crate::shape::ShapeSet;

/// A grid position. Ordered row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Pos {
        Pos { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The refill generator backing a board.
#[derive(Debug, Clone)]
pub enum OrbSource {
    /// Seeded pseudo-random generator; the normal experiment mode.
    Seeded(SmallRng),
    /// Scripted generator cycling through a fixed sequence of colors, for
    /// tests and controlled experiments.
    Cycle { kinds: Vec<OrbKind>, next: usize },
}

impl OrbSource {
    /// A pseudo-random source seeded once for the session.
    pub fn seeded(seed: u64) -> OrbSource {
        OrbSource::Seeded(SmallRng::seed_from_u64(seed))
    }

    /// A scripted source that cycles through `kinds` forever.
    pub fn cycle(kinds: &[OrbKind]) -> OrbSource {
        assert!(!kinds.is_empty(), "cycle source needs at least one kind");
        OrbSource::Cycle {
            kinds: kinds.to_vec(),
            next: 0,
        }
    }

    /// Draws the next orb color.
    pub fn next_orb(&mut self) -> OrbKind {
        match self {
            OrbSource::Seeded(rng) => ALL_ORB_KINDS[rng.gen_range(0..ALL_ORB_KINDS.len())],
            OrbSource::Cycle { kinds, next } => {
                let kind = kinds[*next % kinds.len()];
                *next += 1;
                kind
            }
        }
    }
}

/// Errors raised when parsing a board from text rows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("board text is empty")]
    Empty,

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("unknown symbol '{symbol}' at ({row}, {col})")]
    UnknownSymbol {
        row: usize,
        col: usize,
        symbol: char,
    },
}

/// The soul board: an orb grid plus the session's refill generator and
/// active shape set.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major; `None` only between a clear and the following refill.
    cells: Vec<Option<OrbKind>>,
    shapes: ShapeSet,
    source: OrbSource,
}

impl Board {
    /// Creates a fully-occupied `rows x cols` board with the default shape
    /// set, filled from a generator seeded with `seed` and settled so the
    /// starting position is match-free.
    pub fn new(rows: usize, cols: usize, seed: u64) -> Board {
        Board::with_shapes(rows, cols, seed, ShapeSet::default())
    }

    /// Like [`Board::new`] with an explicit active shape set.
    pub fn with_shapes(rows: usize, cols: usize, seed: u64, shapes: ShapeSet) -> Board {
        Board::from_source(rows, cols, shapes, OrbSource::seeded(seed))
    }

    /// Creates a board filled and settled from an explicit generator.
    pub fn from_source(rows: usize, cols: usize, shapes: ShapeSet, source: OrbSource) -> Board {
        assert!(rows > 0 && cols > 0, "board must have at least one cell");
        let mut board = Board {
            rows,
            cols,
            cells: vec![None; rows * cols],
            shapes,
            source,
        };
        board.refill();
        crate::resolve::settle(&mut board);
        board
    }

    /// Parses a board verbatim from text rows (one string per row, symbols
    /// as in [`OrbKind::symbol`], `.` for an empty cell). The grid is taken
    /// as-is: no settling, so engineered layouts survive exactly.
    pub fn from_rows(
        rows: &[&str],
        shapes: ShapeSet,
        source: OrbSource,
    ) -> Result<Board, ParseBoardError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(ParseBoardError::Empty);
        }
        let cols = rows[0].chars().count();
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (r, line) in rows.iter().enumerate() {
            let got = line.chars().count();
            if got != cols {
                return Err(ParseBoardError::RaggedRow {
                    row: r,
                    expected: cols,
                    got,
                });
            }
            for (c, symbol) in line.chars().enumerate() {
                if symbol == '.' {
                    cells.push(None);
                } else {
                    match OrbKind::from_symbol(symbol) {
                        Some(kind) => cells.push(Some(kind)),
                        None => {
                            return Err(ParseBoardError::UnknownSymbol {
                                row: r,
                                col: c,
                                symbol,
                            })
                        }
                    }
                }
            }
        }
        Ok(Board {
            rows: rows.len(),
            cols,
            cells,
            shapes,
            source,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The session's active shape set.
    pub fn shapes(&self) -> ShapeSet {
        self.shapes
    }

    /// Whether a position lies on the board.
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// The orb at `pos`, or `None` if the cell is empty or out of bounds.
    pub fn get(&self, pos: Pos) -> Option<OrbKind> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells[self.index(pos)]
    }

    fn index(&self, pos: Pos) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Swaps the contents of two in-bounds cells.
    pub(crate) fn swap(&mut self, a: Pos, b: Pos) {
        assert!(self.in_bounds(a) && self.in_bounds(b), "swap out of bounds");
        let (ia, ib) = (self.index(a), self.index(b));
        self.cells.swap(ia, ib);
    }

    /// Empties every listed cell.
    pub(crate) fn clear(&mut self, cells: &[Pos]) {
        for &pos in cells {
            let idx = self.index(pos);
            debug_assert!(self.cells[idx].is_some(), "clearing an empty cell");
            self.cells[idx] = None;
        }
    }

    /// Slides surviving orbs toward the bottom row within each column,
    /// preserving their relative order. Empties end up at the top.
    pub(crate) fn apply_gravity(&mut self) {
        for col in 0..self.cols {
            let mut write = self.rows;
            for row in (0..self.rows).rev() {
                if let Some(kind) = self.cells[row * self.cols + col] {
                    write -= 1;
                    self.cells[write * self.cols + col] = Some(kind);
                }
            }
            for row in 0..write {
                self.cells[row * self.cols + col] = None;
            }
        }
    }

    /// Fills every empty cell from the refill generator, in row-major order
    /// (top edge first, matching the refill direction).
    pub(crate) fn refill(&mut self) {
        for i in 0..self.cells.len() {
            if self.cells[i].is_none() {
                self.cells[i] = Some(self.source.next_orb());
            }
        }
    }

    /// Renders the board as plain text: one symbol per orb, row-major, one
    /// line per row, `.` for an empty cell. Callers layer any coloring or
    /// formatting on top.
    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            for col in 0..self.cols {
                match self.cells[row * self.cols + col] {
                    Some(kind) => out.push(kind.symbol()),
                    None => out.push('.'),
                }
            }
            out.push('\n');
        }
        out
    }
}
