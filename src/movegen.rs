//! Legal move enumeration.
//!
//! A move is a swap of two orthogonally-adjacent occupied cells (adjacency
//! is the standard convention; arbitrary-pair swaps are not legal). A move
//! is kept only if simulating the swap on a scratch copy makes the matcher
//! report at least one group -- no gravity, no refill, no mutation of the
//! real board.
//!
//! Pairs are enumerated row-major via each cell's right and down neighbor,
//! so every unordered pair appears exactly once and the output order is
//! stable across calls. An empty result means the board is stuck.

use std::fmt;

use crate::board::{Board, Pos};
use crate::matcher::find_matches_with_focus;

/// A candidate swap between two adjacent cells. Carries intent only, never
/// board state. Stored in canonical row-major order so `swap(a, b)` and
/// `swap(b, a)` are the same move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub a: Pos,
    pub b: Pos,
}

impl Move {
    /// Builds a move, normalizing the pair into canonical order.
    pub fn new(a: Pos, b: Pos) -> Move {
        if a <= b {
            Move { a, b }
        } else {
            Move { a: b, b: a }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.a, self.b)
    }
}

/// Enumerates every legal move on the current board.
///
/// The board is not mutated; the swap test runs on a single scratch clone
/// that is swapped back after each probe.
pub fn find_all_valid_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut scratch = board.clone();

    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let a = Pos::new(row, col);
            if board.get(a).is_none() {
                continue;
            }
            for b in [Pos::new(row, col + 1), Pos::new(row + 1, col)] {
                if !board.in_bounds(b) || board.get(b).is_none() {
                    continue;
                }
                let mv = Move::new(a, b);
                scratch.swap(mv.a, mv.b);
                let productive = !find_matches_with_focus(&scratch, &[mv.a, mv.b]).is_empty();
                scratch.swap(mv.a, mv.b);
                if productive {
                    moves.push(mv);
                }
            }
        }
    }

    moves
}
