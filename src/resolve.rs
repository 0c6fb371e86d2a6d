//! Cascade resolution.
//!
//! Applies a swap to the board and resolves the resulting cascade: matched
//! groups are cleared simultaneously, gravity compacts each column, cleared
//! cells refill from the board's generator, and the cycle repeats until the
//! matcher reports nothing. The ordered list of cleared groups (the cascade
//! trace) is returned for scoring.
//!
//! A finite grid with a finite template table cannot cascade forever unless
//! a template is self-sustaining, so the loop carries a hard pass cap and
//! panics on overrun instead of spinning.

use thiserror::Error;

use crate::board::{Board, Pos};
use crate::matcher::{find_matches, find_matches_with_focus, MatchResult};
use crate::movegen::Move;

/// Hard upper bound on resolution passes per cascade. Exceeding it means a
/// template or configuration bug, never a legitimate board.
pub const CASCADE_CAP: usize = 1000;

/// Errors raised when a move cannot be applied. The board is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidMoveError {
    #[error("cell {0} is out of bounds")]
    OutOfBounds(Pos),

    #[error("cell {0} is empty")]
    EmptyCell(Pos),
}

/// Applies `mv` to the board in place: swaps the two cells, then resolves
/// the cascade to its fixed point. Returns the ordered cascade trace.
///
/// Validation is all-or-nothing: if either cell is out of bounds or empty,
/// the board is not modified. A structurally valid swap that produces no
/// match is not an error; it swaps and returns an empty trace (enumeration
/// filters unproductive moves before they reach a real board).
pub fn apply(board: &mut Board, mv: Move) -> Result<Vec<MatchResult>, InvalidMoveError> {
    for pos in [mv.a, mv.b] {
        if !board.in_bounds(pos) {
            return Err(InvalidMoveError::OutOfBounds(pos));
        }
        if board.get(pos).is_none() {
            return Err(InvalidMoveError::EmptyCell(pos));
        }
    }
    board.swap(mv.a, mv.b);
    Ok(run_cascade(board, &[mv.a, mv.b]))
}

/// Resolves a board with no swap context until it is match-free. Used to
/// settle freshly generated boards; single-orb picks never fire here.
pub fn settle(board: &mut Board) -> Vec<MatchResult> {
    run_cascade(board, &[])
}

fn run_cascade(board: &mut Board, focus: &[Pos]) -> Vec<MatchResult> {
    let mut trace = Vec::new();
    for pass in 0.. {
        assert!(
            pass < CASCADE_CAP,
            "cascade exceeded {} passes: template or configuration bug",
            CASCADE_CAP
        );
        // The swap context only exists on the first pass; afterwards the
        // swapped cells have been cleared, fallen, or refilled.
        let matches = if pass == 0 {
            find_matches_with_focus(board, focus)
        } else {
            find_matches(board)
        };
        if matches.is_empty() {
            break;
        }
        for m in &matches {
            board.clear(&m.cells);
        }
        board.apply_gravity();
        board.refill();
        trace.extend(matches);
    }
    trace
}
