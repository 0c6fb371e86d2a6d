//! Move evaluation and selection.
//!
//! Greedy single-move search: every legal move is simulated through its full
//! cascade on an isolated copy of the board (refill generator included, so
//! the simulation predicts exactly what the real `apply` would do), scored
//! under the priority + orb-bonus policy, and the maximum taken.
//!
//! Candidate simulations are independent and run in parallel; record order
//! is the enumeration order regardless of scheduling, so selection stays
//! deterministic. Deeper strategies can be layered on [`score_moves`]
//! without touching the simulator.

pub mod policy;

pub use policy::{cascade_score, ConfigurationError, PriorityConfig, DEFAULT_ORB_BONUS};

use rayon::prelude::*;
use thiserror::Error;

use crate::board::Board;
use crate::movegen::{find_all_valid_moves, Move};
use crate::resolve;

/// A scored candidate move. Transient: produced during selection, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRecord {
    pub mv: Move,
    pub score: i64,
}

/// Errors raised by selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    /// No legal productive move exists. A terminal signal for the caller,
    /// not a defect.
    #[error("no valid move on the current board")]
    NoValidMove,

    #[error(transparent)]
    InvalidConfig(#[from] ConfigurationError),
}

/// Scores every legal move by simulating its full cascade on a clone of the
/// board. Records appear in enumeration order.
pub fn score_moves(
    board: &Board,
    config: &PriorityConfig,
    orb_bonus: i64,
) -> Result<Vec<ScoreRecord>, ConfigurationError> {
    config.validate()?;
    let moves = find_all_valid_moves(board);
    Ok(moves
        .into_par_iter()
        .map(|mv| {
            let mut copy = board.clone();
            let trace = resolve::apply(&mut copy, mv)
                .expect("enumerated moves reference occupied in-bounds cells");
            ScoreRecord {
                mv,
                score: cascade_score(&trace, config, orb_bonus),
            }
        })
        .collect())
}

/// Picks the highest-scoring legal move. Ties go to the earliest candidate
/// in enumeration order, so selection is stable across runs with identical
/// input.
pub fn select_best(
    board: &Board,
    config: &PriorityConfig,
    orb_bonus: i64,
) -> Result<Move, SelectError> {
    let records = score_moves(board, config, orb_bonus)?;
    let mut best: Option<ScoreRecord> = None;
    for record in records {
        // Strict improvement only, so the earliest of equals wins.
        if best.map_or(true, |b| record.score > b.score) {
            best = Some(record);
        }
    }
    best.map(|r| r.mv).ok_or(SelectError::NoValidMove)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{OrbKind, OrbSource, Pos};
    use crate::shape::{ShapeKind, ShapeSet};

    fn board(rows: &[&str], kinds: &[ShapeKind], refill: &[OrbKind]) -> Board {
        Board::from_rows(rows, ShapeSet::from_kinds(kinds), OrbSource::cycle(refill)).unwrap()
    }

    fn pair_config() -> PriorityConfig {
        let mut config = PriorityConfig::new();
        config.set(ShapeKind::Pair, 50);
        config
    }

    /// Spec scenario: a 4x4 board whose only same-color adjacency is the
    /// white pair at (0, 0)-(0, 1). Clearing just that pair under
    /// `{2-orb: 50}` with bonus 9 scores 50 + 9*2 = 68.
    #[test]
    fn lone_pair_move_scores_sixty_eight() {
        let b = board(
            &["WWBW", "BGWG", "WBGW", "GWBG"],
            &[ShapeKind::Pair],
            &[OrbKind::Gold, OrbKind::White],
        );
        let mv = Move::new(Pos::new(0, 0), Pos::new(0, 1));
        let moves = find_all_valid_moves(&b);
        assert!(moves.contains(&mv));

        let mut copy = b.clone();
        let trace = resolve::apply(&mut copy, mv).unwrap();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0].kind, ShapeKind::Pair);
        assert_eq!(cascade_score(&trace, &pair_config(), 9), 68);
    }

    /// Spec scenario: only single-orb picks are reachable and the config has
    /// no 1-orb weight. Selection must still return a move, scored purely by
    /// the orb bonus.
    #[test]
    fn unweighted_singleton_still_selected() {
        let b = board(
            &["GBW"],
            &[ShapeKind::Single, ShapeKind::Pair],
            &[OrbKind::White],
        );
        let records = score_moves(&b, &pair_config(), 9).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.score == 9));

        let mv = select_best(&b, &pair_config(), 9).unwrap();
        assert_eq!(mv, Move::new(Pos::new(0, 0), Pos::new(0, 1)));
    }

    #[test]
    fn picks_the_highest_scoring_move() {
        // Swapping inside "GBGW" can make a pair (68) or fall back to a
        // single pick (9); the scripted refill never chains.
        let b = board(
            &["GBGW"],
            &[ShapeKind::Single, ShapeKind::Pair],
            &[OrbKind::White, OrbKind::Gold],
        );
        let records = score_moves(&b, &pair_config(), 9).unwrap();
        let scores: Vec<i64> = records.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![68, 68, 9]);

        // Two candidates tie at 68; the earlier enumerated one wins.
        let mv = select_best(&b, &pair_config(), 9).unwrap();
        assert_eq!(mv, Move::new(Pos::new(0, 0), Pos::new(0, 1)));
    }

    #[test]
    fn stuck_board_is_a_terminal_signal() {
        let b = board(&["GBW"], &[ShapeKind::Pair], &[OrbKind::Gold]);
        assert!(find_all_valid_moves(&b).is_empty());
        assert_eq!(
            select_best(&b, &pair_config(), 9).unwrap_err(),
            SelectError::NoValidMove
        );
    }

    #[test]
    fn malformed_config_fails_fast() {
        let b = board(&["GBW"], &[ShapeKind::Single], &[OrbKind::Gold]);
        let mut config = PriorityConfig::new();
        config.set(ShapeKind::Pair, -7);
        let err = select_best(&b, &config, 9).unwrap_err();
        assert_eq!(
            err,
            SelectError::InvalidConfig(ConfigurationError::NegativeWeight {
                kind: ShapeKind::Pair,
                weight: -7
            })
        );
    }

    #[test]
    fn selection_is_repeatable_and_read_only() {
        let b = Board::with_shapes(5, 5, 31, ShapeSet::default());
        let before = b.render_text();
        let config = pair_config();
        let first = select_best(&b, &config, DEFAULT_ORB_BONUS).unwrap();
        let second = select_best(&b, &config, DEFAULT_ORB_BONUS).unwrap();
        assert_eq!(first, second);
        assert_eq!(b.render_text(), before);
    }
}
