//! Shape matching.
//!
//! Scans a board for groups of same-colored orbs matching the active shape
//! templates and selects a maximal non-overlapping batch of them.
//!
//! Disambiguation is greedy in a fixed order, so the result is deterministic:
//! kinds are tried largest orb count first (the declaration order of
//! [`crate::shape::ALL_SHAPE_KINDS`] within equal counts), anchors row-major,
//! orientation variants in declaration order. A candidate that overlaps an
//! already-taken cell is skipped, so a 4-in-line is reported once rather
//! than as its embedded pairs.
//!
//! The single-orb kind is a deliberate pick, not a self-sustaining pattern:
//! it is only reported through [`find_matches_with_focus`], only when the
//! scan found no multi-orb match anywhere, and only at the first focus cell.
//! [`find_matches`] never reports it, which is what gives every cascade a
//! fixed point.

use crate::board::{Board, Pos};
use crate::shape::{templates, ShapeKind};

/// A group of cells cleared together in one resolution pass, tagged with the
/// shape kind that matched. Cells are sorted row-major and never overlap
/// another result from the same batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub kind: ShapeKind,
    pub cells: Vec<Pos>,
}

/// Finds all currently-matched groups on the board.
///
/// Only multi-orb kinds from the board's active shape set participate; see
/// the module docs for the single-orb rule.
pub fn find_matches(board: &Board) -> Vec<MatchResult> {
    scan(board, &[])
}

/// Finds all matched groups right after a swap of the `focus` cells.
///
/// Identical to [`find_matches`] except that when no multi-orb group matches
/// anywhere and the single-orb kind is active, the swap degenerates to a
/// deliberate pick of its primary (first focus) cell.
pub fn find_matches_with_focus(board: &Board, focus: &[Pos]) -> Vec<MatchResult> {
    scan(board, focus)
}

fn scan(board: &Board, focus: &[Pos]) -> Vec<MatchResult> {
    let mut used = vec![false; board.rows() * board.cols()];
    let mut results = Vec::new();

    for template in templates() {
        if template.kind == ShapeKind::Single || !board.shapes().contains(template.kind) {
            continue;
        }
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                for variant in &template.variants {
                    if let Some(cells) = match_at(board, &used, Pos::new(row, col), variant) {
                        for &pos in &cells {
                            used[pos.row * board.cols() + pos.col] = true;
                        }
                        results.push(MatchResult {
                            kind: template.kind,
                            cells,
                        });
                    }
                }
            }
        }
    }

    if results.is_empty() && board.shapes().contains(ShapeKind::Single) {
        if let Some(&pos) = focus.iter().find(|&&p| board.get(p).is_some()) {
            results.push(MatchResult {
                kind: ShapeKind::Single,
                cells: vec![pos],
            });
        }
    }

    results
}

/// Tries one template variant at one anchor. Matches iff every offset cell is
/// in bounds, occupied, unclaimed, and shares the anchor cell's color.
fn match_at(
    board: &Board,
    used: &[bool],
    anchor: Pos,
    variant: &[(usize, usize)],
) -> Option<Vec<Pos>> {
    let mut cells = Vec::with_capacity(variant.len());
    let mut color = None;
    for &(dr, dc) in variant {
        let pos = Pos::new(anchor.row + dr, anchor.col + dc);
        if !board.in_bounds(pos) || used[pos.row * board.cols() + pos.col] {
            return None;
        }
        let kind = board.get(pos)?;
        match color {
            None => color = Some(kind),
            Some(c) if c != kind => return None,
            Some(_) => {}
        }
        cells.push(pos);
    }
    Some(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{OrbKind, OrbSource};
    use crate::shape::ShapeSet;

    fn board(rows: &[&str], kinds: &[ShapeKind]) -> Board {
        Board::from_rows(
            rows,
            ShapeSet::from_kinds(kinds),
            OrbSource::cycle(&[OrbKind::Gold]),
        )
        .unwrap()
    }

    #[test]
    fn finds_horizontal_pair() {
        let b = board(&["GGB", "BWW"], &[ShapeKind::Pair]);
        let matches = find_matches(&b);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].kind, ShapeKind::Pair);
        assert_eq!(matches[0].cells, vec![Pos::new(0, 0), Pos::new(0, 1)]);
        assert_eq!(matches[1].cells, vec![Pos::new(1, 1), Pos::new(1, 2)]);
    }

    #[test]
    fn finds_vertical_pair() {
        let b = board(&["G", "G"], &[ShapeKind::Pair]);
        let matches = find_matches(&b);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].cells, vec![Pos::new(0, 0), Pos::new(1, 0)]);
    }

    #[test]
    fn larger_kind_absorbs_embedded_pairs() {
        let b = board(&["GGGG"], &[ShapeKind::Pair, ShapeKind::FourI]);
        let matches = find_matches(&b);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, ShapeKind::FourI);
        assert_eq!(matches[0].cells.len(), 4);
    }

    #[test]
    fn overlapping_pairs_resolve_to_the_earliest_anchor() {
        let b = board(&["GGG"], &[ShapeKind::Pair]);
        let matches = find_matches(&b);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].cells, vec![Pos::new(0, 0), Pos::new(0, 1)]);
    }

    #[test]
    fn rect_takes_priority_over_square() {
        let b = board(
            &["GGG", "GGG"],
            &[ShapeKind::Rect, ShapeKind::Square, ShapeKind::Pair],
        );
        let matches = find_matches(&b);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, ShapeKind::Rect);
        assert_eq!(matches[0].cells.len(), 6);
    }

    #[test]
    fn four_i_takes_priority_over_four_l() {
        let b = board(&["GGGG", "GBWB"], &[ShapeKind::FourI, ShapeKind::FourL]);
        let matches = find_matches(&b);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, ShapeKind::FourI);
    }

    #[test]
    fn bent_l_matches_when_the_line_cannot() {
        let b = board(&["GGGG", "GBWB"], &[ShapeKind::FourL]);
        let matches = find_matches(&b);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, ShapeKind::FourL);
        assert_eq!(
            matches[0].cells,
            vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2), Pos::new(1, 0)]
        );
    }

    #[test]
    fn inactive_kinds_are_ignored() {
        let b = board(&["GG"], &[ShapeKind::FourI]);
        assert!(find_matches(&b).is_empty());
        let b = board(&["GG"], &[]);
        assert!(find_matches(&b).is_empty());
    }

    #[test]
    fn results_never_overlap() {
        let b = board(
            &["GGGG", "GGGG"],
            &[ShapeKind::Square, ShapeKind::Pair],
        );
        let matches = find_matches(&b);
        let mut seen = std::collections::HashSet::new();
        for m in &matches {
            for &pos in &m.cells {
                assert!(seen.insert(pos), "cell {} reported twice", pos);
            }
        }
    }

    #[test]
    fn singleton_needs_focus() {
        let b = board(&["GB", "WG"], &[ShapeKind::Single, ShapeKind::Pair]);
        assert!(find_matches(&b).is_empty());

        let matches = find_matches_with_focus(&b, &[Pos::new(0, 0), Pos::new(0, 1)]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, ShapeKind::Single);
        assert_eq!(matches[0].cells, vec![Pos::new(0, 0)]);
    }

    #[test]
    fn singleton_yields_to_any_multi_orb_match() {
        let b = board(&["GGB", "BWW"], &[ShapeKind::Single, ShapeKind::Pair]);
        let matches = find_matches_with_focus(&b, &[Pos::new(1, 0)]);
        assert!(matches.iter().all(|m| m.kind == ShapeKind::Pair));
    }

    #[test]
    fn empty_cells_never_match() {
        let b = board(&["G.G", "G.G"], &[ShapeKind::Pair, ShapeKind::Square]);
        let matches = find_matches(&b);
        // Only the two vertical pairs; nothing spans the empty column.
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.kind == ShapeKind::Pair));
    }
}
