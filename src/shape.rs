//! Shape templates.
//!
//! Every matchable group kind is defined by a canonical set of relative cell
//! offsets plus a precomputed list of rotation variants (and reflections for
//! the chiral L tetromino). The table is built once on first use and shared
//! for the lifetime of the process.
//!
//! Kinds are declared in matcher-priority order: larger orb counts first,
//! and within the same orb count larger boxes before bent shapes. The
//! matcher consumes the table in this order, which makes overlap
//! disambiguation deterministic.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// A matchable group kind.
///
/// Orientation is not part of the kind: a vertical and a horizontal pair are
/// both `Pair`, and all eight orientations of the L tetromino are `FourL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    #[serde(rename = "6-orb-rect")]
    Rect,
    #[serde(rename = "4-orb-square")]
    Square,
    #[serde(rename = "4-orb-I")]
    FourI,
    #[serde(rename = "4-orb-L")]
    FourL,
    #[serde(rename = "3-orb-I")]
    TripleI,
    #[serde(rename = "3-orb-L")]
    TripleL,
    #[serde(rename = "2-orb")]
    Pair,
    #[serde(rename = "1-orb")]
    Single,
}

/// All shape kinds, in matcher-priority order (largest first).
pub const ALL_SHAPE_KINDS: [ShapeKind; 8] = [
    ShapeKind::Rect,
    ShapeKind::Square,
    ShapeKind::FourI,
    ShapeKind::FourL,
    ShapeKind::TripleI,
    ShapeKind::TripleL,
    ShapeKind::Pair,
    ShapeKind::Single,
];

impl ShapeKind {
    /// Returns the kind's name, as used in priority-config keys.
    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::Rect => "6-orb-rect",
            ShapeKind::Square => "4-orb-square",
            ShapeKind::FourI => "4-orb-I",
            ShapeKind::FourL => "4-orb-L",
            ShapeKind::TripleI => "3-orb-I",
            ShapeKind::TripleL => "3-orb-L",
            ShapeKind::Pair => "2-orb",
            ShapeKind::Single => "1-orb",
        }
    }

    /// Parses a kind from its name.
    pub fn from_name(s: &str) -> Option<ShapeKind> {
        ALL_SHAPE_KINDS.iter().copied().find(|k| k.name() == s)
    }

    /// Number of orbs this kind covers.
    pub const fn orb_count(self) -> usize {
        match self {
            ShapeKind::Rect => 6,
            ShapeKind::Square | ShapeKind::FourI | ShapeKind::FourL => 4,
            ShapeKind::TripleI | ShapeKind::TripleL => 3,
            ShapeKind::Pair => 2,
            ShapeKind::Single => 1,
        }
    }

    /// Canonical offset set, anchored at the top-left of its bounding box.
    fn canonical_offsets(self) -> &'static [(i32, i32)] {
        match self {
            ShapeKind::Rect => &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)],
            ShapeKind::Square => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            ShapeKind::FourI => &[(0, 0), (0, 1), (0, 2), (0, 3)],
            ShapeKind::FourL => &[(0, 0), (1, 0), (1, 1), (1, 2)],
            ShapeKind::TripleI => &[(0, 0), (0, 1), (0, 2)],
            ShapeKind::TripleL => &[(0, 0), (0, 1), (1, 0)],
            ShapeKind::Pair => &[(0, 0), (0, 1)],
            ShapeKind::Single => &[(0, 0)],
        }
    }

    /// Whether the kind's mirror image is not among its rotations.
    const fn is_chiral(self) -> bool {
        matches!(self, ShapeKind::FourL)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A shape kind together with its precomputed orientation variants.
///
/// Each variant is a sorted list of non-negative `(row, col)` offsets with at
/// least one cell in row 0 and at least one cell in column 0, so scanning
/// every board position as an anchor covers every placement.
#[derive(Debug, Clone)]
pub struct ShapeTemplate {
    pub kind: ShapeKind,
    pub variants: Vec<Vec<(usize, usize)>>,
}

/// Returns the full template table, in matcher-priority order.
pub fn templates() -> &'static [ShapeTemplate] {
    static TEMPLATES: OnceLock<Vec<ShapeTemplate>> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        ALL_SHAPE_KINDS
            .iter()
            .map(|&kind| ShapeTemplate {
                kind,
                variants: build_variants(kind),
            })
            .collect()
    })
}

/// Normalizes an offset set so its minimum row and column are both zero,
/// returning the cells sorted row-major.
fn normalize(cells: &[(i32, i32)]) -> Vec<(usize, usize)> {
    let min_r = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
    let min_c = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);
    let mut out: Vec<(usize, usize)> = cells
        .iter()
        .map(|&(r, c)| ((r - min_r) as usize, (c - min_c) as usize))
        .collect();
    out.sort_unstable();
    out
}

/// Generates the unique orientations of a kind: the four quarter-turn
/// rotations of the canonical offsets, plus the rotations of the mirror
/// image for chiral kinds. Duplicates collapse, so symmetric kinds end up
/// with fewer variants (a square has one, a line has two).
fn build_variants(kind: ShapeKind) -> Vec<Vec<(usize, usize)>> {
    let mut variants: Vec<Vec<(usize, usize)>> = Vec::new();
    let mut bases: Vec<Vec<(i32, i32)>> = vec![kind.canonical_offsets().to_vec()];
    if kind.is_chiral() {
        let mirrored = kind
            .canonical_offsets()
            .iter()
            .map(|&(r, c)| (r, -c))
            .collect();
        bases.push(mirrored);
    }

    for base in bases {
        let mut cells = base;
        for _ in 0..4 {
            let normalized = normalize(&cells);
            if !variants.contains(&normalized) {
                variants.push(normalized);
            }
            // Quarter turn clockwise: (r, c) -> (c, -r).
            cells = cells.iter().map(|&(r, c)| (c, -r)).collect();
        }
    }

    variants
}

/// The set of shape kinds active in a session (the skills the player has
/// equipped). Only active kinds participate in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeSet(u8);

impl ShapeSet {
    /// An empty set.
    pub const fn empty() -> ShapeSet {
        ShapeSet(0)
    }

    /// Builds a set from a list of kinds.
    pub fn from_kinds(kinds: &[ShapeKind]) -> ShapeSet {
        let mut set = ShapeSet::empty();
        for &kind in kinds {
            set.insert(kind);
        }
        set
    }

    /// A set containing every kind in the table.
    pub fn all() -> ShapeSet {
        ShapeSet::from_kinds(&ALL_SHAPE_KINDS)
    }

    fn bit(kind: ShapeKind) -> u8 {
        let idx = ALL_SHAPE_KINDS
            .iter()
            .position(|&k| k == kind)
            .expect("kind present in ALL_SHAPE_KINDS");
        1 << idx
    }

    /// Adds a kind to the set.
    pub fn insert(&mut self, kind: ShapeKind) {
        self.0 |= Self::bit(kind);
    }

    /// Whether the set contains a kind.
    pub fn contains(self, kind: ShapeKind) -> bool {
        self.0 & Self::bit(kind) != 0
    }
}

impl Default for ShapeSet {
    /// The default skill loadout: single pick, pair, square, and both
    /// four-orb tetromino kinds.
    fn default() -> ShapeSet {
        ShapeSet::from_kinds(&[
            ShapeKind::Single,
            ShapeKind::Pair,
            ShapeKind::Square,
            ShapeKind::FourL,
            ShapeKind::FourI,
        ])
    }
}
