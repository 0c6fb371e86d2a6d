//! Orb colors.
//!
//! An orb is a single colored tile occupying one board cell. Orbs are
//! immutable once placed; refill replaces cleared cells with new orbs.

use serde::{Deserialize, Serialize};

/// The color of an orb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbKind {
    Gold,
    Black,
    White,
}

/// All orb colors, in refill-generator order.
pub const ALL_ORB_KINDS: [OrbKind; 3] = [OrbKind::Gold, OrbKind::Black, OrbKind::White];

impl OrbKind {
    /// Returns the single-character symbol used in text rendering.
    pub const fn symbol(self) -> char {
        match self {
            OrbKind::Gold => 'G',
            OrbKind::Black => 'B',
            OrbKind::White => 'W',
        }
    }

    /// Parses an orb color from its text symbol.
    pub fn from_symbol(c: char) -> Option<OrbKind> {
        match c {
            'G' => Some(OrbKind::Gold),
            'B' => Some(OrbKind::Black),
            'W' => Some(OrbKind::White),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_roundtrip() {
        for kind in ALL_ORB_KINDS {
            assert_eq!(OrbKind::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(OrbKind::from_symbol('x'), None);
        assert_eq!(OrbKind::from_symbol('.'), None);
    }
}
