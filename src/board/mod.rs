//! Board representation.
//!
//! Contains the orb colors, grid positions, the refill generator, and the
//! board state itself.

pub mod orb;
pub mod state;

pub use orb::{OrbKind, ALL_ORB_KINDS};
pub use state::{Board, OrbSource, ParseBoardError, Pos};
