//! Soulboard engine library.
//!
//! Exposes the board representation, shape templates, matcher, cascade
//! resolver, move enumeration, and selection modules for use by integration
//! tests and the experiment driver binary.

pub mod board;
pub mod matcher;
pub mod movegen;
pub mod resolve;
pub mod search;
pub mod shape;
