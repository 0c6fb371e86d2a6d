//! Scoring policy.
//!
//! A move's value is the sum, over every group cleared during its full
//! cascade, of the configured weight for the group's shape kind plus a flat
//! per-orb exploration bonus. The bonus keeps every productive move strictly
//! positive even when the config carries no weight for any reachable kind,
//! so the selector never stalls while legal moves remain.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matcher::MatchResult;
use crate::shape::ShapeKind;

/// Default per-orb exploration bonus, from the reference experiments.
pub const DEFAULT_ORB_BONUS: i64 = 9;

/// Errors raised by priority-config validation. Validation is fail-fast:
/// a malformed config is rejected before any simulation runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("negative weight {weight} for shape kind {kind}")]
    NegativeWeight { kind: ShapeKind, weight: i64 },
}

/// Caller-supplied mapping from shape kind to score weight.
///
/// The map need not cover every kind; missing kinds weigh 0. Deserializes
/// from a plain JSON object keyed by kind name, e.g.
/// `{"2-orb": 50, "4-orb-square": 100}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityConfig {
    weights: HashMap<ShapeKind, i64>,
}

impl PriorityConfig {
    pub fn new() -> PriorityConfig {
        PriorityConfig::default()
    }

    /// Sets the weight for a kind, replacing any previous value.
    pub fn set(&mut self, kind: ShapeKind, weight: i64) {
        self.weights.insert(kind, weight);
    }

    /// The weight for a kind; unconfigured kinds weigh 0.
    pub fn weight(&self, kind: ShapeKind) -> i64 {
        self.weights.get(&kind).copied().unwrap_or(0)
    }

    /// Rejects malformed configs (negative weights).
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (&kind, &weight) in &self.weights {
            if weight < 0 {
                return Err(ConfigurationError::NegativeWeight { kind, weight });
            }
        }
        Ok(())
    }
}

/// Scores a full cascade trace: configured weight per cleared group plus
/// `orb_bonus` per cleared orb, across every pass.
pub fn cascade_score(trace: &[MatchResult], config: &PriorityConfig, orb_bonus: i64) -> i64 {
    trace
        .iter()
        .map(|m| config.weight(m.kind) + orb_bonus * m.cells.len() as i64)
        .sum()
}
