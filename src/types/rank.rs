//! Rank types produced by the condensation engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a strongly-connected component in a condensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Create a component id from its position in the condensation.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the component in the condensation.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Top and bottom rank of a node.
///
/// `top` counts levels from the roots down to the node's component; `bottom`
/// is the condensation height minus the levels from the component down to the
/// leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    /// Longest chain from any root down to the node, in levels.
    pub top: usize,
    /// Height minus the longest chain from the node down to any leaf.
    pub bottom: usize,
}

impl Rank {
    /// Create a new rank pair.
    pub fn new(top: usize, bottom: usize) -> Self {
        Self { top, bottom }
    }
}

/// Rank divided by the condensation height.
///
/// Computed as `((top - 1) / h, (bottom + 1) / h)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRank {
    /// Normalized top rank.
    pub top: f64,
    /// Normalized bottom rank.
    pub bottom: f64,
}

impl NormalizedRank {
    /// Create a new normalized rank pair.
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }
}
