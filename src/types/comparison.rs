//! Pairwise comparability of poset elements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of comparing two nodes of a DAG.
///
/// Exactly one variant holds for any pair of nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparability {
    /// Both arguments are the same node.
    Equal,
    /// The second node is reachable from the first (it lies below the first).
    Above,
    /// The first node is reachable from the second (it lies below the second).
    Below,
    /// Neither node is reachable from the other.
    Incomparable,
}

impl Comparability {
    /// Whether the two nodes are related by the order (including equality).
    pub fn is_comparable(&self) -> bool {
        !matches!(self, Self::Incomparable)
    }

    /// The same relation seen from the other argument.
    pub fn flip(&self) -> Self {
        match self {
            Self::Above => Self::Below,
            Self::Below => Self::Above,
            other => *other,
        }
    }
}

impl fmt::Display for Comparability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "equal"),
            Self::Above => write!(f, "above"),
            Self::Below => write!(f, "below"),
            Self::Incomparable => write!(f, "incomparable"),
        }
    }
}
