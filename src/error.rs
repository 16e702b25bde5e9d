//! Error type for poset operations.

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PosetError>;

/// Error type for poset operations.
///
/// Each variant is a condition under which a query has no defined result.
/// A failed query never modifies the DAG or condensation it was run against.
#[derive(Debug, thiserror::Error)]
pub enum PosetError {
    /// Node is not part of the DAG.
    #[error("Node not found: {0}")]
    NodeNotFound(String),
    /// The two nodes have no common upper bound.
    #[error("Join is empty: nodes have no common upper bound")]
    EmptyJoin,
    /// Overlap ratio of two empty sets.
    #[error("Union of both sets is empty")]
    EmptyUnion,
    /// A measure would divide by zero.
    #[error("Zero denominator in {measure}")]
    ZeroDenominator {
        /// Name of the measure that was requested.
        measure: &'static str,
    },
    /// The graph contains a cycle where an acyclic graph is required.
    #[error("Graph contains a cycle through {0}")]
    Cycle(String),
    /// The graph has edges implied by other paths.
    #[error("Graph is not transitively reduced: {redundant_edges} redundant edge(s)")]
    NotReduced {
        /// Number of edges the transitive reduction removes.
        redundant_edges: usize,
    },
    /// Statistic requested over an empty input.
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),
    /// Canonical encoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PosetError {
    /// Create a not-found error for any debuggable node.
    pub fn not_found<N: std::fmt::Debug>(node: &N) -> Self {
        Self::NodeNotFound(format!("{node:?}"))
    }
}
