//! Compatibility of several orders on overlapping elements.
//!
//! The orders are composed into one graph. Where they disagree the union has
//! cycles, which the condensation collapses, so the ratio of condensed to
//! union vertices (and edges) measures how far the orders agree.

use serde::{Deserialize, Serialize};

use crate::builder::compose;
use crate::condensation::Condensation;
use crate::error::{PosetError, Result};
use crate::types::{Dag, Element};

/// Size statistics of an order-compatibility comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    /// Vertex count of each input order.
    pub orders: Vec<usize>,
    /// Edge count of each input order.
    pub sizes: Vec<usize>,
    /// Sum of the vertex counts.
    pub vertex_sum: usize,
    /// Sum of the edge counts.
    pub edge_sum: usize,
    /// Vertices in the composed graph.
    pub union_vertices: usize,
    /// Edges in the composed graph.
    pub union_edges: usize,
    /// Components in the condensation of the composed graph.
    pub condensation_vertices: usize,
    /// Edges in the condensation of the composed graph.
    pub condensation_edges: usize,
}

impl CompatibilityReport {
    /// Condensed vertices over union vertices; 1.0 when no cycle was formed.
    pub fn vertex_compatibility(&self) -> Result<f64> {
        ratio(self.condensation_vertices, self.union_vertices, "vertex_compatibility")
    }

    /// Condensed edges over union edges.
    pub fn edge_compatibility(&self) -> Result<f64> {
        ratio(self.condensation_edges, self.union_edges, "edge_compatibility")
    }

    /// Whether the orders never contradict each other.
    pub fn is_fully_compatible(&self) -> bool {
        self.condensation_vertices == self.union_vertices
            && self.condensation_edges == self.union_edges
    }
}

fn ratio(numerator: usize, denominator: usize, measure: &'static str) -> Result<f64> {
    if denominator == 0 {
        return Err(PosetError::ZeroDenominator { measure });
    }
    Ok(numerator as f64 / denominator as f64)
}

/// Outcome of [`order_compatibility`].
#[derive(Debug, Clone)]
pub struct OrderCompatibility<N> {
    /// Size statistics.
    pub report: CompatibilityReport,
    /// Condensation of the composed graph.
    pub condensation: Condensation<N>,
}

/// Compose the orders and condense the result.
pub fn order_compatibility<N: Element>(dags: &[Dag<N>]) -> Result<OrderCompatibility<N>> {
    let composed = compose(dags);
    let condensation = Condensation::build(&composed)?;

    let orders: Vec<usize> = dags.iter().map(Dag::node_count).collect();
    let sizes: Vec<usize> = dags.iter().map(Dag::edge_count).collect();

    let report = CompatibilityReport {
        vertex_sum: orders.iter().sum(),
        edge_sum: sizes.iter().sum(),
        orders,
        sizes,
        union_vertices: composed.node_count(),
        union_edges: composed.edge_count(),
        condensation_vertices: condensation.component_count(),
        condensation_edges: condensation.components().edge_count(),
    };

    tracing::debug!(
        inputs = dags.len(),
        union_vertices = report.union_vertices,
        condensation_vertices = report.condensation_vertices,
        "computed order compatibility"
    );

    Ok(OrderCompatibility {
        report,
        condensation,
    })
}
