//! Valuations over set-valued DAGs.
//!
//! A weight function on items induces a value on every non-empty set node
//! (the mean item weight). The radius of the DAG is the largest value gap
//! between a node and any node strictly below it.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::Result;
use crate::order::{descendant_indices, interval};
use crate::types::{Dag, Element};

/// A pair of nodes attaining the radius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadiusWitness<T> {
    /// Absolute value gap between the two nodes.
    pub norm: f64,
    /// The node above.
    pub upper: BTreeSet<T>,
    /// Value of the node above.
    pub upper_value: f64,
    /// The node below.
    pub lower: BTreeSet<T>,
    /// Value of the node below.
    pub lower_value: f64,
    /// Every node between the two, both included, in canonical order.
    pub interval: Vec<BTreeSet<T>>,
}

/// Mean item weight of a set, or `None` for the empty set.
pub fn assignment<T, F>(node: &BTreeSet<T>, weight: F) -> Option<f64>
where
    F: Fn(&T) -> f64,
{
    if node.is_empty() {
        return None;
    }
    Some(node.iter().map(weight).sum::<f64>() / node.len() as f64)
}

/// All comparable node pairs with the largest value gap.
///
/// Pairs involving the empty set are skipped. Ties are all returned, ordered
/// by upper node then lower node.
pub fn radius<T, F>(dag: &Dag<BTreeSet<T>>, weight: F) -> Result<Vec<RadiusWitness<T>>>
where
    T: Element,
    F: Fn(&T) -> f64,
{
    let mut max_norm = 0.0f64;
    let mut witnesses: Vec<RadiusWitness<T>> = Vec::new();

    for upper in dag.nodes() {
        let Some(upper_value) = assignment(upper, &weight) else {
            continue;
        };
        let start = dag.index_of(upper)?;

        let below: BTreeSet<&BTreeSet<T>> = descendant_indices(dag, start)
            .into_iter()
            .filter(|&ix| ix != start)
            .map(|ix| dag.element(ix))
            .collect();

        for lower in below {
            let Some(lower_value) = assignment(lower, &weight) else {
                continue;
            };
            let norm = (upper_value - lower_value).abs();
            if norm < max_norm {
                continue;
            }
            if norm > max_norm {
                max_norm = norm;
                witnesses.clear();
            }
            witnesses.push(RadiusWitness {
                norm,
                upper: upper.clone(),
                upper_value,
                lower: lower.clone(),
                lower_value,
                interval: interval(dag, lower, upper)?.into_iter().collect(),
            });
        }
    }

    tracing::debug!(radius = max_norm, witnesses = witnesses.len(), "computed valuation radius");
    Ok(witnesses)
}
