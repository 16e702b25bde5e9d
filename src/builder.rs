//! DAG construction.
//!
//! Builds the covering relation of subset inclusion over a collection of sets:
//! a quadratic comparison pass produces the full comparability digraph, which
//! is then reduced to its transitive reduction.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::adj::UnweightedList;
use petgraph::algo::tred::{dag_to_toposorted_adjacency_list, dag_transitive_reduction_closure};
use petgraph::graph::{DefaultIx, IndexType};
use petgraph::visit::IntoNeighbors;

use crate::error::{PosetError, Result};
use crate::sets::power_set;
use crate::types::{Dag, Element};

/// Build the subset-inclusion DAG of a collection of sets.
///
/// Sets equal by value collapse to one node. An edge `a → b` means `b` is
/// strictly contained in `a` with no other input set in between. Sets
/// comparable to nothing else are kept as isolated nodes.
pub fn subset_dag<T: Element>(sets: &[BTreeSet<T>]) -> Result<Dag<BTreeSet<T>>> {
    let unique: Vec<&BTreeSet<T>> = sets.iter().collect::<BTreeSet<_>>().into_iter().collect();

    let mut comparability = Dag::new();
    comparability.extend_nodes(unique.iter().map(|s| (*s).clone()));

    let mut comparable_pairs = 0usize;
    for (i, a) in unique.iter().enumerate() {
        for b in &unique[i + 1..] {
            if a.is_superset(b) {
                comparability.add_edge((*a).clone(), (*b).clone());
                comparable_pairs += 1;
            } else if b.is_superset(a) {
                comparability.add_edge((*b).clone(), (*a).clone());
                comparable_pairs += 1;
            }
        }
    }

    let reduced = transitive_reduction(&comparability)?;

    tracing::debug!(
        input_sets = sets.len(),
        nodes = reduced.node_count(),
        comparable_pairs,
        covering_edges = reduced.edge_count(),
        "built subset DAG"
    );

    Ok(reduced)
}

/// Subset DAG of the power set of `s` (the boolean lattice on `s`).
pub fn boolean_dag<T: Element>(s: &BTreeSet<T>) -> Result<Dag<BTreeSet<T>>> {
    subset_dag(&power_set(s))
}

/// Transitive reduction of an acyclic graph.
///
/// Keeps every node and removes each edge `u → v` for which another path from
/// `u` to `v` exists.
pub fn transitive_reduction<N: Element>(dag: &Dag<N>) -> Result<Dag<N>> {
    let order = dag.topological_order()?;
    let (toposorted, _): (UnweightedList<DefaultIx>, Vec<DefaultIx>) =
        dag_to_toposorted_adjacency_list(dag.graph(), &order);
    let (reduction, _closure) = dag_transitive_reduction_closure(&toposorted);

    let mut reduced = Dag::new();
    reduced.extend_nodes(dag.graph().node_indices().map(|ix| dag.element(ix).clone()));

    // Position `i` of the reduction is `order[i]` of the input graph.
    for (position, &from) in order.iter().enumerate() {
        for target in reduction.neighbors(DefaultIx::new(position)) {
            let to = order[target.index()];
            reduced.add_edge(dag.element(from).clone(), dag.element(to).clone());
        }
    }

    Ok(reduced)
}

/// Whether the graph is acyclic and equal to its transitive reduction.
pub fn is_transitively_reduced<N: Element>(dag: &Dag<N>) -> Result<bool> {
    Ok(transitive_reduction(dag)?.edge_count() == dag.edge_count())
}

/// Check the poset-as-DAG invariant: acyclic and transitively reduced.
///
/// Queries do not re-validate their input; call this once on DAGs that were
/// not produced by [`subset_dag`].
pub fn validate<N: Element>(dag: &Dag<N>) -> Result<()> {
    let reduced = transitive_reduction(dag)?;
    match dag.edge_count() - reduced.edge_count() {
        0 => Ok(()),
        redundant_edges => Err(PosetError::NotReduced { redundant_edges }),
    }
}

/// Comparability digraph of a family of intervals under the weak interval order.
///
/// Edge `a → b` when `lo(a) ≤ lo(b)` and `hi(a) ≤ hi(b)`. Equal intervals are
/// related both ways, so the result may contain cycles; it is not reduced.
pub fn weak_interval_dag<K, T>(intervals: &BTreeMap<K, (T, T)>) -> Dag<K>
where
    K: Element,
    T: PartialOrd,
{
    let mut dag = Dag::new();
    dag.extend_nodes(intervals.keys().cloned());

    let entries: Vec<(&K, &(T, T))> = intervals.iter().collect();
    for (i, (ka, (lo_a, hi_a))) in entries.iter().enumerate() {
        for (kb, (lo_b, hi_b)) in &entries[i + 1..] {
            if lo_a <= lo_b && hi_a <= hi_b {
                dag.add_edge((*ka).clone(), (*kb).clone());
            }
            if lo_b <= lo_a && hi_b <= hi_a {
                dag.add_edge((*kb).clone(), (*ka).clone());
            }
        }
    }

    dag
}

/// Union of several graphs: every node and every edge of each input.
///
/// The result can be cyclic when the inputs disagree on the order.
pub fn compose<N: Element>(dags: &[Dag<N>]) -> Dag<N> {
    let mut composed = Dag::new();
    for dag in dags {
        composed.extend_nodes(dag.nodes().cloned());
        for (from, to) in dag.edges() {
            composed.add_edge(from, to);
        }
    }
    composed
}
