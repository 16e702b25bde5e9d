//! The poset-as-DAG value type.
//!
//! An edge `u → v` means `u` covers `v`: following edges descends the order.
//! Predecessors are structurally above a node, successors below it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::error::{PosetError, Result};

/// Bound for anything usable as a poset element.
///
/// Elements are compared by value: two equal elements are always the same node.
pub trait Element: Clone + Ord + Debug {}

impl<T: Clone + Ord + Debug> Element for T {}

/// A directed graph of elements, read as a partial order.
///
/// Backed by a `petgraph` digraph plus a value index, so inserting an element
/// that is already present returns the existing node and parallel edges are
/// never created.
///
/// `Dag` does not re-check acyclicity or reducedness on every mutation; use
/// [`crate::builder::validate`] when the input is not built by this crate.
#[derive(Debug, Clone)]
pub struct Dag<N> {
    graph: DiGraph<N, ()>,
    index: BTreeMap<N, NodeIndex>,
}

impl<N> Default for Dag<N> {
    fn default() -> Self {
        Self {
            graph: DiGraph::new(),
            index: BTreeMap::new(),
        }
    }
}

impl<N: Element> Dag<N> {
    /// Create a new empty DAG.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a DAG from an edge list. Endpoints are added as nodes.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut dag = Self::new();
        for (from, to) in edges {
            dag.add_edge(from, to);
        }
        dag
    }

    /// Wrap an existing petgraph digraph.
    ///
    /// Duplicate node weights collapse onto the first occurrence.
    pub fn from_graph(graph: DiGraph<N, ()>) -> Self {
        let mut dag = Self::new();
        for ix in graph.node_indices() {
            dag.add_node(graph[ix].clone());
        }
        for edge in graph.edge_references() {
            dag.add_edge(graph[edge.source()].clone(), graph[edge.target()].clone());
        }
        dag
    }

    /// Add a node, returning its index. Existing nodes are returned unchanged.
    pub fn add_node(&mut self, node: N) -> NodeIndex {
        if let Some(&ix) = self.index.get(&node) {
            return ix;
        }
        let ix = self.graph.add_node(node.clone());
        self.index.insert(node, ix);
        ix
    }

    /// Add nodes from an iterator.
    pub fn extend_nodes<I: IntoIterator<Item = N>>(&mut self, nodes: I) {
        for node in nodes {
            self.add_node(node);
        }
    }

    /// Add an edge `from → to` (`from` covers `to`), adding missing endpoints.
    pub fn add_edge(&mut self, from: N, to: N) {
        let a = self.add_node(from);
        let b = self.add_node(to);
        self.graph.update_edge(a, b, ());
    }

    /// Whether the element is a node of the DAG.
    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the DAG has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// All nodes in element order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.index.keys()
    }

    /// All edges as `(from, to)` pairs, sorted.
    pub fn edges(&self) -> Vec<(N, N)> {
        let mut edges: Vec<(N, N)> = self
            .graph
            .edge_references()
            .map(|e| (self.graph[e.source()].clone(), self.graph[e.target()].clone()))
            .collect();
        edges.sort();
        edges
    }

    /// Underlying petgraph digraph.
    pub fn graph(&self) -> &DiGraph<N, ()> {
        &self.graph
    }

    /// Graph index of an element.
    pub fn index_of(&self, node: &N) -> Result<NodeIndex> {
        self.index
            .get(node)
            .copied()
            .ok_or_else(|| PosetError::not_found(node))
    }

    /// Element stored at a graph index.
    pub fn element(&self, ix: NodeIndex) -> &N {
        &self.graph[ix]
    }

    /// Resolve graph indices to an ordered set of elements.
    pub fn elements<I>(&self, indices: I) -> BTreeSet<N>
    where
        I: IntoIterator<Item = NodeIndex>,
    {
        indices.into_iter().map(|ix| self.graph[ix].clone()).collect()
    }

    /// Direct predecessors (nodes covering `node`).
    pub fn predecessors(&self, node: &N) -> Result<BTreeSet<N>> {
        let ix = self.index_of(node)?;
        Ok(self.elements(self.graph.neighbors_directed(ix, Direction::Incoming)))
    }

    /// Direct successors (nodes covered by `node`).
    pub fn successors(&self, node: &N) -> Result<BTreeSet<N>> {
        let ix = self.index_of(node)?;
        Ok(self.elements(self.graph.neighbors_directed(ix, Direction::Outgoing)))
    }

    /// Subgraph on the given nodes, keeping every edge between two of them.
    ///
    /// Elements not in the DAG are ignored.
    pub fn induced_subgraph(&self, nodes: &BTreeSet<N>) -> Self {
        let graph = self.graph.filter_map(
            |_, n| nodes.contains(n).then(|| n.clone()),
            |_, e| Some(*e),
        );
        Self::from_graph(graph)
    }

    /// Whether the graph has no directed cycle.
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }

    /// Topological order of the node indices.
    pub fn topological_order(&self) -> Result<Vec<NodeIndex>> {
        toposort(&self.graph, None)
            .map_err(|cycle| PosetError::Cycle(format!("{:?}", self.graph[cycle.node_id()])))
    }

    /// Relabel nodes as `0..n` in element order, keeping the edges.
    pub fn to_integer_labels(&self) -> Dag<usize> {
        let mut labels = vec![0usize; self.graph.node_count()];
        for (label, ix) in self.index.values().enumerate() {
            labels[ix.index()] = label;
        }

        let mut dag = Dag::new();
        dag.extend_nodes(0..labels.len());
        for edge in self.graph.edge_references() {
            dag.add_edge(labels[edge.source().index()], labels[edge.target().index()]);
        }
        dag
    }

    /// Canonical export: sorted nodes and sorted edges.
    pub fn export(&self) -> DagExport<N> {
        DagExport {
            nodes: self.index.keys().cloned().collect(),
            edges: self.edges(),
        }
    }

    /// Rebuild a DAG from an export, rejecting cyclic input.
    ///
    /// This is the entry point for orders that are not derived from subset
    /// inclusion.
    pub fn from_export(export: DagExport<N>) -> Result<Self> {
        let mut dag = Self::new();
        dag.extend_nodes(export.nodes);
        for (from, to) in export.edges {
            dag.add_edge(from, to);
        }
        dag.topological_order()?;
        Ok(dag)
    }

    /// Content fingerprint of the DAG (xxh64 of the canonical export).
    ///
    /// Equal orders built in any insertion order share a fingerprint.
    pub fn fingerprint(&self) -> Result<String>
    where
        N: Serialize,
    {
        canonical_hash_hex(&self.export())
    }
}

/// Serializable snapshot of a DAG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DagExport<N> {
    /// Nodes in element order.
    pub nodes: Vec<N>,
    /// Edges `(from, to)` in sorted order.
    pub edges: Vec<(N, N)>,
}
