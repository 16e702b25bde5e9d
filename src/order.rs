//! Order queries over a poset-as-DAG.
//!
//! Every query is a pure function of the DAG and its node arguments. Edges
//! point downwards: predecessors are above a node, successors below it.
//!
//! Queries that can return several nodes (siblings, join, meet, atoms,
//! coatoms) return the full frontier; callers must not assume a single result.

use std::collections::BTreeSet;

use petgraph::algo::{all_simple_paths, has_path_connecting};
use petgraph::graph::NodeIndex;
use petgraph::visit::{Dfs, Reversed};
use petgraph::Direction;

use crate::error::Result;
use crate::types::{Comparability, Dag, Element};

/// Indices reachable from `start` by following edges, `start` included.
pub(crate) fn descendant_indices<N: Element>(dag: &Dag<N>, start: NodeIndex) -> BTreeSet<NodeIndex> {
    let graph = dag.graph();
    let mut dfs = Dfs::new(graph, start);
    let mut reached = BTreeSet::new();
    while let Some(ix) = dfs.next(graph) {
        reached.insert(ix);
    }
    reached
}

/// Indices that reach `start` by following edges, `start` included.
pub(crate) fn ancestor_indices<N: Element>(dag: &Dag<N>, start: NodeIndex) -> BTreeSet<NodeIndex> {
    let reversed = Reversed(dag.graph());
    let mut dfs = Dfs::new(reversed, start);
    let mut reached = BTreeSet::new();
    while let Some(ix) = dfs.next(reversed) {
        reached.insert(ix);
    }
    reached
}

/// Children of the parents of `n`, without `n`.
pub fn upper_siblings<N: Element>(dag: &Dag<N>, n: &N) -> Result<BTreeSet<N>> {
    let mut siblings = BTreeSet::new();
    for parent in dag.predecessors(n)? {
        siblings.extend(dag.successors(&parent)?);
    }
    siblings.remove(n);
    Ok(siblings)
}

/// Parents of the children of `n`, without `n`.
pub fn lower_siblings<N: Element>(dag: &Dag<N>, n: &N) -> Result<BTreeSet<N>> {
    let mut siblings = BTreeSet::new();
    for child in dag.successors(n)? {
        siblings.extend(dag.predecessors(&child)?);
    }
    siblings.remove(n);
    Ok(siblings)
}

/// Upper and lower siblings of `n`.
pub fn siblings<N: Element>(dag: &Dag<N>, n: &N) -> Result<BTreeSet<N>> {
    let mut all = upper_siblings(dag, n)?;
    all.extend(lower_siblings(dag, n)?);
    Ok(all)
}

/// Parents, children and siblings of `n`.
pub fn family<N: Element>(dag: &Dag<N>, n: &N) -> Result<BTreeSet<N>> {
    let mut all = dag.predecessors(n)?;
    all.extend(dag.successors(n)?);
    all.extend(siblings(dag, n)?);
    Ok(all)
}

/// Every ancestor of `n`, plus `n` itself.
pub fn upset<N: Element>(dag: &Dag<N>, n: &N) -> Result<BTreeSet<N>> {
    let ix = dag.index_of(n)?;
    Ok(dag.elements(ancestor_indices(dag, ix)))
}

/// Every descendant of `n`, plus `n` itself.
pub fn downset<N: Element>(dag: &Dag<N>, n: &N) -> Result<BTreeSet<N>> {
    let ix = dag.index_of(n)?;
    Ok(dag.elements(descendant_indices(dag, ix)))
}

/// Upset and downset of `n` together.
pub fn hourglass<N: Element>(dag: &Dag<N>, n: &N) -> Result<BTreeSet<N>> {
    let mut all = upset(dag, n)?;
    all.extend(downset(dag, n)?);
    Ok(all)
}

/// Compare two nodes.
///
/// Equality is decided before reachability, so a node compared with itself is
/// always [`Comparability::Equal`].
pub fn comparable<N: Element>(dag: &Dag<N>, n1: &N, n2: &N) -> Result<Comparability> {
    let a = dag.index_of(n1)?;
    let b = dag.index_of(n2)?;

    if a == b {
        Ok(Comparability::Equal)
    } else if has_path_connecting(dag.graph(), a, b, None) {
        Ok(Comparability::Above)
    } else if has_path_connecting(dag.graph(), b, a, None) {
        Ok(Comparability::Below)
    } else {
        Ok(Comparability::Incomparable)
    }
}

/// `upset(n1) ∩ downset(n2)`.
///
/// Non-empty exactly when `n1` lies below or at `n2`; the result is every
/// node between the two, both ends included.
pub fn interval<N: Element>(dag: &Dag<N>, n1: &N, n2: &N) -> Result<BTreeSet<N>> {
    let above = upset(dag, n1)?;
    let below = downset(dag, n2)?;
    Ok(above.intersection(&below).cloned().collect())
}

/// Nodes with no incoming edge (the top elements).
pub fn roots<N: Element>(dag: &Dag<N>) -> BTreeSet<N> {
    dag.elements(dag.graph().externals(Direction::Incoming))
}

/// Nodes with no outgoing edge (the bottom elements).
pub fn leaves<N: Element>(dag: &Dag<N>) -> BTreeSet<N> {
    dag.elements(dag.graph().externals(Direction::Outgoing))
}

/// Minimal common upper bounds of two nodes.
///
/// The leaves of the subgraph induced by `upset(n1) ∩ upset(n2)`. Empty when
/// the nodes share no upper bound; several nodes when there is no least one.
pub fn join<N: Element>(dag: &Dag<N>, n1: &N, n2: &N) -> Result<BTreeSet<N>> {
    let common: BTreeSet<N> = upset(dag, n1)?
        .intersection(&upset(dag, n2)?)
        .cloned()
        .collect();
    Ok(leaves(&dag.induced_subgraph(&common)))
}

/// Maximal common lower bounds of two nodes.
///
/// The roots of the subgraph induced by `downset(n1) ∩ downset(n2)`.
pub fn meet<N: Element>(dag: &Dag<N>, n1: &N, n2: &N) -> Result<BTreeSet<N>> {
    let common: BTreeSet<N> = downset(dag, n1)?
        .intersection(&downset(dag, n2)?)
        .cloned()
        .collect();
    Ok(roots(&dag.induced_subgraph(&common)))
}

/// Every simple path from a root to a leaf, sorted.
///
/// An isolated node is both a root and a leaf and forms a chain on its own.
/// Exponential in general; meant for small DAGs.
pub fn chains<N: Element>(dag: &Dag<N>) -> Vec<Vec<N>> {
    let graph = dag.graph();
    let tops: Vec<NodeIndex> = graph.externals(Direction::Incoming).collect();
    let bottoms: Vec<NodeIndex> = graph.externals(Direction::Outgoing).collect();

    let mut found = Vec::new();
    for &root in &tops {
        for &leaf in &bottoms {
            if root == leaf {
                found.push(vec![dag.element(root).clone()]);
                continue;
            }
            for path in all_simple_paths::<Vec<NodeIndex>, _>(graph, root, leaf, 0, None) {
                found.push(path.into_iter().map(|ix| dag.element(ix).clone()).collect());
            }
        }
    }
    found.sort();
    found
}

/// Length in edges of the longest path, or `None` for an empty graph.
pub fn longest_path_length<N: Element>(dag: &Dag<N>) -> Result<Option<usize>> {
    let order = dag.topological_order()?;
    let graph = dag.graph();

    let mut depth = vec![0usize; graph.node_count()];
    for &ix in &order {
        for next in graph.neighbors_directed(ix, Direction::Outgoing) {
            depth[next.index()] = depth[next.index()].max(depth[ix.index()] + 1);
        }
    }
    Ok(depth.into_iter().max())
}

/// Number of levels: longest path length plus one, zero for an empty graph.
pub fn height<N: Element>(dag: &Dag<N>) -> Result<usize> {
    Ok(longest_path_length(dag)?.map_or(0, |edges| edges + 1))
}

/// Whether the DAG has exactly one root.
pub fn upper_bounded<N: Element>(dag: &Dag<N>) -> bool {
    dag.graph().externals(Direction::Incoming).count() == 1
}

/// Whether the DAG has exactly one leaf.
pub fn lower_bounded<N: Element>(dag: &Dag<N>) -> bool {
    dag.graph().externals(Direction::Outgoing).count() == 1
}

/// Whether the DAG has exactly one root and exactly one leaf.
///
/// Necessary, not sufficient, for the order to be a lattice.
pub fn bounded<N: Element>(dag: &Dag<N>) -> bool {
    upper_bounded(dag) && lower_bounded(dag)
}

/// Parents of every leaf: the elements covering the bottom.
pub fn atoms<N: Element>(dag: &Dag<N>) -> BTreeSet<N> {
    let graph = dag.graph();
    dag.elements(
        graph
            .externals(Direction::Outgoing)
            .flat_map(|leaf| graph.neighbors_directed(leaf, Direction::Incoming)),
    )
}

/// Children of every root: the elements covered by the top.
pub fn coatoms<N: Element>(dag: &Dag<N>) -> BTreeSet<N> {
    let graph = dag.graph();
    dag.elements(
        graph
            .externals(Direction::Incoming)
            .flat_map(|root| graph.neighbors_directed(root, Direction::Outgoing)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PosetError;

    fn names(items: &[&'static str]) -> BTreeSet<&'static str> {
        items.iter().copied().collect()
    }

    fn branching() -> Dag<&'static str> {
        //       top
        //      /   \
        //     a     b
        //    / \   /
        //   c   d-'
        //    \ /
        //    bot
        Dag::from_edges([
            ("top", "a"),
            ("top", "b"),
            ("a", "c"),
            ("a", "d"),
            ("b", "d"),
            ("c", "bot"),
            ("d", "bot"),
        ])
    }

    #[test]
    fn test_siblings() {
        let dag = branching();

        assert_eq!(upper_siblings(&dag, &"c").unwrap(), names(&["d"]));
        assert_eq!(lower_siblings(&dag, &"a").unwrap(), names(&["b"]));
        assert_eq!(siblings(&dag, &"a").unwrap(), names(&["b"]));
        assert_eq!(siblings(&dag, &"d").unwrap(), names(&["c"]));
        assert_eq!(family(&dag, &"a").unwrap(), names(&["top", "b", "c", "d"]));
    }

    #[test]
    fn test_upset_and_downset_are_reflexive() {
        let dag = branching();

        assert_eq!(upset(&dag, &"d").unwrap(), names(&["top", "a", "b", "d"]));
        assert_eq!(downset(&dag, &"a").unwrap(), names(&["a", "c", "d", "bot"]));
        assert_eq!(upset(&dag, &"top").unwrap(), names(&["top"]));
        assert_eq!(hourglass(&dag, &"b").unwrap(), names(&["top", "b", "d", "bot"]));
    }

    #[test]
    fn test_comparable() {
        let dag = branching();

        assert_eq!(comparable(&dag, &"a", &"a").unwrap(), Comparability::Equal);
        assert_eq!(comparable(&dag, &"top", &"bot").unwrap(), Comparability::Above);
        assert_eq!(comparable(&dag, &"c", &"a").unwrap(), Comparability::Below);
        assert_eq!(comparable(&dag, &"a", &"b").unwrap(), Comparability::Incomparable);
        assert!(matches!(
            comparable(&dag, &"a", &"nowhere"),
            Err(PosetError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_interval() {
        let dag = branching();

        assert_eq!(interval(&dag, &"bot", &"a").unwrap(), names(&["a", "c", "d", "bot"]));
        assert!(interval(&dag, &"a", &"bot").unwrap().is_empty());
    }

    #[test]
    fn test_join_and_meet() {
        let dag = branching();

        assert_eq!(join(&dag, &"c", &"d").unwrap(), names(&["a"]));
        assert_eq!(join(&dag, &"a", &"b").unwrap(), names(&["top"]));
        assert_eq!(meet(&dag, &"a", &"b").unwrap(), names(&["d"]));
        assert_eq!(meet(&dag, &"c", &"d").unwrap(), names(&["bot"]));
    }

    #[test]
    fn test_join_without_common_bound() {
        let dag = Dag::from_edges([("x", "z"), ("y", "w")]);
        assert!(join(&dag, &"z", &"w").unwrap().is_empty());
    }

    #[test]
    fn test_join_frontier_with_several_nodes() {
        // Two incomparable upper bounds for p and q.
        let dag = Dag::from_edges([("u", "p"), ("u", "q"), ("v", "p"), ("v", "q")]);
        assert_eq!(join(&dag, &"p", &"q").unwrap(), names(&["u", "v"]));
    }

    #[test]
    fn test_roots_leaves_atoms_coatoms() {
        let dag = branching();

        assert_eq!(roots(&dag), names(&["top"]));
        assert_eq!(leaves(&dag), names(&["bot"]));
        assert_eq!(atoms(&dag), names(&["c", "d"]));
        assert_eq!(coatoms(&dag), names(&["a", "b"]));
        assert!(bounded(&dag));
    }

    #[test]
    fn test_chains_and_height() {
        let dag = branching();

        assert_eq!(
            chains(&dag),
            vec![
                vec!["top", "a", "c", "bot"],
                vec!["top", "a", "d", "bot"],
                vec!["top", "b", "d", "bot"],
            ]
        );
        assert_eq!(height(&dag).unwrap(), 4);
    }

    #[test]
    fn test_degenerate_graphs() {
        let empty: Dag<u32> = Dag::new();
        assert_eq!(height(&empty).unwrap(), 0);
        assert!(!bounded(&empty));

        let mut single = Dag::new();
        single.add_node(7u32);
        assert_eq!(height(&single).unwrap(), 1);
        assert_eq!(chains(&single), vec![vec![7]]);
        assert!(bounded(&single));
        assert!(atoms(&single).is_empty());
    }

    #[test]
    fn test_height_rejects_cycle() {
        let dag = Dag::from_edges([(1, 2), (2, 3), (3, 1)]);
        assert!(matches!(height(&dag), Err(PosetError::Cycle(_))));
    }
}
