//! Information content and pairwise distances over a poset-as-DAG.
//!
//! Information content grows as a node's downset shrinks: the more specific
//! a node, the more information it carries. The semantic measures
//! (Jiang-Conrath, Resnick, Lin) use the information content of the most
//! specific common generalization, taken over the join of the two nodes.

use crate::error::{PosetError, Result};
use crate::order::{downset, join, upset};
use crate::types::{Dag, Element};

/// `-log2(|downset(n)| / |V|)`.
///
/// Zero exactly when the downset of `n` is the whole graph.
pub fn information_content<N: Element>(dag: &Dag<N>, n: &N) -> Result<f64> {
    let below = downset(dag, n)?.len() as f64;
    let total = dag.node_count() as f64;
    Ok(-(below / total).log2())
}

/// Largest information content over the join of `n1` and `n2`.
///
/// Fails with [`PosetError::EmptyJoin`] when the nodes have no common upper
/// bound.
pub fn max_join_information<N: Element>(dag: &Dag<N>, n1: &N, n2: &N) -> Result<f64> {
    let mut best: Option<f64> = None;
    for j in join(dag, n1, n2)? {
        let ic = information_content(dag, &j)?;
        best = Some(best.map_or(ic, |b| b.max(ic)));
    }
    best.ok_or(PosetError::EmptyJoin)
}

/// Size of the symmetric difference of the two downsets.
///
/// Zero iff the downsets are identical.
pub fn lower_order_distance<N: Element>(dag: &Dag<N>, n1: &N, n2: &N) -> Result<usize> {
    let x = downset(dag, n1)?;
    let y = downset(dag, n2)?;
    Ok(x.symmetric_difference(&y).count())
}

/// Size of the symmetric difference of the two upsets.
pub fn upper_order_distance<N: Element>(dag: &Dag<N>, n1: &N, n2: &N) -> Result<usize> {
    let x = upset(dag, n1)?;
    let y = upset(dag, n2)?;
    Ok(x.symmetric_difference(&y).count())
}

/// Jiang-Conrath distance: `IC(n1) + IC(n2) - 2·M(n1, n2)`.
pub fn jiang_conrath_distance<N: Element>(dag: &Dag<N>, n1: &N, n2: &N) -> Result<f64> {
    let m = max_join_information(dag, n1, n2)?;
    Ok(information_content(dag, n1)? + information_content(dag, n2)? - 2.0 * m)
}

/// Resnick distance: `1 + M(n1, n2) / |V|`.
pub fn resnick_distance<N: Element>(dag: &Dag<N>, n1: &N, n2: &N) -> Result<f64> {
    let m = max_join_information(dag, n1, n2)?;
    Ok(1.0 + m / dag.node_count() as f64)
}

/// Lin distance: `1 - 2·M(n1, n2) / (IC(n1) + IC(n2))`.
///
/// Undefined when both nodes have zero information content.
pub fn lin_distance<N: Element>(dag: &Dag<N>, n1: &N, n2: &N) -> Result<f64> {
    let m = max_join_information(dag, n1, n2)?;
    let denominator = information_content(dag, n1)? + information_content(dag, n2)?;
    if denominator == 0.0 {
        return Err(PosetError::ZeroDenominator { measure: "lin_distance" });
    }
    Ok(1.0 - 2.0 * m / denominator)
}
