//! Set algebra over finite sets of items.
//!
//! Sets are `BTreeSet<T>`. Their derived ordering compares the sorted element
//! sequences lexicographically, which is the canonical order used for every
//! set list returned from this module.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{PosetError, Result};

/// Options for closure computations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureOptions {
    /// Drop the empty set from the result.
    pub remove_empty: bool,
}

impl ClosureOptions {
    /// Options that drop the empty set.
    pub fn without_empty() -> Self {
        Self { remove_empty: true }
    }
}

/// Union of two sets.
pub fn union<T: Ord + Clone>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> BTreeSet<T> {
    a.union(b).cloned().collect()
}

/// Intersection of two sets.
pub fn intersection<T: Ord + Clone>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> BTreeSet<T> {
    a.intersection(b).cloned().collect()
}

fn union_size<T: Ord>(x: &BTreeSet<T>, y: &BTreeSet<T>) -> Result<usize> {
    let shared = x.intersection(y).count();
    match x.len() + y.len() - shared {
        0 => Err(PosetError::EmptyUnion),
        n => Ok(n),
    }
}

/// Jaccard similarity: |x ∩ y| / |x ∪ y|.
pub fn jaccard<T: Ord>(x: &BTreeSet<T>, y: &BTreeSet<T>) -> Result<f64> {
    let union_size = union_size(x, y)?;
    Ok(x.intersection(y).count() as f64 / union_size as f64)
}

/// Fraction of the union found only in `x`: |x \ y| / |x ∪ y|.
pub fn left_ratio<T: Ord>(x: &BTreeSet<T>, y: &BTreeSet<T>) -> Result<f64> {
    let union_size = union_size(x, y)?;
    Ok(x.difference(y).count() as f64 / union_size as f64)
}

/// Fraction of the union found only in `y`: |y \ x| / |x ∪ y|.
pub fn right_ratio<T: Ord>(x: &BTreeSet<T>, y: &BTreeSet<T>) -> Result<f64> {
    left_ratio(y, x)
}

/// Every subset of `s`, including the empty set and `s` itself.
///
/// Subset `i` holds the items whose position in `s` is a set bit of `i`, so
/// the output order is deterministic for a given input.
///
/// # Panics
///
/// Panics if `s` has as many items as `usize` has bits.
pub fn power_set<T: Ord + Clone>(s: &BTreeSet<T>) -> Vec<BTreeSet<T>> {
    let items: Vec<&T> = s.iter().collect();
    assert!(
        items.len() < usize::BITS as usize,
        "power set of {} items cannot be enumerated",
        items.len()
    );

    (0..1usize << items.len())
        .map(|mask| {
            items
                .iter()
                .enumerate()
                .filter(|(bit, _)| (mask >> bit) & 1 == 1)
                .map(|(_, item)| (*item).clone())
                .collect()
        })
        .collect()
}

/// Canonical ordering of a set list.
pub fn sort_set_list<T: Ord>(mut sets: Vec<BTreeSet<T>>) -> Vec<BTreeSet<T>> {
    sets.sort();
    sets
}

/// Union of every set in the list.
pub fn union_all<T: Ord + Clone>(sets: &[BTreeSet<T>]) -> BTreeSet<T> {
    sets.iter().flatten().cloned().collect()
}

/// Intersection of every set in the list, or `None` for an empty list.
pub fn intersection_all<T: Ord + Clone>(sets: &[BTreeSet<T>]) -> Option<BTreeSet<T>> {
    let (first, rest) = sets.split_first()?;
    Some(rest.iter().fold(first.clone(), |acc, s| intersection(&acc, s)))
}

/// Close a set list under a binary operation.
///
/// Worklist fixed point: every newly discovered set is combined with every
/// known set, and the loop ends once a round discovers nothing. Terminates
/// because the sets produced are drawn from the finite power set of the union
/// of the inputs.
///
/// The result is deduplicated and in canonical order.
pub fn closure<T, F>(sets: &[BTreeSet<T>], op: F, options: ClosureOptions) -> Vec<BTreeSet<T>>
where
    T: Ord + Clone,
    F: Fn(&BTreeSet<T>, &BTreeSet<T>) -> BTreeSet<T>,
{
    let mut seen: BTreeSet<BTreeSet<T>> = sets.iter().cloned().collect();
    let mut known: Vec<BTreeSet<T>> = seen.iter().cloned().collect();
    let mut frontier = known.clone();
    let mut rounds = 0usize;

    while !frontier.is_empty() {
        let mut discovered = Vec::new();
        for fresh in &frontier {
            for existing in &known {
                let combined = op(fresh, existing);
                if !seen.contains(&combined) {
                    seen.insert(combined.clone());
                    discovered.push(combined);
                }
            }
        }
        known.extend(discovered.iter().cloned());
        frontier = discovered;
        rounds += 1;
    }

    if options.remove_empty {
        seen.remove(&BTreeSet::new());
    }

    tracing::trace!(input = sets.len(), output = seen.len(), rounds, "closure reached fixed point");
    seen.into_iter().collect()
}

/// Close a set list under pairwise intersection.
pub fn intersection_closure<T: Ord + Clone>(
    sets: &[BTreeSet<T>],
    options: ClosureOptions,
) -> Vec<BTreeSet<T>> {
    closure(sets, intersection, options)
}

/// Close a set list under pairwise union.
pub fn union_closure<T: Ord + Clone>(
    sets: &[BTreeSet<T>],
    options: ClosureOptions,
) -> Vec<BTreeSet<T>> {
    closure(sets, union, options)
}

/// Intersection closure followed by union closure.
///
/// The smallest set system containing the inputs that is closed under both
/// operations.
pub fn topology<T: Ord + Clone>(sets: &[BTreeSet<T>], options: ClosureOptions) -> Vec<BTreeSet<T>> {
    union_closure(&intersection_closure(sets, options), options)
}

/// Whether `op` applied to any pair of the list stays inside the list.
pub fn is_closed<T, F>(sets: &[BTreeSet<T>], op: F) -> bool
where
    T: Ord + Clone,
    F: Fn(&BTreeSet<T>, &BTreeSet<T>) -> BTreeSet<T>,
{
    let members: BTreeSet<&BTreeSet<T>> = sets.iter().collect();
    sets.iter().all(|a| sets.iter().all(|b| members.contains(&op(a, b))))
}

/// Dispersion of a count vector: `log2(len) / log2(sum)`.
///
/// A single count has dispersion 1.
pub fn kappa(counts: &[u64]) -> Result<f64> {
    match counts.len() {
        0 => Err(PosetError::EmptyInput("kappa")),
        1 => Ok(1.0),
        len => {
            let total: u64 = counts.iter().sum();
            let denominator = (total as f64).log2();
            if denominator <= 0.0 {
                return Err(PosetError::ZeroDenominator { measure: "kappa" });
            }
            Ok((len as f64).log2() / denominator)
        }
    }
}

/// Normalized Shannon entropy of a count vector.
///
/// Zero counts contribute nothing. A single count has smoothness 1.
pub fn smoothness(counts: &[u64]) -> Result<f64> {
    match counts.len() {
        0 => Err(PosetError::EmptyInput("smoothness")),
        1 => Ok(1.0),
        len => {
            let total: u64 = counts.iter().sum();
            if total == 0 {
                return Err(PosetError::ZeroDenominator { measure: "smoothness" });
            }
            let entropy: f64 = counts
                .iter()
                .filter(|&&c| c > 0)
                .map(|&c| {
                    let f = c as f64 / total as f64;
                    -f * f.log2()
                })
                .sum();
            Ok(entropy / (len as f64).log2())
        }
    }
}
