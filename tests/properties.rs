//! Property tests for the poset kernel.
//!
//! Random small set families are turned into subset DAGs and checked against
//! the order laws every query relies on.

use std::collections::BTreeSet;

use poset_kernel::{
    comparable, downset, intersection, is_closed, is_transitively_reduced, jaccard, left_ratio,
    lower_order_distance, power_set, right_ratio, subset_dag, topology, union, upper_order_distance,
    upset, ClosureOptions, Comparability,
};
use proptest::prelude::*;

fn item_set() -> impl Strategy<Value = BTreeSet<u8>> {
    prop::collection::btree_set(0u8..6, 0..4)
}

fn set_family() -> impl Strategy<Value = Vec<BTreeSet<u8>>> {
    prop::collection::vec(item_set(), 1..8)
}

proptest! {
    #[test]
    fn subset_dag_is_acyclic_and_reduced(sets in set_family()) {
        let dag = subset_dag(&sets).unwrap();

        prop_assert!(dag.is_acyclic());
        prop_assert!(is_transitively_reduced(&dag).unwrap());

        let unique: BTreeSet<_> = sets.iter().cloned().collect();
        prop_assert_eq!(dag.node_count(), unique.len());
    }

    #[test]
    fn edges_point_from_superset_to_subset(sets in set_family()) {
        let dag = subset_dag(&sets).unwrap();

        for (above, below) in dag.edges() {
            prop_assert!(above.is_superset(&below));
            prop_assert_ne!(above, below);
        }
    }

    #[test]
    fn upset_and_downset_contain_the_node(sets in set_family()) {
        let dag = subset_dag(&sets).unwrap();

        for n in dag.nodes() {
            prop_assert!(upset(&dag, n).unwrap().contains(n));
            prop_assert!(downset(&dag, n).unwrap().contains(n));
        }
    }

    #[test]
    fn comparability_matches_inclusion(sets in set_family()) {
        let dag = subset_dag(&sets).unwrap();

        for a in dag.nodes() {
            for b in dag.nodes() {
                let c = comparable(&dag, a, b).unwrap();
                prop_assert_eq!(comparable(&dag, b, a).unwrap(), c.flip());

                let expected = if a == b {
                    Comparability::Equal
                } else if a.is_superset(b) {
                    Comparability::Above
                } else if b.is_superset(a) {
                    Comparability::Below
                } else {
                    Comparability::Incomparable
                };
                prop_assert_eq!(c, expected);
            }
        }
    }

    #[test]
    fn order_distances_vanish_on_identity(sets in set_family()) {
        let dag = subset_dag(&sets).unwrap();

        for a in dag.nodes() {
            prop_assert_eq!(lower_order_distance(&dag, a, a).unwrap(), 0);
            prop_assert_eq!(upper_order_distance(&dag, a, a).unwrap(), 0);
            for b in dag.nodes() {
                prop_assert_eq!(
                    lower_order_distance(&dag, a, b).unwrap(),
                    lower_order_distance(&dag, b, a).unwrap()
                );
            }
        }
    }

    #[test]
    fn overlap_ratios_sum_to_one(x in item_set(), y in item_set()) {
        prop_assume!(!(x.is_empty() && y.is_empty()));

        let total = jaccard(&x, &y).unwrap() + left_ratio(&x, &y).unwrap() + right_ratio(&x, &y).unwrap();
        prop_assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn power_set_has_two_to_the_n_members(s in prop::collection::btree_set(0u16..100, 0..8)) {
        let p = power_set(&s);
        prop_assert_eq!(p.len(), 1usize << s.len());

        let unique: BTreeSet<_> = p.into_iter().collect();
        prop_assert_eq!(unique.len(), 1usize << s.len());
    }

    #[test]
    fn topology_is_closed(sets in set_family()) {
        let t = topology(&sets, ClosureOptions::default());

        prop_assert!(is_closed(&t, union));
        prop_assert!(is_closed(&t, intersection));
        for s in &sets {
            prop_assert!(t.contains(s));
        }
    }

    #[test]
    fn fingerprint_ignores_input_order(sets in set_family()) {
        let mut reversed = sets.clone();
        reversed.reverse();

        prop_assert_eq!(
            subset_dag(&sets).unwrap().fingerprint().unwrap(),
            subset_dag(&reversed).unwrap().fingerprint().unwrap()
        );
    }
}
