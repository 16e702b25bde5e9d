//! # poset-kernel
//!
//! Order-theoretic structure over finite collections of sets.
//!
//! The kernel answers one question:
//!
//! > Given a collection of sets, how are its elements **ordered**, and how far
//! > apart are they in that order?
//!
//! ## Core Contract
//!
//! 1. Build a minimal DAG (the covering relation) of subset inclusion
//! 2. Query it as a poset: upsets, downsets, joins, meets, chains, bounds
//! 3. Rank nodes through a strongly-connected-component condensation
//! 4. Measure distances: order distances and information-content measures
//!
//! ## Architecture
//!
//! ```text
//! raw sets → sets (algebra) → builder (subset DAG) → order ⟷ condensation → distance
//!                                    ↓
//!                              compatibility / valuation
//! ```
//!
//! ## Edge Direction
//!
//! An edge `u → v` means `u` covers `v`. Following edges descends the order:
//! predecessors are above a node, successors below it. Roots are the top
//! elements and leaves the bottom elements.
//!
//! ## Determinism Guarantees
//!
//! - Node-set results are `BTreeSet`s, ordered by element
//! - Set lists are in canonical order (lexicographic over sorted elements)
//! - Equal DAGs share a fingerprint regardless of insertion order

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;
pub mod canonical;
pub mod sets;
pub mod builder;
pub mod order;
pub mod condensation;
pub mod distance;
pub mod valuation;
pub mod compatibility;

// Re-exports
pub use error::{PosetError, Result};
pub use types::{Dag, DagExport, Element, Comparability, ComponentId, Rank, NormalizedRank};
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex};
pub use sets::{
    ClosureOptions, union, intersection, jaccard, left_ratio, right_ratio, power_set,
    sort_set_list, union_all, intersection_all, closure, intersection_closure,
    union_closure, topology, is_closed, kappa, smoothness,
};
pub use builder::{
    subset_dag, boolean_dag, transitive_reduction, is_transitively_reduced, validate,
    weak_interval_dag, compose,
};
pub use order::{
    upper_siblings, lower_siblings, siblings, family, upset, downset, hourglass,
    comparable, interval, roots, leaves, join, meet, chains, longest_path_length, height,
    upper_bounded, lower_bounded, bounded, atoms, coatoms,
};
pub use condensation::{
    Condensation, CondensationCache, CachedCondensation, CacheConfig, CacheStats,
    build_condensation, top_rank, bottom_rank, rank, normalized_rank,
};
pub use distance::{
    information_content, max_join_information, lower_order_distance, upper_order_distance,
    jiang_conrath_distance, resnick_distance, lin_distance,
};
pub use valuation::{RadiusWitness, assignment, radius};
pub use compatibility::{CompatibilityReport, OrderCompatibility, order_compatibility};

/// Schema version of the exported types.
/// Increment on breaking changes to any serialized type.
pub const POSET_KERNEL_SCHEMA_VERSION: &str = "1.0.0";
