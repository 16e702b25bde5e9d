//! Core types for the poset kernel.

pub mod dag;
pub mod comparison;
pub mod rank;

pub use dag::{Dag, DagExport, Element};
pub use comparison::Comparability;
pub use rank::{ComponentId, Rank, NormalizedRank};
