//! Condensation and rank engine.
//!
//! A [`Condensation`] collapses every strongly-connected component of a graph
//! into one node, giving a DAG of components even when the input has cycles.
//! Ranks are read off that component DAG.
//!
//! ## Height Convention
//!
//! Heights count levels (longest path in edges, plus one), the same as
//! [`order::height`]. With `h` the height of the component DAG:
//!
//! - `top_rank(n)    = height(upset(C, comp(n)))`
//! - `bottom_rank(n) = h - height(downset(C, comp(n)))`
//! - `normalized_rank(n) = ((top - 1) / h, (bottom + 1) / h)`
//!
//! When the component DAG has no edges, rank is `(0, 0)` and normalized rank
//! is `(0, 1)`.
//!
//! ## Snapshots
//!
//! A condensation owns a copy of the graph it was built from and is never
//! updated. Rebuild it when the graph changes; [`CondensationCache`] keys
//! entries by DAG fingerprint so a changed graph is always a cache miss.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::RwLock;
use petgraph::algo::condensation as condense_graph;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::error::{PosetError, Result};
use crate::order;
use crate::types::{ComponentId, Dag, Element, NormalizedRank, Rank};

/// Strongly-connected-component condensation of a graph.
#[derive(Debug, Clone)]
pub struct Condensation<N> {
    /// Snapshot of the source graph.
    dag: Dag<N>,
    /// Component DAG.
    components: Dag<ComponentId>,
    /// Component of each source node, by node index.
    component_of: Vec<ComponentId>,
    /// Members of each component, by component index.
    members: Vec<BTreeSet<N>>,
    /// Height of the component DAG, in levels.
    height: usize,
}

impl<N: Element> Condensation<N> {
    /// Condense a graph. Cycles are allowed and collapse into one component.
    pub fn build(dag: &Dag<N>) -> Result<Self> {
        let indexed: DiGraph<NodeIndex, ()> = dag.graph().map(|ix, _| ix, |_, _| ());
        let condensed = condense_graph(indexed, true);

        let mut components = Dag::new();
        let mut component_of = vec![ComponentId::new(0); dag.node_count()];
        let mut members = Vec::with_capacity(condensed.node_count());

        for cix in condensed.node_indices() {
            let id = ComponentId::new(cix.index());
            components.add_node(id);
            for ix in &condensed[cix] {
                component_of[ix.index()] = id;
            }
            members.push(dag.elements(condensed[cix].iter().copied()));
        }
        for edge in condensed.edge_references() {
            components.add_edge(
                ComponentId::new(edge.source().index()),
                ComponentId::new(edge.target().index()),
            );
        }

        let height = order::height(&components)?;

        tracing::debug!(
            nodes = dag.node_count(),
            components = components.node_count(),
            component_edges = components.edge_count(),
            height,
            "built condensation"
        );

        Ok(Self {
            dag: dag.clone(),
            components,
            component_of,
            members,
            height,
        })
    }

    /// The graph this condensation was built from.
    pub fn dag(&self) -> &Dag<N> {
        &self.dag
    }

    /// Number of nodes in the source graph.
    pub fn node_count(&self) -> usize {
        self.dag.node_count()
    }

    /// The component DAG.
    pub fn components(&self) -> &Dag<ComponentId> {
        &self.components
    }

    /// Number of components.
    pub fn component_count(&self) -> usize {
        self.components.node_count()
    }

    /// Height of the component DAG, in levels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Component containing `n`.
    pub fn component_of(&self, n: &N) -> Result<ComponentId> {
        let ix = self.dag.index_of(n)?;
        Ok(self.component_of[ix.index()])
    }

    /// Source nodes collapsed into component `c`.
    pub fn members_of(&self, c: ComponentId) -> Result<&BTreeSet<N>> {
        self.members
            .get(c.index())
            .ok_or_else(|| PosetError::not_found(&c))
    }

    /// Members of each listed component, in the order given.
    pub fn members_of_all(&self, components: &[ComponentId]) -> Result<Vec<BTreeSet<N>>> {
        components
            .iter()
            .map(|&c| self.members_of(c).cloned())
            .collect()
    }

    /// Whether this condensation was built from a graph equal to `dag`.
    pub fn is_snapshot_of(&self, dag: &Dag<N>) -> bool {
        self.dag.export() == dag.export()
    }

    fn is_flat(&self) -> bool {
        self.components.edge_count() == 0
    }
}

/// Condense a graph.
pub fn build_condensation<N: Element>(dag: &Dag<N>) -> Result<Condensation<N>> {
    Condensation::build(dag)
}

/// Levels from the roots down to the component of `n`, inclusive.
pub fn top_rank<N: Element>(cd: &Condensation<N>, n: &N) -> Result<usize> {
    let c = cd.component_of(n)?;
    if cd.is_flat() {
        return Ok(0);
    }
    let above = order::upset(&cd.components, &c)?;
    order::height(&cd.components.induced_subgraph(&above))
}

/// Height minus the levels from the component of `n` down to the leaves.
pub fn bottom_rank<N: Element>(cd: &Condensation<N>, n: &N) -> Result<usize> {
    let c = cd.component_of(n)?;
    if cd.is_flat() {
        return Ok(0);
    }
    let below = order::downset(&cd.components, &c)?;
    Ok(cd.height - order::height(&cd.components.induced_subgraph(&below))?)
}

/// Top and bottom rank of `n`.
pub fn rank<N: Element>(cd: &Condensation<N>, n: &N) -> Result<Rank> {
    Ok(Rank::new(top_rank(cd, n)?, bottom_rank(cd, n)?))
}

/// Rank of `n` divided by the height, offset by one at each end.
pub fn normalized_rank<N: Element>(cd: &Condensation<N>, n: &N) -> Result<NormalizedRank> {
    let r = rank(cd, n)?;
    if cd.is_flat() {
        return Ok(NormalizedRank::new(0.0, 1.0));
    }
    let h = cd.height as f64;
    Ok(NormalizedRank::new(
        (r.top as f64 - 1.0) / h,
        (r.bottom as f64 + 1.0) / h,
    ))
}

/// Configuration for the condensation cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of condensations kept.
    pub max_entries: usize,
    /// Whether to enable the cache.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 64,
            enabled: true,
        }
    }
}

/// Result of a cache lookup.
#[derive(Debug, Clone)]
pub struct CachedCondensation<N> {
    /// The condensation of the requested graph.
    pub condensation: Arc<Condensation<N>>,
    /// Whether this result came from cache.
    pub cache_hit: bool,
}

/// Cache statistics.
#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    /// Current number of entries in the cache.
    pub len: usize,
    /// Maximum capacity of the cache.
    pub cap: usize,
}

/// LRU cache of condensations keyed by DAG fingerprint.
///
/// Thread-safe; entries are shared as `Arc` snapshots.
pub struct CondensationCache<N> {
    cache: Option<RwLock<LruCache<String, Arc<Condensation<N>>>>>,
}

impl<N: Element + Serialize> CondensationCache<N> {
    /// Create a cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        let cache = if config.enabled {
            let size = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
            Some(RwLock::new(LruCache::new(size)))
        } else {
            None
        };

        Self { cache }
    }

    /// Fetch the condensation of `dag`, building it on a miss.
    pub fn get_or_build(&self, dag: &Dag<N>) -> Result<CachedCondensation<N>> {
        let Some(cache) = &self.cache else {
            return Ok(CachedCondensation {
                condensation: Arc::new(Condensation::build(dag)?),
                cache_hit: false,
            });
        };

        let key = dag.fingerprint()?;

        if let Some(found) = cache.write().get(&key) {
            if found.is_snapshot_of(dag) {
                tracing::trace!(fingerprint = %key, "condensation cache hit");
                return Ok(CachedCondensation {
                    condensation: Arc::clone(found),
                    cache_hit: true,
                });
            }
        }

        tracing::trace!(fingerprint = %key, "condensation cache miss");
        let condensation = Arc::new(Condensation::build(dag)?);
        cache.write().put(key, Arc::clone(&condensation));

        Ok(CachedCondensation {
            condensation,
            cache_hit: false,
        })
    }

    /// Get cache statistics.
    ///
    /// Returns `None` if caching is disabled.
    pub fn stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| {
            let cache = cache.read();
            CacheStats {
                len: cache.len(),
                cap: cache.cap().get(),
            }
        })
    }

    /// Drop every cached condensation.
    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.write().clear();
        }
    }
}

impl<N: Element + Serialize> Default for CondensationCache<N> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
