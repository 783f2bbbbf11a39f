//! The `SearchGraph` trait and the cached shortest-distance oracle.
//!
//! # Pluggability
//!
//! The planners only see a graph through [`SearchGraph`], so topologies with
//! a cheap admissible estimate (e.g. [`GridGraph`](crate::GridGraph) with
//! Manhattan distance) can override [`SearchGraph::distance_heuristic`]
//! without touching the search itself.
//!
//! # Caching
//!
//! [`DistanceOracle`] answers `distance(origin, dest)` from a per-origin
//! table.  The first query from an origin runs one single-source Dijkstra over
//! the whole graph and stores every destination (`f64::INFINITY` for
//! unreachable ones).  Any edge mutation clears the tables for *all* origins.
//!
//! Queries take `&self` and fill the cache behind an `RwLock`, so one oracle
//! can serve several planners at once.  Mutations take `&mut self`, which
//! rules out a concurrent reader at compile time.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use ordered_float::OrderedFloat;
use tracing::trace;

use mapf_core::{MapfResult, NodeId};

use crate::graph::{Edge, Graph};

// ── SearchGraph trait ─────────────────────────────────────────────────────────

/// Everything the planners need from a graph.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one graph can back several
/// independent team-planning runs.
pub trait SearchGraph: Send + Sync {
    fn node_count(&self) -> usize;

    /// Outgoing edges of `node`; empty for unknown nodes.
    fn neighbours(&self, node: NodeId) -> &[Edge];

    /// Exact shortest-path cost, `f64::INFINITY` if unreachable.
    fn distance(&self, origin: NodeId, dest: NodeId) -> f64;

    /// Admissible estimate of `distance(origin, dest)`.
    ///
    /// Must never exceed the true distance.  The default is the exact
    /// distance itself, which is consistent but pays a full single-source
    /// search per new origin.
    fn distance_heuristic(&self, origin: NodeId, dest: NodeId) -> f64 {
        self.distance(origin, dest)
    }
}

// ── DistanceOracle ────────────────────────────────────────────────────────────

/// A [`Graph`] plus a lazily filled all-destinations distance cache.
#[derive(Debug)]
pub struct DistanceOracle {
    graph: Graph,
    /// `cache[origin]` = distances from `origin` to every node, once computed.
    cache: RwLock<Vec<Option<Arc<[f64]>>>>,
    /// Number of single-source searches run so far.
    computations: AtomicUsize,
}

impl DistanceOracle {
    pub fn new(graph: Graph) -> Self {
        let n = graph.node_count();
        Self {
            graph,
            cache: RwLock::new(vec![None; n]),
            computations: AtomicUsize::new(0),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// How many single-source Dijkstra runs this oracle has performed.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }

    /// Number of origins whose distance table is currently cached.
    pub fn cached_origins(&self) -> usize {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        cache.iter().filter(|row| row.is_some()).count()
    }

    /// Fill the cache for every origin up front.
    ///
    /// With the `parallel` Cargo feature the origins are spread over Rayon's
    /// thread pool.
    pub fn precompute_all(&self) {
        let n = self.graph.node_count() as u32;

        #[cfg(not(feature = "parallel"))]
        for i in 0..n {
            self.row(NodeId(i));
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            (0..n).into_par_iter().for_each(|i| {
                self.row(NodeId(i));
            });
        }
    }

    // ── Mutation (invalidates the whole cache) ────────────────────────────

    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> MapfResult<()> {
        self.graph.add_edge(from, to, weight)?;
        self.invalidate();
        Ok(())
    }

    pub fn add_edge_bidirectional(&mut self, a: NodeId, b: NodeId, weight: f64) -> MapfResult<()> {
        self.graph.add_edge_bidirectional(a, b, weight)?;
        self.invalidate();
        Ok(())
    }

    /// Remove the `from → to` edge.  Returns `true` if it existed.
    pub fn remove_edges(&mut self, from: NodeId, to: NodeId) -> bool {
        let removed = self.graph.remove_edges(from, to);
        self.invalidate();
        removed
    }

    pub fn clear_edges(&mut self) {
        self.graph.clear_edges();
        self.invalidate();
    }

    /// Drop every cached distance table.
    pub fn invalidate(&mut self) {
        let cache = self.cache.get_mut().unwrap_or_else(PoisonError::into_inner);
        cache.iter_mut().for_each(|row| *row = None);
    }

    // ── Cache internals ───────────────────────────────────────────────────

    /// Distance table for `origin`, computing and caching it on a miss.
    fn row(&self, origin: NodeId) -> Arc<[f64]> {
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(row) = &cache[origin.index()] {
                return Arc::clone(row);
            }
        }

        let row: Arc<[f64]> = single_source(&self.graph, origin).into();
        self.computations.fetch_add(1, Ordering::Relaxed);
        trace!(origin = origin.0, "distance table computed");

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        // Another reader may have raced us here; both results are identical.
        cache[origin.index()].get_or_insert_with(|| Arc::clone(&row));
        row
    }
}

impl From<Graph> for DistanceOracle {
    fn from(graph: Graph) -> Self {
        Self::new(graph)
    }
}

impl SearchGraph for DistanceOracle {
    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn neighbours(&self, node: NodeId) -> &[Edge] {
        self.graph.neighbours(node)
    }

    fn distance(&self, origin: NodeId, dest: NodeId) -> f64 {
        if !self.graph.contains(origin) || !self.graph.contains(dest) {
            return f64::INFINITY;
        }
        self.row(origin)[dest.index()]
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Shortest distance from `origin` to every node.
fn single_source(graph: &Graph, origin: NodeId) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; graph.node_count()];
    dist[origin.index()] = 0.0;

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as min-heap.
    // Secondary key NodeId ensures deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), origin)));

    while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in graph.neighbours(node) {
            let new_cost = cost + edge.weight;
            if new_cost < dist[edge.to.index()] {
                dist[edge.to.index()] = new_cost;
                heap.push(Reverse((OrderedFloat(new_cost), edge.to)));
            }
        }
    }

    dist
}
