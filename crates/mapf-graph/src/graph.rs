//! Directed weighted graph over nodes `0..N`.
//!
//! # Data layout
//!
//! One adjacency `Vec<Edge>` per node, indexed by `NodeId`.  Unlike a frozen
//! CSR layout the lists stay mutable: edges are added and removed while a
//! scenario is being assembled, and the [`DistanceOracle`] wrapping the
//! graph drops its cache on every such change.
//!
//! There is at most one directed edge per ordered `(from, to)` pair; adding
//! an edge that already exists replaces its weight.
//!
//! [`DistanceOracle`]: crate::DistanceOracle

use mapf_core::{GraphRng, MapfError, MapfResult, NodeId};

// ── Edge ──────────────────────────────────────────────────────────────────────

/// One outgoing edge: destination and traversal cost.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub to:     NodeId,
    /// Finite, non-negative cost of crossing the edge.
    pub weight: f64,
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Directed graph with a fixed node count and mutable adjacency lists.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// A graph of `node_count` isolated nodes.
    pub fn new(node_count: usize) -> Self {
        Self { adjacency: vec![Vec::new(); node_count] }
    }

    /// A graph with `edges` random directed unit-weight edges between
    /// `node_count` nodes.  Self-loops and repeated pairs are allowed to be
    /// drawn; a repeated pair simply replaces the earlier edge.
    pub fn random(node_count: usize, edges: usize, rng: &mut GraphRng) -> Self {
        let mut g = Self::new(node_count);
        if node_count == 0 {
            return g;
        }
        for _ in 0..edges {
            let a = NodeId(rng.index(node_count) as u32);
            let b = NodeId(rng.index(node_count) as u32);
            g.insert_unchecked(a, b, 1.0);
        }
        g
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.adjacency.len()
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Outgoing edges of `node`.  Empty for nodes outside the graph.
    #[inline]
    pub fn neighbours(&self, node: NodeId) -> &[Edge] {
        self.adjacency
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Weight of the `from → to` edge, if present.
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.neighbours(from)
            .iter()
            .find(|e| e.to == to)
            .map(|e| e.weight)
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edge_weight(from, to).is_some()
    }

    /// Every edge as `(from, to, weight)`, grouped by source node.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(i, list)| {
            list.iter().map(move |e| (NodeId(i as u32), e.to, e.weight))
        })
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Add the directed edge `from → to`, replacing any existing one.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> MapfResult<()> {
        self.check_node(from)?;
        self.check_node(to)?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(MapfError::InvalidWeight { from, to, weight });
        }
        self.insert_unchecked(from, to, weight);
        Ok(())
    }

    /// Add edges in both directions with the same weight.
    pub fn add_edge_bidirectional(&mut self, a: NodeId, b: NodeId, weight: f64) -> MapfResult<()> {
        self.add_edge(a, b, weight)?;
        self.add_edge(b, a, weight)
    }

    /// Remove the directed edge `from → to`.  Returns `true` if it existed.
    pub fn remove_edges(&mut self, from: NodeId, to: NodeId) -> bool {
        let Some(list) = self.adjacency.get_mut(from.index()) else {
            return false;
        };
        let before = list.len();
        list.retain(|e| e.to != to);
        list.len() != before
    }

    /// Drop every edge, keeping the node set.
    pub fn clear_edges(&mut self) {
        for list in &mut self.adjacency {
            list.clear();
        }
    }

    fn insert_unchecked(&mut self, from: NodeId, to: NodeId, weight: f64) {
        let list = &mut self.adjacency[from.index()];
        list.retain(|e| e.to != to);
        list.push(Edge { to, weight });
    }

    fn check_node(&self, node: NodeId) -> MapfResult<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(MapfError::NodeOutOfRange { node, node_count: self.node_count() })
        }
    }
}
