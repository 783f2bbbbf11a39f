//! `Path`: one agent's time-indexed vertex sequence.

use std::fmt;

use crate::{MapfError, MapfResult, NodeId, Tick};

/// Vertices visited by one agent, indexed by tick.
///
/// `nodes[0]` is the start, the last entry is the goal, and two equal
/// consecutive entries mean the agent waited in place for one tick.  A
/// `Path` is never empty.
///
/// With the `serde` feature a path serializes as a bare array of node ids and
/// deserializing an empty array fails.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<NodeId>", into = "Vec<NodeId>"))]
pub struct Path {
    nodes: Vec<NodeId>,
}

impl Path {
    /// Wrap a vertex sequence.  Returns `None` for an empty sequence.
    pub fn new(nodes: Vec<NodeId>) -> Option<Self> {
        if nodes.is_empty() {
            None
        } else {
            Some(Self { nodes })
        }
    }

    /// The zero-length path of an agent already standing on its goal.
    pub fn stationary(node: NodeId) -> Self {
        Self { nodes: vec![node] }
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn goal(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Tick at which the agent reaches its goal for good.
    pub fn arrival(&self) -> Tick {
        Tick((self.nodes.len() - 1) as u64)
    }

    /// Where the agent stands at `tick`.  After arrival the agent stays
    /// parked on its goal.
    pub fn position_at(&self, tick: Tick) -> NodeId {
        self.nodes
            .get(tick.index())
            .copied()
            .unwrap_or_else(|| self.goal())
    }

    /// Number of ticks spent waiting in place.
    pub fn wait_count(&self) -> usize {
        self.nodes.windows(2).filter(|w| w[0] == w[1]).count()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// `(tick, node)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (Tick, NodeId)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(t, &n)| (Tick(t as u64), n))
    }

    /// Consecutive `(tick_of_arrival, from, to)` steps; waits have `from == to`.
    pub fn steps(&self) -> impl Iterator<Item = (Tick, NodeId, NodeId)> + '_ {
        self.nodes
            .windows(2)
            .enumerate()
            .map(|(t, w)| (Tick(t as u64 + 1), w[0], w[1]))
    }
}

impl TryFrom<Vec<NodeId>> for Path {
    type Error = MapfError;

    fn try_from(nodes: Vec<NodeId>) -> MapfResult<Self> {
        Path::new(nodes).ok_or(MapfError::EmptyPath)
    }
}

impl From<Path> for Vec<NodeId> {
    fn from(path: Path) -> Self {
        path.nodes
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, n) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" → ")?;
            }
            write!(f, "{}", n.0)?;
        }
        f.write_str("]")
    }
}
