//! `ReservationTable`: which vertices and edges are taken at which tick.
//!
//! # Layout
//!
//! Timed claims live in a `BTreeMap<Tick, FxHashSet<(NodeId, NodeId)>>`:
//!
//! - `(a, a)`: vertex `a` is occupied at that tick;
//! - `(a, b)`, `a != b`: some agent moved `a → b`, arriving at that tick.
//!   A later agent may not move `b → a` arriving at the same tick (that
//!   would be a head-on swap across the edge).
//!
//! A tick with no entry is unconstrained.  Keeping ticks ordered lets the
//! planner ask "can anything still change after tick `t`?" with one range
//! query, which is how a wait that can never end is detected.
//!
//! Agents that reach their goal for good are recorded separately as
//! *parking* entries `node → first tick`, meaning the vertex is occupied at
//! every tick from then on.  Parking is the unbounded counterpart of
//! reserving the goal tick by tick up to some horizon.
//!
//! Entries only accumulate; there is no removal.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use mapf_core::{NodeId, Path, PlanError, Tick};

// ── Reservation ───────────────────────────────────────────────────────────────

/// One timed claim, as reported by [`ReservationTable::reservations_at`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Reservation {
    Vertex(NodeId),
    Edge { from: NodeId, to: NodeId },
}

impl Reservation {
    fn from_pair((from, to): (NodeId, NodeId)) -> Self {
        if from == to {
            Reservation::Vertex(from)
        } else {
            Reservation::Edge { from, to }
        }
    }
}

// ── ReservationTable ──────────────────────────────────────────────────────────

/// Append-only space-time claims made by already-planned agents.
#[derive(Debug, Clone, Default)]
pub struct ReservationTable {
    slots:  BTreeMap<Tick, FxHashSet<(NodeId, NodeId)>>,
    /// Vertex → first tick of its open-ended occupation.
    parked: FxHashMap<NodeId, Tick>,
    /// Cached number of timed claims for O(1) `timed_len()`.
    total:  usize,
}

impl ReservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Claims ────────────────────────────────────────────────────────────

    /// Mark `node` as occupied at `tick`.
    pub fn reserve_vertex(&mut self, tick: Tick, node: NodeId) {
        self.insert(tick, (node, node));
    }

    /// Record a move `from → to` that lands at `tick`.
    ///
    /// `from == to` is a wait and claims the vertex.
    pub fn reserve_edge(&mut self, tick: Tick, from: NodeId, to: NodeId) {
        self.insert(tick, (from, to));
    }

    /// Occupy `node` at every tick from `from` onward.  An earlier existing
    /// parking tick for the same vertex is kept.
    pub fn park(&mut self, node: NodeId, from: Tick) {
        self.parked
            .entry(node)
            .and_modify(|t| *t = (*t).min(from))
            .or_insert(from);
    }

    fn insert(&mut self, tick: Tick, pair: (NodeId, NodeId)) {
        if self.slots.entry(tick).or_default().insert(pair) {
            self.total += 1;
        }
    }

    /// Claim every vertex and move of `path`, then park the agent on its
    /// goal.
    ///
    /// `parking_end` is the exclusive end tick of the goal reservation, or
    /// `None` to park forever.  If the path arrives at or after
    /// `parking_end`, its goal is left unparked and
    /// `Err(PlanError::HorizonExceeded)` is returned; the path's own claims
    /// are recorded either way.
    pub fn commit_path(&mut self, path: &Path, parking_end: Option<Tick>) -> Result<(), PlanError> {
        for (tick, node) in path.iter() {
            self.reserve_vertex(tick, node);
        }
        for (tick, from, to) in path.steps() {
            self.reserve_edge(tick, from, to);
        }

        let arrival = path.arrival();
        match parking_end {
            None => {
                self.park(path.goal(), arrival);
                Ok(())
            }
            Some(end) if arrival >= end => {
                debug!(%arrival, horizon = %end, goal = path.goal().0, "goal left unparked");
                Err(PlanError::HorizonExceeded { arrival, horizon: end })
            }
            Some(end) => {
                for t in arrival.0 + 1..end.0 {
                    self.reserve_vertex(Tick(t), path.goal());
                }
                Ok(())
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` if `node` is occupied at `tick`, by a timed claim or parking.
    pub fn is_vertex_blocked(&self, tick: Tick, node: NodeId) -> bool {
        self.has_pair(tick, (node, node))
            || self.parked.get(&node).is_some_and(|&since| since <= tick)
    }

    /// `true` if moving `from → to` so as to arrive at `tick` is forbidden:
    /// `to` is occupied at `tick`, or another agent crossed `to → from`
    /// arriving at `tick`.
    pub fn is_transition_blocked(&self, tick: Tick, from: NodeId, to: NodeId) -> bool {
        self.is_vertex_blocked(tick, to) || self.has_pair(tick, (to, from))
    }

    /// `true` if the transition is blocked at `tick` and at every later tick.
    ///
    /// Past the last timed claim only parking can block, and parking never
    /// ends, so a move blocked there stays blocked.
    pub fn is_blocked_forever(&self, tick: Tick, from: NodeId, to: NodeId) -> bool {
        self.is_quiet_from(tick) && self.is_transition_blocked(tick, from, to)
    }

    /// `true` if no timed claim exists at `tick` or later.
    pub fn is_quiet_from(&self, tick: Tick) -> bool {
        self.slots.range(tick..).next().is_none()
    }

    fn has_pair(&self, tick: Tick, pair: (NodeId, NodeId)) -> bool {
        self.slots.get(&tick).is_some_and(|set| set.contains(&pair))
    }

    /// The latest tick at which `node` carries a timed vertex claim.
    pub fn last_vertex_claim(&self, node: NodeId) -> Option<Tick> {
        self.slots
            .iter()
            .rev()
            .find(|(_, set)| set.contains(&(node, node)))
            .map(|(&t, _)| t)
    }

    /// The first tick from which `node` is parked, if it is.
    pub fn parked_since(&self, node: NodeId) -> Option<Tick> {
        self.parked.get(&node).copied()
    }

    /// All parking entries, sorted by vertex.
    pub fn parked(&self) -> Vec<(NodeId, Tick)> {
        let mut v: Vec<_> = self.parked.iter().map(|(&n, &t)| (n, t)).collect();
        v.sort_unstable();
        v
    }

    /// The latest tick with a timed claim.
    pub fn last_tick(&self) -> Option<Tick> {
        self.slots.keys().next_back().copied()
    }

    /// Timed claims at `tick`, sorted.
    pub fn reservations_at(&self, tick: Tick) -> Vec<Reservation> {
        let mut v: Vec<Reservation> = self
            .slots
            .get(&tick)
            .into_iter()
            .flatten()
            .map(|&pair| Reservation::from_pair(pair))
            .collect();
        v.sort_unstable();
        v
    }

    /// Every timed claim as `(tick, reservation)`, ordered by tick.
    pub fn iter(&self) -> impl Iterator<Item = (Tick, Reservation)> + '_ {
        self.slots
            .keys()
            .flat_map(move |&t| self.reservations_at(t).into_iter().map(move |r| (t, r)))
    }

    /// Number of timed claims.  Parking entries are counted by
    /// [`parked`](Self::parked), so a table can be non-empty with no timed
    /// claims.
    pub fn timed_len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0 && self.parked.is_empty()
    }

    /// Number of distinct ticks with at least one timed claim.
    pub fn tick_count(&self) -> usize {
        self.slots.len()
    }
}
