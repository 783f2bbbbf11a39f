//! Single-agent planning against a reservation table.
//!
//! # Pluggability
//!
//! [`TeamPlanner`](crate::TeamPlanner) calls the single-agent search through
//! the [`SingleAgentPlanner`] trait, so other searches (e.g. a full
//! time-expanded A* keyed by `(node, tick)`) can be swapped in without
//! touching the orchestrator.  The default is [`CooperativeAStar`].
//!
//! # Two phases
//!
//! 1. **Search**: best-first over nodes, ordered by
//!    `(cost + heuristic, arrival tick, node)`.  Best cost is kept *per node*:
//!    only the cheapest arrival at a node survives, and a closed node is never
//!    reopened.  Moves blocked by the table are delayed by waiting in place,
//!    with the wait cost added to the move.  This only approximates the
//!    table, because a node's recorded arrival time can later be bypassed.
//! 2. **Replay**: the predecessor chain found by the search is re-timed from
//!    tick 0 against the table, inserting waits wherever a move is still
//!    blocked.  The replay is what makes the returned path safe.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use tracing::debug;

use mapf_core::{NodeId, Path, PlanError, PlannerConfig, Tick};
use mapf_graph::SearchGraph;
use mapf_reservation::ReservationTable;

// ── SingleAgentPlanner trait ──────────────────────────────────────────────────

/// Finds one agent's path while keeping clear of already-committed agents.
pub trait SingleAgentPlanner {
    /// Plan `start → goal` around `reservations`.
    ///
    /// `start == goal` yields the one-node path `[start]` when the vertex is
    /// free.  Failure is reported per agent and never panics.
    fn plan(
        &self,
        graph:        &dyn SearchGraph,
        start:        NodeId,
        goal:         NodeId,
        reservations: &ReservationTable,
    ) -> Result<Path, PlanError>;
}

// ── CooperativeAStar ──────────────────────────────────────────────────────────

/// Time-aware A* with per-node costs and reconstruction-time conflict repair.
#[derive(Debug, Clone, Default)]
pub struct CooperativeAStar {
    config: PlannerConfig,
}

/// Frontier entry: `(f = g + h, arrival tick, node)`, smallest first.
type Frontier = BinaryHeap<Reverse<(OrderedFloat<f64>, Tick, NodeId)>>;

impl CooperativeAStar {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn heuristic(&self, graph: &dyn SearchGraph, node: NodeId, goal: NodeId) -> f64 {
        if self.config.exact_heuristic {
            graph.distance(node, goal)
        } else {
            graph.distance_heuristic(node, goal)
        }
    }

    /// Best-first search.  Returns the predecessor table once `goal` is
    /// popped, `None` if the frontier runs dry first.
    fn search(
        &self,
        graph: &dyn SearchGraph,
        start: NodeId,
        goal:  NodeId,
        table: &ReservationTable,
    ) -> Option<Vec<NodeId>> {
        let n = graph.node_count();
        let mut best   = vec![f64::INFINITY; n];
        let mut trace  = vec![NodeId::INVALID; n];
        let mut closed = vec![false; n];

        best[start.index()] = 0.0;
        let mut open = Frontier::new();
        open.push(Reverse((OrderedFloat(self.heuristic(graph, start, goal)), Tick::ZERO, start)));

        while let Some(Reverse((_, depart, node))) = open.pop() {
            if closed[node.index()] {
                continue;
            }
            if node == goal {
                return Some(trace);
            }
            closed[node.index()] = true;

            for edge in graph.neighbours(node) {
                let adj = edge.to;
                if closed[adj.index()] {
                    continue;
                }
                // Every neighbour waits from the node's own departure tick.
                let Some(arrival) = self.earliest_arrival(table, depart, node, adj) else {
                    continue;
                };
                let waited = arrival.since(depart) - 1;
                let cost = best[node.index()] + edge.weight + waited as f64;
                if cost >= best[adj.index()] {
                    continue;
                }
                let h = self.heuristic(graph, adj, goal);
                if h.is_infinite() {
                    continue;
                }
                trace[adj.index()] = node;
                best[adj.index()] = cost;
                open.push(Reverse((OrderedFloat(cost + h), arrival, adj)));
            }
        }
        None
    }

    /// Earliest tick at which `from → to` can land when leaving no earlier
    /// than `depart`, waiting on `from` in between.  `None` if `from` itself
    /// gets taken while waiting, or the move can never happen.
    fn earliest_arrival(
        &self,
        table:  &ReservationTable,
        depart: Tick,
        from:   NodeId,
        to:     NodeId,
    ) -> Option<Tick> {
        let mut now = depart;
        let mut waited = 0;
        loop {
            let arrive = now.next();
            if !table.is_transition_blocked(arrive, from, to) {
                return Some(arrive);
            }
            if table.is_blocked_forever(arrive, from, to) {
                return None;
            }
            waited += 1;
            if self.config.wait_exhausted(waited) {
                return None;
            }
            now = arrive;
            if table.is_vertex_blocked(now, from) {
                return None;
            }
        }
    }

    /// Re-time the node chain from tick 0, waiting wherever the table still
    /// forbids a move.
    ///
    /// Before the final step into the goal the agent also waits until every
    /// timed claim on the goal has passed, since it stays there afterwards.
    fn replay(&self, table: &ReservationTable, chain: &[NodeId]) -> Option<Path> {
        let start = chain[0];
        let goal = chain[chain.len() - 1];
        let goal_busy_until = table.last_vertex_claim(goal);

        if table.is_vertex_blocked(Tick::ZERO, start) {
            return None;
        }
        if chain.len() == 1 {
            // Standing on the goal from tick 0: nobody may pass through it later.
            return match goal_busy_until {
                Some(_) => None,
                None => Some(Path::stationary(start)),
            };
        }

        let mut nodes = vec![start];
        let mut now = Tick::ZERO;
        let last_step = chain.len() - 2;

        for (i, step) in chain.windows(2).enumerate() {
            let (prev, next) = (step[0], step[1]);
            let settle = if i == last_step { goal_busy_until } else { None };

            let mut waited = 0;
            while table.is_transition_blocked(now.next(), prev, next)
                || settle.is_some_and(|busy| now.next() <= busy)
            {
                if table.is_blocked_forever(now.next(), prev, next) {
                    return None;
                }
                waited += 1;
                if self.config.wait_exhausted(waited) {
                    return None;
                }
                now = now.next();
                if table.is_vertex_blocked(now, prev) {
                    return None;
                }
                nodes.push(prev);
            }

            nodes.push(next);
            now = now.next();
        }

        Path::new(nodes)
    }
}

impl SingleAgentPlanner for CooperativeAStar {
    fn plan(
        &self,
        graph:        &dyn SearchGraph,
        start:        NodeId,
        goal:         NodeId,
        reservations: &ReservationTable,
    ) -> Result<Path, PlanError> {
        let n = graph.node_count();
        if start.index() >= n || goal.index() >= n {
            return Err(PlanError::UnreachableGoal { start, goal });
        }

        let path = self
            .search(graph, start, goal, reservations)
            .and_then(|trace| walk_back(&trace, start, goal))
            .and_then(|chain| self.replay(reservations, &chain));

        match path {
            Some(path) => {
                debug!(
                    start = start.0,
                    goal = goal.0,
                    arrival = %path.arrival(),
                    waits = path.wait_count(),
                    "path found"
                );
                Ok(path)
            }
            None => {
                let err = classify_failure(graph, start, goal);
                debug!(start = start.0, goal = goal.0, %err, "no path");
                Err(err)
            }
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Follow predecessor links from `goal` back to `start`.
fn walk_back(trace: &[NodeId], start: NodeId, goal: NodeId) -> Option<Vec<NodeId>> {
    let mut rev = vec![goal];
    let mut cur = goal;
    while cur != start {
        cur = *trace.get(cur.index())?;
        if cur == NodeId::INVALID || rev.len() > trace.len() {
            return None;
        }
        rev.push(cur);
    }
    rev.reverse();
    Some(rev)
}

fn classify_failure(graph: &dyn SearchGraph, start: NodeId, goal: NodeId) -> PlanError {
    if graph.distance(start, goal).is_infinite() {
        PlanError::UnreachableGoal { start, goal }
    } else {
        PlanError::BlockedByReservations { start, goal }
    }
}

/// Plan one agent with the default [`CooperativeAStar`].
pub fn plan_single(
    graph:        &dyn SearchGraph,
    start:        NodeId,
    goal:         NodeId,
    reservations: &ReservationTable,
) -> Result<Path, PlanError> {
    CooperativeAStar::default().plan(graph, start, goal, reservations)
}
